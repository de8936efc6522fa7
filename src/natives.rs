//! Host functions available to scripts.
//!
//! Nothing here is installed automatically; a host opts in through
//! [`register_defaults`] (or individual [`Interpreter::define_native`] calls)
//! before running any code.

use chrono::Utc;

use crate::interpreter::Interpreter;
use crate::value::Value;

/// Seconds since the Unix epoch, with millisecond precision.
pub fn clock(_args: &[Value]) -> Result<Value, String> {
    let millis = Utc::now().timestamp_millis();
    Ok(Value::Number(millis as f64 / 1000.0))
}

pub fn register_defaults(interpreter: &mut Interpreter) {
    interpreter.define_native("clock", 0, clock);
}
