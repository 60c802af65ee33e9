//! Native functions pre-installed in the global scope.
//!
//! Every built-in is a plain function pointer wrapped in [`NativeFn`], which
//! carries the declared arity. The evaluator checks the argument count before
//! dispatching, so the implementations only validate their operands.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::ast::Value;
use crate::environment::Environment;
use crate::error::{RuntimeError, RuntimeResult};

/// A host function callable from scripts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NativeFn {
    pub name: &'static str,
    arity: usize,
    func: fn(&[Value]) -> RuntimeResult<Value>,
}

impl NativeFn {
    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn call(&self, args: &[Value]) -> RuntimeResult<Value> {
        (self.func)(args)
    }
}

/// Installs every native function into the global frame. Runs once before
/// execution; scripts may rebind the names like any other variable.
pub fn install(env: &mut Environment) {
    let natives: &[(&'static str, usize, fn(&[Value]) -> RuntimeResult<Value>)] = &[
        ("time", 0, native_time),
        ("input", 1, native_input),
        ("number", 1, native_number),
        ("abs", 1, native_abs),
        ("floor", 1, native_floor),
        ("ceil", 1, native_ceil),
        ("sqrt", 1, native_sqrt),
        ("sin", 1, native_sin),
        ("cos", 1, native_cos),
        ("atan2", 2, native_atan2),
        ("random", 0, native_random),
    ];

    for &(name, arity, func) in natives {
        env.define(name, Value::Native(NativeFn { name, arity, func }));
    }
}

/// `time()` - seconds since the Unix epoch.
fn native_time(_args: &[Value]) -> RuntimeResult<Value> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| RuntimeError::generic(format!("system clock error: {}", err)))?;
    Ok(Value::Number(now.as_secs_f64()))
}

/// `input(prompt)` - writes the prompt, reads one line from stdin and returns
/// it without the trailing newline.
fn native_input(args: &[Value]) -> RuntimeResult<Value> {
    let [prompt] = args else {
        return Err(RuntimeError::generic("input expects 1 argument"));
    };

    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|err| RuntimeError::generic(format!("cannot flush stdout: {}", err)))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|err| RuntimeError::generic(format!("cannot read stdin: {}", err)))?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }

    Ok(Value::String(line))
}

/// `number(x)` - coerces a number or numeric string to a number.
fn native_number(args: &[Value]) -> RuntimeResult<Value> {
    let [value] = args else {
        return Err(RuntimeError::generic("number expects 1 argument"));
    };
    Ok(Value::Number(value.to_number()?))
}

fn unary_math(args: &[Value], name: &str, op: fn(f64) -> f64) -> RuntimeResult<Value> {
    let [value] = args else {
        return Err(RuntimeError::generic(format!("{} expects 1 argument", name)));
    };
    Ok(Value::Number(op(value.to_number()?)))
}

fn native_abs(args: &[Value]) -> RuntimeResult<Value> {
    unary_math(args, "abs", f64::abs)
}

fn native_floor(args: &[Value]) -> RuntimeResult<Value> {
    unary_math(args, "floor", f64::floor)
}

fn native_ceil(args: &[Value]) -> RuntimeResult<Value> {
    unary_math(args, "ceil", f64::ceil)
}

fn native_sqrt(args: &[Value]) -> RuntimeResult<Value> {
    unary_math(args, "sqrt", f64::sqrt)
}

fn native_sin(args: &[Value]) -> RuntimeResult<Value> {
    unary_math(args, "sin", f64::sin)
}

fn native_cos(args: &[Value]) -> RuntimeResult<Value> {
    unary_math(args, "cos", f64::cos)
}

/// `atan2(y, x)` - angle of the vector `(x, y)`, in radians.
fn native_atan2(args: &[Value]) -> RuntimeResult<Value> {
    let [y, x] = args else {
        return Err(RuntimeError::generic("atan2 expects 2 arguments"));
    };
    Ok(Value::Number(y.to_number()?.atan2(x.to_number()?)))
}

/// `random()` - uniform number in [0, 1).
fn native_random(_args: &[Value]) -> RuntimeResult<Value> {
    let mut rng = rand::thread_rng();
    Ok(Value::Number(rng.gen::<f64>()))
}
