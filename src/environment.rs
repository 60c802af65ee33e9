//! Lexically scoped variable storage.
//!
//! Frames form a unique-owner chain from the innermost scope out to the
//! globals; the chain is a strict path, never shared. `define` always writes
//! the innermost frame, lookups and assignments walk outward. The evaluator
//! keeps `push` and `pop` balanced around every block, so after any block
//! execution the chain is exactly what it was before.

use std::collections::HashMap;
use std::fmt;

use crate::ast::Value;
use crate::error::{RuntimeError, RuntimeResult};

#[derive(Debug, Default)]
struct Frame {
    symbols: HashMap<String, Value>,
    outer: Option<Box<Frame>>,
}

impl Frame {
    fn get(&self, name: &str) -> Option<&Value> {
        match self.symbols.get(name) {
            Some(value) => Some(value),
            None => self.outer.as_ref().and_then(|outer| outer.get(name)),
        }
    }

    /// Overwrites the nearest binding of `name`; false when no frame on the
    /// chain holds it.
    fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.symbols.get_mut(name) {
            *slot = value;
            true
        } else if let Some(outer) = self.outer.as_deref_mut() {
            outer.assign(name, value)
        } else {
            false
        }
    }
}

#[derive(Debug, Default)]
pub struct Environment {
    /// The innermost frame; the root of its `outer` chain is the global frame.
    frame: Frame,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` in the innermost frame, shadowing any outer binding.
    /// Redefining a name in the same frame overwrites it.
    pub fn define(&mut self, name: &str, value: Value) {
        self.frame.symbols.insert(name.to_owned(), value);
    }

    pub fn get(&self, name: &str) -> RuntimeResult<Value> {
        self.frame
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::name(format!("undefined variable '{}'", name)))
    }

    pub fn assign(&mut self, name: &str, value: Value) -> RuntimeResult<()> {
        if self.frame.assign(name, value) {
            Ok(())
        } else {
            Err(RuntimeError::name(format!("undefined variable '{}'", name)))
        }
    }

    /// Opens a new innermost frame.
    pub fn push(&mut self) {
        let outer = std::mem::take(&mut self.frame);
        self.frame.outer = Some(Box::new(outer));
    }

    /// Closes the innermost frame. The global frame cannot be popped.
    pub fn pop(&mut self) -> RuntimeResult<()> {
        match self.frame.outer.take() {
            Some(outer) => {
                self.frame = *outer;
                Ok(())
            }
            None => Err(RuntimeError::invalid_state("cannot pop the global scope")),
        }
    }

    /// Number of frames on the chain, the global frame included.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut frame = &self.frame;
        while let Some(outer) = frame.outer.as_deref() {
            depth += 1;
            frame = outer;
        }
        depth
    }
}

impl fmt::Display for Environment {
    /// Dumps every frame, globals first, with bindings in name order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut frames = Vec::new();
        let mut frame = Some(&self.frame);
        while let Some(current) = frame {
            frames.push(current);
            frame = current.outer.as_deref();
        }

        for (index, current) in frames.iter().rev().enumerate() {
            if index == 0 {
                writeln!(f, "== global scope")?;
            } else {
                writeln!(f, "== scope {}", index)?;
            }
            let mut names: Vec<&String> = current.symbols.keys().collect();
            names.sort();
            for name in names {
                writeln!(f, "{} = {}", name, current.symbols[name])?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeErrorKind;

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        assert_eq!(env.get("a").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_get_undefined_is_name_error() {
        let env = Environment::new();
        assert_eq!(env.get("missing").unwrap_err().kind, RuntimeErrorKind::Name);
    }

    #[test]
    fn test_shadowing_and_pop_restores_outer_binding() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));

        env.push();
        env.define("a", Value::Number(2.0));
        assert_eq!(env.get("a").unwrap(), Value::Number(2.0));

        env.pop().unwrap();
        // The inner definition shadowed, it did not mutate.
        assert_eq!(env.get("a").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_assign_walks_the_chain() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));

        env.push();
        env.assign("a", Value::Number(5.0)).unwrap();
        env.pop().unwrap();

        assert_eq!(env.get("a").unwrap(), Value::Number(5.0));
    }

    #[test]
    fn test_assign_undefined_is_name_error() {
        let mut env = Environment::new();
        let err = env.assign("missing", Value::Nil).unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::Name);
    }

    #[test]
    fn test_inner_lookup_reaches_outer_frames() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        env.push();
        env.push();
        assert_eq!(env.get("a").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_pop_at_root_is_invalid_state() {
        let mut env = Environment::new();
        let err = env.pop().unwrap_err();
        assert_eq!(err.kind, RuntimeErrorKind::InvalidState);
    }

    #[test]
    fn test_depth_tracks_push_and_pop() {
        let mut env = Environment::new();
        assert_eq!(env.depth(), 1);
        env.push();
        env.push();
        assert_eq!(env.depth(), 3);
        env.pop().unwrap();
        assert_eq!(env.depth(), 2);
    }

    #[test]
    fn test_display_lists_globals_first() {
        let mut env = Environment::new();
        env.define("b", Value::Number(2.0));
        env.define("a", Value::Number(1.0));
        env.push();
        env.define("x", Value::Bool(true));

        let dump = env.to_string();
        assert_eq!(
            dump,
            "== global scope\na = 1\nb = 2\n== scope 1\nx = true\n"
        );
    }
}
