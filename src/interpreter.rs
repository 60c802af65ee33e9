//! Tree-walking evaluator.
//!
//! Statements execute in order against a chained environment; the first
//! runtime error unwinds everything and is reported to the caller. Evaluation
//! order is strictly left to right: a binary's left operand before its right,
//! a call's callee before its arguments, arguments in index order. The only
//! exception is the logical operators, which skip the right operand entirely
//! when the left one decides.

use crate::ast::{BinaryOp, Expr, Literal, LogicalOp, Program, Stmt, UnaryOp, Value};
use crate::builtin;
use crate::environment::Environment;
use crate::error::{RuntimeError, RuntimeResult};

pub struct Interpreter {
    env: Environment,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// A fresh interpreter whose global frame holds the built-ins.
    pub fn new() -> Self {
        let mut env = Environment::new();
        builtin::install(&mut env);
        Self { env }
    }

    /// Executes the program, stopping at the first runtime error.
    pub fn interpret(&mut self, program: &Program) -> RuntimeResult<()> {
        for statement in &program.statements {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    /// Read-only view of the environment chain, for the REPL's `.env`.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn push_scope(&mut self) {
        self.env.push();
    }

    pub fn pop_scope(&mut self) -> RuntimeResult<()> {
        self.env.pop()
    }

    fn execute_statement(&mut self, statement: &Stmt) -> RuntimeResult<()> {
        match statement {
            Stmt::Expr(expr) => {
                self.evaluate_expression(expr)?;
                Ok(())
            }

            Stmt::Print(expr) => {
                let value = self.evaluate_expression(expr)?;
                println!("{}", value);
                Ok(())
            }

            Stmt::VarDecl { name, init } => {
                let value = match init {
                    Some(expr) => self.evaluate_expression(expr)?,
                    None => Value::Nil,
                };
                self.env.define(name, value);
                Ok(())
            }

            Stmt::Assignment { name, value } => {
                let value = self.evaluate_expression(value)?;
                self.env.assign(name, value)
            }

            Stmt::Block(statements) => self.execute_block(statements),

            Stmt::If { condition, then_branch, else_branch } => {
                if self.evaluate_expression(condition)?.is_truthy() {
                    self.execute_statement(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute_statement(else_branch)
                } else {
                    Ok(())
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate_expression(condition)?.is_truthy() {
                    self.execute_statement(body)?;
                }
                Ok(())
            }
        }
    }

    /// Runs a block in a fresh frame. The frame is popped on every exit path,
    /// errors included, so the chain is identical before and after.
    fn execute_block(&mut self, statements: &[Stmt]) -> RuntimeResult<()> {
        self.env.push();
        let result = self.run_statements(statements);
        self.env.pop()?;
        result
    }

    fn run_statements(&mut self, statements: &[Stmt]) -> RuntimeResult<()> {
        for statement in statements {
            self.execute_statement(statement)?;
        }
        Ok(())
    }

    fn evaluate_expression(&mut self, expr: &Expr) -> RuntimeResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),

            Expr::Grouping(inner) => self.evaluate_expression(inner),

            Expr::Identifier(name) => self.env.get(name),

            Expr::Unary { op, right } => {
                let right = self.evaluate_expression(right)?;
                match op {
                    UnaryOp::Neg => Ok(Value::Number(-right.to_number()?)),
                    UnaryOp::Not => Ok(Value::Bool(!right.is_truthy())),
                }
            }

            Expr::Binary { left, op, right } => {
                let lhs = self.evaluate_expression(left)?;
                let rhs = self.evaluate_expression(right)?;
                apply_binary(*op, lhs, rhs)
            }

            Expr::Logical { left, op, right } => {
                let lhs = self.evaluate_expression(left)?;
                // The deciding operand is returned unchanged; the right
                // operand is never evaluated once the left decides.
                match op {
                    LogicalOp::And if !lhs.is_truthy() => Ok(lhs),
                    LogicalOp::Or if lhs.is_truthy() => Ok(lhs),
                    _ => self.evaluate_expression(right),
                }
            }

            Expr::Call { callee, args } => {
                let callee = self.evaluate_expression(callee)?;
                let mut arguments = Vec::with_capacity(args.len());
                for arg in args {
                    arguments.push(self.evaluate_expression(arg)?);
                }
                call_value(callee, &arguments)
            }
        }
    }
}

fn apply_binary(op: BinaryOp, lhs: Value, rhs: Value) -> RuntimeResult<Value> {
    // Equality works on raw values; everything else coerces to numbers.
    match op {
        BinaryOp::Eq => return Ok(Value::Bool(lhs == rhs)),
        BinaryOp::Ne => return Ok(Value::Bool(lhs != rhs)),
        _ => {}
    }

    let left = lhs.to_number()?;
    let right = rhs.to_number()?;

    // Division by zero follows IEEE 754 and yields an infinity or NaN.
    let value = match op {
        BinaryOp::Add => Value::Number(left + right),
        BinaryOp::Sub => Value::Number(left - right),
        BinaryOp::Mul => Value::Number(left * right),
        BinaryOp::Div => Value::Number(left / right),
        BinaryOp::Lt => Value::Bool(left < right),
        BinaryOp::Le => Value::Bool(left <= right),
        BinaryOp::Gt => Value::Bool(left > right),
        BinaryOp::Ge => Value::Bool(left >= right),
        BinaryOp::Eq | BinaryOp::Ne => unreachable!("handled above"),
    };
    Ok(value)
}

fn call_value(callee: Value, args: &[Value]) -> RuntimeResult<Value> {
    match callee {
        Value::Native(func) => {
            if args.len() != func.arity() {
                return Err(RuntimeError::generic(format!(
                    "{} expects {} argument(s), got {}",
                    func.name,
                    func.arity(),
                    args.len()
                )));
            }
            func.call(args)
        }
        other => Err(RuntimeError::type_error(format!(
            "{} is not callable",
            other.type_name()
        ))),
    }
}
