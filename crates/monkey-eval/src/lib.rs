//! monkey-eval - Tree-Walking Evaluator with Mark-and-Sweep Collection
//!
//! Final phase of the interpreter pipeline: walks the AST produced by
//! `monkey-par` and yields a single result value.
//!
//! ```text
//! Program
//!    │
//!    ▼
//! [Evaluator] ──▶ Object
//!    │
//!    ├── Heap: registry of every environment, closure, and
//!    │         return cell allocated during evaluation
//!    └── GC: mark from the root environment, sweep the rest,
//!            once per top-level statement
//! ```
//!
//! The evaluator owns all heap state. Closures capture their defining
//! environment *by reference*, and environments store closures, so the
//! object graph is cyclic; see the `heap` module for why that rules out
//! reference counting and how the tracing collector reclaims cycles.
//!
//! # Example
//!
//! ```
//! use monkey_eval::{Evaluator, Object};
//!
//! let program = monkey_par::parse("let x = 2; x + 3").unwrap();
//! let mut evaluator = Evaluator::new();
//! assert_eq!(evaluator.evaluate(&program), Ok(Object::Integer(5)));
//! ```

mod env;
mod error;
mod heap;
mod object;

#[cfg(test)]
mod edge_cases;

pub use env::Environment;
pub use error::{EvalError, Result};
pub use heap::{CellRef, EnvRef, FunRef, GcRoot, GcStats, Heap};
pub use object::{FunctionObject, Object};

use std::rc::Rc;

use monkey_par::{BinOp, Block, CallExpr, Expression, Program, Statement, UnOp};

/// Tree-walking evaluator.
///
/// Each instance owns its heap and root environment; nothing is shared
/// between instances. Evaluation is synchronous and single-threaded, and
/// recursion depth is bounded only by the native stack.
///
/// Returned `Object`s with heap handles (`Function`, and transiently
/// `Return`) are valid only for the lifetime of the evaluator that
/// produced them; inline values escape freely.
#[derive(Debug)]
pub struct Evaluator {
    heap: Heap,
    root: EnvRef,
}

impl Evaluator {
    /// Creates an evaluator with a fresh, empty root environment.
    pub fn new() -> Self {
        let mut heap = Heap::new();
        let root = heap.alloc_env(Environment::new());
        Self { heap, root }
    }

    /// Evaluates a program in the root environment.
    ///
    /// Statements run in order. A top-level `return` stops the program and
    /// yields the unwrapped value; otherwise the program yields the last
    /// statement's value (or `Null` for an empty program). A collection
    /// pass runs after every top-level statement, so by the time this
    /// returns the registry holds only what is reachable from the root
    /// environment — plus the result value itself, which is rooted during
    /// each pass so a program may safely evaluate to a closure.
    ///
    /// The root environment persists across calls: bindings made by one
    /// program are visible to the next, REPL-style.
    pub fn evaluate(&mut self, program: &Program) -> Result<Object> {
        let mut result = Object::Null;

        for stmt in &program.statements {
            let value = self.eval_statement(stmt, self.root)?;

            if let Object::Return(cell) = value {
                let inner = self.heap.cell_value(cell);
                self.collect(inner);
                return Ok(inner);
            }

            result = value;
            self.collect(result);
        }

        Ok(result)
    }

    /// Runs a collection pass with only the root environment as root.
    ///
    /// Useful for callers that held on to a result value and are done
    /// with it.
    pub fn collect_now(&mut self) {
        self.collect(Object::Null);
    }

    /// Collector activity counters.
    pub fn gc_stats(&self) -> GcStats {
        self.heap.stats()
    }

    /// Number of registered environments (including the root).
    pub fn live_environments(&self) -> usize {
        self.heap.live_envs()
    }

    /// Number of registered function objects.
    pub fn live_functions(&self) -> usize {
        self.heap.live_funs()
    }

    /// Number of registered return cells.
    pub fn live_cells(&self) -> usize {
        self.heap.live_cells()
    }

    fn collect(&mut self, pending: Object) {
        self.heap
            .collect(&[GcRoot::Env(self.root), GcRoot::Value(pending)]);
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    fn eval_statement(&mut self, stmt: &Statement, env: EnvRef) -> Result<Object> {
        match stmt {
            Statement::Let(s) => {
                let value = self.eval_expression(&s.value, env)?;
                self.heap.set_binding(env, &s.name, value);
                Ok(Object::Null)
            },
            Statement::Return(s) => {
                let value = self.eval_expression(&s.value, env)?;
                let cell = self.heap.alloc_cell(value);
                Ok(Object::Return(cell))
            },
            Statement::Expr(e) => self.eval_expression(e, env),
        }
    }

    /// Evaluates a block, short-circuiting on `return`.
    ///
    /// A `Return` wrapper passes through *unwrapped* — unwrapping is the
    /// job of the enclosing function call (or the top-level program),
    /// which is what lets `return` escape nested `if` blocks.
    fn eval_block(&mut self, block: &Block, env: EnvRef) -> Result<Object> {
        let mut result = Object::Null;

        for stmt in &block.statements {
            result = self.eval_statement(stmt, env)?;
            if matches!(result, Object::Return(_)) {
                break;
            }
        }

        Ok(result)
    }

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================

    fn eval_expression(&mut self, expr: &Expression, env: EnvRef) -> Result<Object> {
        match expr {
            Expression::Identifier(name) => {
                Ok(self.heap.get_binding(env, name).unwrap_or(Object::Null))
            },
            Expression::IntegerLiteral(n) => Ok(Object::Integer(*n)),
            Expression::BooleanLiteral(b) => Ok(Object::Boolean(*b)),
            Expression::Prefix(e) => {
                let right = self.eval_expression(&e.right, env)?;
                eval_prefix(e.op, right)
            },
            Expression::Infix(e) => {
                let left = self.eval_expression(&e.left, env)?;
                let right = self.eval_expression(&e.right, env)?;
                eval_infix(e.op, left, right)
            },
            Expression::If(e) => {
                let condition = self.eval_expression(&e.condition, env)?;
                if condition.is_truthy() {
                    self.eval_block(&e.consequence, env)
                } else {
                    self.eval_block(&e.alternative, env)
                }
            },
            Expression::FunctionLiteral(e) => {
                let fun = FunctionObject {
                    params: Rc::from(e.params.clone()),
                    body: Rc::new(e.body.clone()),
                    env,
                };
                Ok(Object::Function(self.heap.alloc_fun(fun)))
            },
            Expression::Call(e) => self.eval_call(e, env),
        }
    }

    fn eval_call(&mut self, call: &CallExpr, env: EnvRef) -> Result<Object> {
        let callee = self.eval_expression(&call.callee, env)?;
        let fun_ref = match callee {
            Object::Function(r) => r,
            _ => return Err(EvalError::NotAFunction),
        };

        let (params, body, captured) = {
            let fun = self.heap.fun(fun_ref);
            (Rc::clone(&fun.params), Rc::clone(&fun.body), fun.env)
        };

        if call.args.len() != params.len() {
            return Err(EvalError::FunctionArgumentMismatch);
        }

        // Arguments evaluate in the caller's environment, left to right,
        // before the callee's scope exists. Using the callee's scope here
        // would break closures whose parameters shadow captured names.
        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.eval_expression(arg, env)?);
        }

        let call_env = self.heap.alloc_env(Environment::with_outer(captured));
        for (name, value) in params.iter().zip(args) {
            self.heap.set_binding(call_env, name, value);
        }

        let result = self.eval_block(&body, call_env)?;

        // `return` escapes exactly one function boundary.
        if let Object::Return(cell) = result {
            Ok(self.heap.cell_value(cell))
        } else {
            Ok(result)
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn eval_prefix(op: UnOp, right: Object) -> Result<Object> {
    match op {
        UnOp::Not => Ok(Object::Boolean(!right.is_truthy())),
        UnOp::Neg => match right {
            Object::Integer(n) => Ok(Object::Integer(-n)),
            _ => Err(EvalError::UnknownOperator),
        },
    }
}

fn eval_infix(op: BinOp, left: Object, right: Object) -> Result<Object> {
    match (left, right) {
        (Object::Integer(l), Object::Integer(r)) => Ok(match op {
            BinOp::Add => Object::Integer(l + r),
            BinOp::Sub => Object::Integer(l - r),
            BinOp::Mul => Object::Integer(l * r),
            // Truncates toward zero.
            BinOp::Div => Object::Integer(l / r),
            BinOp::Eq => Object::Boolean(l == r),
            BinOp::NotEq => Object::Boolean(l != r),
            BinOp::Lt => Object::Boolean(l < r),
            BinOp::Gt => Object::Boolean(l > r),
        }),
        (Object::Boolean(l), Object::Boolean(r)) => match op {
            BinOp::Eq => Ok(Object::Boolean(l == r)),
            BinOp::NotEq => Ok(Object::Boolean(l != r)),
            _ => Err(EvalError::UnknownOperator),
        },
        _ => Err(EvalError::TypeMismatch),
    }
}
