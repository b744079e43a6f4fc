//! monkey-par - AST Node Definitions
//!
//! This module contains all AST node definitions produced by the parser,
//! plus the pretty-printer (`Display` impls). Every node exclusively owns
//! its children; identifier text is copied out of the borrowed token
//! payloads when a node is built, so the tree outlives the source buffer.
//!
//! The pretty-printer makes grouping explicit: printing an expression
//! parenthesizes every prefix and infix node, and the printed form
//! re-parses to a structurally identical tree.

use std::fmt;

/// AST root - an ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// Statement in a program or block
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Name binding: `let x = 5;`
    Let(LetStmt),

    /// Early return: `return x;`
    Return(ReturnStmt),

    /// Bare expression in statement position
    Expr(Expression),
}

/// Let statement
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub name: String,
    pub value: Expression,
}

/// Return statement
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Expression,
}

/// A braced sequence of statements.
///
/// An `if` without an `else` carries an *empty* alternative block, never an
/// absent one; the evaluator relies on both branches existing structurally.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    /// Returns true if the block contains no statements.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// Expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Name reference
    Identifier(String),

    /// Integer literal
    IntegerLiteral(i64),

    /// Boolean literal
    BooleanLiteral(bool),

    /// Prefix operator application: `!x`, `-x`
    Prefix(PrefixExpr),

    /// Infix operator application: `a + b`
    Infix(InfixExpr),

    /// Conditional: `if (cond) { ... } else { ... }`
    If(IfExpr),

    /// Function literal: `fn(x, y) { ... }`
    FunctionLiteral(FunctionLiteral),

    /// Function call: `callee(a, b)`
    Call(CallExpr),
}

/// Prefix (unary) expression
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub op: UnOp,
    pub right: Box<Expression>,
}

/// Infix (binary) expression
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub left: Box<Expression>,
    pub op: BinOp,
    pub right: Box<Expression>,
}

/// If expression
#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expression>,
    pub consequence: Block,
    pub alternative: Block,
}

/// Function literal
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub params: Vec<String>,
    pub body: Block,
}

/// Call expression
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expression>,
    pub args: Vec<Expression>,
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    /// `!` - logical negation
    Not,
    /// `-` - arithmetic negation
    Neg,
}

/// Infix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Lt,
    Gt,
}

// ============================================================================
// PRETTY-PRINTER
// ============================================================================

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Not => write!(f, "!"),
            UnOp::Neg => write!(f, "-"),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_statements(f, &self.statements)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(s) => write!(f, "let {} = {};", s.name, s.value),
            Statement::Return(s) => write!(f, "return {};", s.value),
            Statement::Expr(e) => write!(f, "{}", e),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::IntegerLiteral(n) => write!(f, "{}", n),
            Expression::BooleanLiteral(b) => write!(f, "{}", b),
            Expression::Prefix(e) => write!(f, "({}{})", e.op, e.right),
            Expression::Infix(e) => write!(f, "({} {} {})", e.left, e.op, e.right),
            Expression::If(e) => {
                write!(f, "if ({}) ", e.condition)?;
                write_block(f, &e.consequence)?;
                if !e.alternative.is_empty() {
                    write!(f, " else ")?;
                    write_block(f, &e.alternative)?;
                }
                Ok(())
            },
            Expression::FunctionLiteral(e) => {
                write!(f, "fn({}) ", e.params.join(", "))?;
                write_block(f, &e.body)
            },
            Expression::Call(e) => {
                write!(f, "{}(", e.callee)?;
                for (i, arg) in e.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            },
        }
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block) -> fmt::Result {
    if block.is_empty() {
        return write!(f, "{{ }}");
    }
    write!(f, "{{ ")?;
    write_statements(f, &block.statements)?;
    write!(f, " }}")
}

fn write_statements(f: &mut fmt::Formatter<'_>, statements: &[Statement]) -> fmt::Result {
    for (i, stmt) in statements.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", stmt)?;
    }
    Ok(())
}
