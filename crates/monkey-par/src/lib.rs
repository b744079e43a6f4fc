//! monkey-par - Parser (Syntactic Analyzer)
//!
//! Expression parsing uses Pratt parsing (top-down operator precedence):
//! a prefix rule for the token that starts an expression, then a climb
//! over infix operators whose binding power exceeds the current minimum.
//!
//! # Operator Precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `==`, `!=` | Left |
//! | 2 | `<`, `>` | Left |
//! | 3 | `+`, `-` | Left |
//! | 4 | `*`, `/` | Left |
//! | 5 | unary `!`, `-` | - |
//! | 6 | `callee(...)` | Left |
//!
//! ```
//! // a + b * c parses as a + (b * c) because * has higher precedence
//! // a - b - c parses as (a - b) - c because - is left-associative
//! ```
//!
//! The parser reads tokens straight off the lexer through a two-token
//! window (`current`, `peek`); `step()` advances both. The grammar needs no
//! more lookahead than that. Errors abort the parse; the `?` returns drop
//! whatever subtree was under construction.

pub mod ast;
mod error;

#[cfg(test)]
mod edge_cases;

pub use ast::{
    BinOp, Block, CallExpr, Expression, FunctionLiteral, IfExpr, InfixExpr, LetStmt, PrefixExpr,
    Program, ReturnStmt, Statement, UnOp,
};
pub use error::{ParseError, Result};

use monkey_lex::{Lexer, Token};

/// Binding power levels for Pratt parsing.
///
/// Higher numbers = tighter binding (higher precedence). Infix operators
/// occupy even levels; their right binding power is `level + 1`, which
/// makes every binary operator left-associative.
mod bp {
    /// Minimum binding power (start of expression)
    pub const LOWEST: u8 = 0;

    /// Equality: ==, !=
    pub const EQUALS: u8 = 2;

    /// Comparison: <, >
    pub const LESSGREATER: u8 = 4;

    /// Additive: +, -
    pub const SUM: u8 = 6;

    /// Multiplicative: *, /
    pub const PRODUCT: u8 = 8;

    /// Prefix operators: unary !, -
    pub const PREFIX: u8 = 10;

    /// Call postfix: callee(...)
    pub const CALL: u8 = 12;
}

/// Parses a complete source string into a program.
///
/// # Returns
///
/// `Ok(Program)` with a deep-owned AST, or the first [`ParseError`]
/// encountered. Nothing of a failed parse survives.
///
/// # Example
///
/// ```
/// let program = monkey_par::parse("let x = 1 + 2;").unwrap();
/// assert_eq!(program.statements.len(), 1);
/// ```
pub fn parse(source: &str) -> Result<Program> {
    Parser::new(source).parse_program()
}

/// Recursive descent parser with Pratt expression parsing.
pub struct Parser<'a> {
    /// Token source
    lexer: Lexer<'a>,

    /// Token under consideration
    current: Token<'a>,

    /// One-token lookahead
    peek: Token<'a>,
}

impl<'a> Parser<'a> {
    /// Creates a parser over the given source, priming the token window.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
        }
    }

    /// Parses statements until end of input.
    pub fn parse_program(&mut self) -> Result<Program> {
        let mut statements = Vec::new();

        while self.current != Token::Eof {
            statements.push(self.parse_statement()?);
            self.step();
        }

        Ok(Program { statements })
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    /// Parse a statement
    ///
    /// On success the window is left on the statement's last token.
    fn parse_statement(&mut self) -> Result<Statement> {
        match self.current {
            Token::Let => self.parse_let_stmt(),
            Token::Return => self.parse_return_stmt(),
            _ => {
                let expr = self.parse_expr_bp(bp::LOWEST)?;
                self.eat_optional_semicolon();
                Ok(Statement::Expr(expr))
            },
        }
    }

    /// Parse let statement: `let` IDENT `=` expression `;?`
    fn parse_let_stmt(&mut self) -> Result<Statement> {
        let name = match self.peek {
            Token::Ident(name) => name.to_string(),
            _ => return Err(ParseError::UnexpectedToken),
        };
        self.step();

        self.expect_peek(Token::Assign)?;
        self.step();

        let value = self.parse_expr_bp(bp::LOWEST)?;
        self.eat_optional_semicolon();

        Ok(Statement::Let(LetStmt { name, value }))
    }

    /// Parse return statement: `return` expression `;?`
    fn parse_return_stmt(&mut self) -> Result<Statement> {
        self.step();

        let value = self.parse_expr_bp(bp::LOWEST)?;
        self.eat_optional_semicolon();

        Ok(Statement::Return(ReturnStmt { value }))
    }

    /// Parse block: `{` statement* `}`
    ///
    /// Called with `current` on the opening brace; consumes up to and
    /// including the matching `}`. End of input before the closing brace
    /// is an error.
    fn parse_block(&mut self) -> Result<Block> {
        let mut statements = Vec::new();
        self.step();

        while self.current != Token::RBrace {
            if self.current == Token::Eof {
                return Err(ParseError::UnexpectedToken);
            }
            statements.push(self.parse_statement()?);
            self.step();
        }

        Ok(Block { statements })
    }

    // =========================================================================
    // EXPRESSIONS
    // =========================================================================

    /// Parse expression with minimum binding power (Pratt parser core).
    ///
    /// Parses a prefix expression as the left-hand side, then loops while
    /// the upcoming infix operator binds tighter than `min_bp`. Passing an
    /// operator's `lbp + 1` as the minimum for its right operand makes
    /// every operator left-associative.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expression> {
        let mut lhs = self.parse_prefix()?;

        loop {
            if self.peek == Token::Semicolon {
                break;
            }

            match self.peek_binding_power() {
                Some((lbp, rbp)) if lbp > min_bp => {
                    self.step();
                    lhs = if self.current == Token::LParen {
                        self.parse_call(lhs)?
                    } else {
                        self.parse_infix(lhs, rbp)?
                    };
                },
                _ => break,
            }
        }

        Ok(lhs)
    }

    /// Parse prefix expression (atom or prefix operator).
    fn parse_prefix(&mut self) -> Result<Expression> {
        match self.current {
            Token::Int(text) => text
                .parse::<i64>()
                .map(Expression::IntegerLiteral)
                .map_err(|_| ParseError::NotANumber),
            Token::Ident(name) => Ok(Expression::Identifier(name.to_string())),
            Token::True => Ok(Expression::BooleanLiteral(true)),
            Token::False => Ok(Expression::BooleanLiteral(false)),
            Token::Bang => self.parse_prefix_op(UnOp::Not),
            Token::Minus => self.parse_prefix_op(UnOp::Neg),
            Token::LParen => self.parse_grouped(),
            Token::If => self.parse_if(),
            Token::Function => self.parse_function_literal(),
            _ => Err(ParseError::NotAnExpression),
        }
    }

    /// Parse unary expression: `!x`, `-x`
    fn parse_prefix_op(&mut self, op: UnOp) -> Result<Expression> {
        self.step();
        let right = self.parse_expr_bp(bp::PREFIX)?;
        Ok(Expression::Prefix(PrefixExpr {
            op,
            right: Box::new(right),
        }))
    }

    /// Parse infix expression; `current` is the operator token.
    fn parse_infix(&mut self, lhs: Expression, rbp: u8) -> Result<Expression> {
        let op = token_to_binop(self.current).ok_or(ParseError::UnexpectedToken)?;
        self.step();

        let rhs = self.parse_expr_bp(rbp)?;
        Ok(Expression::Infix(InfixExpr {
            left: Box::new(lhs),
            op,
            right: Box::new(rhs),
        }))
    }

    /// Parse parenthesized group: `(` expression `)`
    fn parse_grouped(&mut self) -> Result<Expression> {
        self.step();
        let expr = self.parse_expr_bp(bp::LOWEST)?;
        self.expect_peek(Token::RParen)?;
        Ok(expr)
    }

    /// Parse if expression: `if (` expression `)` Block (`else` Block)?
    ///
    /// A missing `else` yields an empty alternative block.
    fn parse_if(&mut self) -> Result<Expression> {
        self.expect_peek(Token::LParen)?;
        self.step();

        let condition = self.parse_expr_bp(bp::LOWEST)?;
        self.expect_peek(Token::RParen)?;

        self.expect_peek(Token::LBrace)?;
        let consequence = self.parse_block()?;

        let alternative = if self.peek == Token::Else {
            self.step();
            self.expect_peek(Token::LBrace)?;
            self.parse_block()?
        } else {
            Block::default()
        };

        Ok(Expression::If(IfExpr {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    /// Parse function literal: `fn (` paramlist `)` Block
    fn parse_function_literal(&mut self) -> Result<Expression> {
        self.expect_peek(Token::LParen)?;
        let params = self.parse_params()?;

        self.expect_peek(Token::LBrace)?;
        let body = self.parse_block()?;

        Ok(Expression::FunctionLiteral(FunctionLiteral { params, body }))
    }

    /// Parse comma-separated parameter names, possibly empty.
    ///
    /// Called with `current` on `(`; consumes through the closing `)`.
    fn parse_params(&mut self) -> Result<Vec<String>> {
        let mut params = Vec::new();

        if self.peek == Token::RParen {
            self.step();
            return Ok(params);
        }

        self.step();
        params.push(self.current_ident()?);

        while self.peek == Token::Comma {
            self.step();
            self.step();
            params.push(self.current_ident()?);
        }

        self.expect_peek(Token::RParen)?;
        Ok(params)
    }

    /// Parse call arguments: `callee (` arglist `)`
    ///
    /// Called with `current` on `(` and the already-parsed callee in hand.
    fn parse_call(&mut self, callee: Expression) -> Result<Expression> {
        let mut args = Vec::new();

        if self.peek == Token::RParen {
            self.step();
        } else {
            self.step();
            args.push(self.parse_expr_bp(bp::LOWEST)?);

            while self.peek == Token::Comma {
                self.step();
                self.step();
                args.push(self.parse_expr_bp(bp::LOWEST)?);
            }

            self.expect_peek(Token::RParen)?;
        }

        Ok(Expression::Call(CallExpr {
            callee: Box::new(callee),
            args,
        }))
    }

    // =========================================================================
    // TOKEN WINDOW HELPERS
    // =========================================================================

    /// Advance the two-token window.
    fn step(&mut self) {
        self.current = self.peek;
        self.peek = self.lexer.next_token();
    }

    /// Step if `peek` matches `expected`, error otherwise.
    fn expect_peek(&mut self, expected: Token<'_>) -> Result<()> {
        if self.peek == expected {
            self.step();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken)
        }
    }

    /// Consume a trailing semicolon if present.
    fn eat_optional_semicolon(&mut self) {
        if self.peek == Token::Semicolon {
            self.step();
        }
    }

    /// Require `current` to be an identifier and copy its name out.
    fn current_ident(&mut self) -> Result<String> {
        match self.current {
            Token::Ident(name) => Ok(name.to_string()),
            _ => Err(ParseError::UnexpectedToken),
        }
    }

    /// Get binding powers for the upcoming infix operator.
    ///
    /// Returns `(left_bp, right_bp)`; `right_bp = left_bp + 1` makes the
    /// operator left-associative. `(` is the call postfix and binds
    /// tightest of all.
    fn peek_binding_power(&self) -> Option<(u8, u8)> {
        match self.peek {
            Token::Eq | Token::NotEq => Some((bp::EQUALS, bp::EQUALS + 1)),
            Token::Lt | Token::Gt => Some((bp::LESSGREATER, bp::LESSGREATER + 1)),
            Token::Plus | Token::Minus => Some((bp::SUM, bp::SUM + 1)),
            Token::Asterisk | Token::Slash => Some((bp::PRODUCT, bp::PRODUCT + 1)),
            Token::LParen => Some((bp::CALL, bp::CALL + 1)),
            _ => None,
        }
    }
}

/// Convert token to binary operator.
fn token_to_binop(token: Token<'_>) -> Option<BinOp> {
    match token {
        Token::Plus => Some(BinOp::Add),
        Token::Minus => Some(BinOp::Sub),
        Token::Asterisk => Some(BinOp::Mul),
        Token::Slash => Some(BinOp::Div),
        Token::Eq => Some(BinOp::Eq),
        Token::NotEq => Some(BinOp::NotEq),
        Token::Lt => Some(BinOp::Lt),
        Token::Gt => Some(BinOp::Gt),
        _ => None,
    }
}
