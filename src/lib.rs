//! Scanner and expression parser for Lox.
//!
//! ```
//! use lox_expr::{parse_expression, printer};
//!
//! let mut errors = Vec::new();
//! let e = parse_expression("1 + 2 * 3", &mut errors).unwrap();
//! assert_eq!("(+ 1 (* 2 3))", printer::print(&e));
//! ```

pub mod error;
pub mod expr;
pub mod parser;
pub mod printer;
pub mod report;
pub mod scanner;
pub mod token;

pub use crate::{
    error::{Error, ErrorKind, Result},
    expr::{Expr, LoxLiteral},
    parser::Parser,
    report::{Reporter, WriteReporter},
    scanner::Scanner,
    token::{Token, TokenKind},
};

use log::debug;

/// Scans and parses `source` as a single expression.
///
/// Lexical errors are forwarded to `reporter` and stop the parse from
/// running at all, since the token stream they leave behind is only a
/// best effort.
pub fn parse_expression<R: Reporter>(source: &str, mut reporter: R) -> Option<Expr> {
    let mut lexical_errors = Vec::new();
    let tokens = Scanner::new(source, &mut lexical_errors).scan_tokens();

    if !lexical_errors.is_empty() {
        debug!("not parsing after {} lexical errors", lexical_errors.len());
        for e in lexical_errors {
            reporter.report(e);
        }
        return None;
    }

    Parser::new(tokens, reporter).parse()
}
