use log::{debug, trace};

use crate::{
    error::{Error, Result},
    expr::*,
    report::Reporter,
    token::*,
};

const EQUALITY_TOKENS: &[TokenKind] = &[
    TokenKind::BangEqual,
    TokenKind::EqualEqual,
];

const COMPARISON_TOKENS: &[TokenKind] = &[
    TokenKind::Greater,
    TokenKind::GreaterEqual,
    TokenKind::Less,
    TokenKind::LessEqual,
];

const TERM_TOKENS: &[TokenKind] = &[
    TokenKind::Minus,
    TokenKind::Plus,
];

const FACTOR_TOKENS: &[TokenKind] = &[
    TokenKind::Slash,
    TokenKind::Star,
];

const UNARY_TOKENS: &[TokenKind] = &[
    TokenKind::Bang,
    TokenKind::Minus,
];

/// Recursive-descent parser for expressions.
///
/// ```text
/// expression → equality
/// equality   → comparison ( ( "!=" | "==" ) comparison )*
/// comparison → term ( ( ">" | ">=" | "<" | "<=" ) term )*
/// term       → factor ( ( "+" | "-" ) factor )*
/// factor     → unary ( ( "/" | "*" ) unary )*
/// unary      → ( "!" | "-" ) unary | primary
/// primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
/// ```
pub struct Parser<R> {
    tokens: Vec<Token>,
    current: usize,
    reporter: R,
}

impl <R: Reporter> Parser<R> {
    pub fn new(mut tokens: Vec<Token>, reporter: R) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfFile) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token::new(TokenKind::EndOfFile, "", None, line));
        }
        Parser { tokens, current: 0, reporter }
    }

    /// Parses one expression starting at the current token.
    ///
    /// On a syntax error the error is reported and `None` is returned; the
    /// parser is left at the offending token, so a caller may `synchronize`
    /// and call `parse` again.
    pub fn parse(&mut self) -> Option<Expr> {
        debug!("parsing from token {} of {}", self.current, self.tokens.len());
        match self.expression() {
            Ok(e) => Some(e),
            Err(e) => {
                debug!("parse failed: {}", e);
                self.reporter.report(e);
                None
            },
        }
    }

    /// Discards tokens up to the next statement boundary. A `;` is
    /// consumed; a keyword starting a statement is left as the next token.
    pub fn synchronize(&mut self) {
        while !self.is_at_end() {
            if self.advance().kind == TokenKind::Semicolon { break }
            if self.peek().kind.starts_statement() { break }
        }
        trace!("synchronized at {:?} on line {}", self.peek().kind, self.peek().line);
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EndOfFile
    }

    fn expression(&mut self) -> Result<Expr> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::comparison,
            EQUALITY_TOKENS
        )
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::term,
            COMPARISON_TOKENS
        )
    }

    fn term(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::factor,
            TERM_TOKENS
        )
    }

    fn factor(&mut self) -> Result<Expr> {
        self.match_binary_precedence_with_tokens(
            Self::unary,
            FACTOR_TOKENS
        )
    }

    fn unary(&mut self) -> Result<Expr> {
        if let Some(token) = self.match_any(UNARY_TOKENS) {
            let right = Box::new(self.unary()?);
            Ok(Expr::new_unary(token, right))
        } else {
            self.primary()
        }
    }

    fn primary(&mut self) -> Result<Expr> {
        use TokenKind::*;
        let kind = self.peek().kind;
        match kind {
            True => {
                self.advance();
                Ok(Expr::new_literal(true.into()))
            },
            False => {
                self.advance();
                Ok(Expr::new_literal(false.into()))
            },
            Nil => {
                self.advance();
                Ok(Expr::new_literal(LoxLiteral::Nil))
            },
            Number | String => {
                let value = self.advance().literal.clone().unwrap_or(LoxLiteral::Nil);
                Ok(Expr::new_literal(value))
            },
            LeftParen => {
                self.advance();
                let expression = Box::new(self.expression()?);
                self.consume(RightParen, "Expect ')' after expression.")?;
                Ok(Expr::new_grouping(expression))
            },
            _ => Err(self.error("Expect expression.")),
        }
    }

    fn consume(&mut self, kind: TokenKind, error_msg: &str) -> Result<Token> {
        match self.match_single(kind) {
            Some(token) => Ok(token),
            None => Err(self.error(error_msg)),
        }
    }

    fn match_binary_precedence_with_tokens(
        &mut self,
        parse: impl Fn(&mut Self) -> Result<Expr>,
        kinds: &[TokenKind]
    ) -> Result<Expr> {
        let mut e = parse(self)?;

        while let Some(token) = self.match_any(kinds) {
            let right = Box::new(parse(self)?);
            e = Expr::new_binary(Box::new(e), token, right)
        }

        Ok(e)
    }

    fn match_single(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance().clone())
        } else {
            None
        }
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        kinds.iter().find_map(|k| self.match_single(*k))
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    // Before the first advance this is the first token.
    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    fn error(&self, message: &str) -> Error {
        Error::syntactic(self.peek().clone(), message)
    }
}
