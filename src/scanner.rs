use crate::{
    error::Error,
    expr::LoxLiteral,
    report::Reporter,
    token::{Token, TokenKind},
};
use log::{debug, trace};
use peekmore::{PeekMore, PeekMoreIterator};
use phf::phf_map;
use std::str::Chars;

static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "for" => TokenKind::For,
    "fun" => TokenKind::Fun,
    "if" => TokenKind::If,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
};

/// Single-pass scanner over a source string.
///
/// Lexical errors are handed to the reporter and scanning carries on, so
/// the scanner always produces a token stream terminated by exactly one
/// `EndOfFile` token.
pub struct Scanner<'a, R> {
    src: PeekMoreIterator<Chars<'a>>,
    lexeme_buffer: String,
    literal: Option<LoxLiteral>,
    line: usize,
    reporter: R,
    finished: bool,
}

impl <'a, R: Reporter> Iterator for Scanner<'a, R> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished { return None }

        loop {
            if self.peek().is_none() {
                self.finished = true;
                return Some(Token::new(TokenKind::EndOfFile, "", None, self.line));
            }

            let kind = self.next_token_kind();
            let lexeme = std::mem::take(&mut self.lexeme_buffer);
            let literal = self.literal.take();

            if let Some(kind) = kind {
                trace!("scanned {:?} '{}' on line {}", kind, lexeme, self.line);
                return Some(Token { kind, lexeme, literal, line: self.line });
            }
        }
    }
}

impl <'a, R: Reporter> Scanner<'a, R> {
    pub fn new(src: &'a str, reporter: R) -> Self {
        Self {
            src: src.chars().peekmore(),
            lexeme_buffer: String::new(),
            literal: None,
            line: 1,
            reporter,
            finished: false,
        }
    }

    pub fn scan_tokens(self) -> Vec<Token> {
        let tokens: Vec<Token> = self.collect();
        debug!("scanned {} tokens", tokens.len());
        tokens
    }

    fn next_token_kind(&mut self) -> Option<TokenKind> {
        let next_char = self.advance()?;

        use TokenKind::*;
        match next_char {
            '(' => Some(LeftParen),
            ')' => Some(RightParen),
            '{' => Some(LeftBrace),
            '}' => Some(RightBrace),
            ',' => Some(Comma),
            '.' => Some(Dot),
            '-' => Some(Minus),
            '+' => Some(Plus),
            ';' => Some(Semicolon),
            '*' => Some(Star),
            '!' => Some(if self.does_next_match('=') { BangEqual } else { Bang }),
            '=' => Some(if self.does_next_match('=') { EqualEqual } else { Equal }),
            '<' => Some(if self.does_next_match('=') { LessEqual } else { Less }),
            '>' => Some(if self.does_next_match('=') { GreaterEqual } else { Greater }),
            '/' => {
                if self.does_next_match('/') {
                    self.advance_until_match('\n');
                    None
                } else if self.does_next_match('*') {
                    self.block_comment();
                    None
                } else {
                    Some(Slash)
                }
            },
            ' ' | '\r' | '\t' => None,
            '\n' => {
                self.line += 1;
                None
            },
            '"' => Some(self.extract_string()),
            c if c.is_ascii_digit() => self.extract_number(),
            c if can_start_identifier(c) => Some(self.extract_identifier()),
            c => {
                self.error(format!("Unexpected character '{}'.", c));
                None
            },
        }
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.src.next()?;
        self.lexeme_buffer.push(next);
        Some(next)
    }

    fn peek(&mut self) -> Option<char> {
        self.src.peek().copied()
    }

    fn peek_next(&mut self) -> Option<char> {
        self.src.peek_nth(1).copied()
    }

    fn does_next_match(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    // Entered just after the opening "/*".
    fn block_comment(&mut self) {
        let mut depth = 1usize;
        while depth > 0 {
            match self.advance() {
                None => {
                    self.error("Unterminated block comment.");
                    return;
                },
                Some('\n') => self.line += 1,
                Some('/') if self.peek() == Some('*') => {
                    self.advance();
                    depth += 1;
                },
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    depth -= 1;
                },
                Some(_) => {},
            }
        }
    }

    fn extract_string(&mut self) -> TokenKind {
        let mut newline_count = 0;
        self.advance_until_match_for_each('"', |c| if c == '\n' { newline_count += 1 });
        self.line += newline_count;

        let value = match self.advance() {
            None => {
                self.error("Unterminated string.");
                self.lexeme_buffer[1..].to_string()
            },
            Some(_) => { // must be the closing quote
                let end = self.lexeme_buffer.len() - 1;
                self.lexeme_buffer[1..end].to_string()
            },
        };

        self.literal = Some(LoxLiteral::String(value));
        TokenKind::String
    }

    fn extract_number(&mut self) -> Option<TokenKind> {
        self.advance_until(|n| !n.is_ascii_digit());

        let has_fraction = self.peek_next().map_or(false, |c| c.is_ascii_digit());
        if self.peek() == Some('.') && has_fraction {
            self.advance();
            self.advance_until(|n| !n.is_ascii_digit());
        }

        match self.lexeme_buffer.parse() {
            Ok(number) => {
                self.literal = Some(LoxLiteral::Number(number));
                Some(TokenKind::Number)
            },
            Err(_) => {
                let message = format!("Could not convert {} into a number.", self.lexeme_buffer);
                self.error(message);
                None
            },
        }
    }

    fn extract_identifier(&mut self) -> TokenKind {
        self.advance_until(|n| !is_part_of_valid_identifier(n));

        match KEYWORDS.get(self.lexeme_buffer.as_str()) {
            Some(kind) => *kind,
            None => TokenKind::Identifier,
        }
    }

    fn advance_until_match(&mut self, c: char) {
        self.advance_until(|n| n == c)
    }

    fn advance_until(&mut self, should_stop: impl Fn(char) -> bool) {
        self.advance_until_for_each(should_stop, |_| {})
    }

    fn advance_until_match_for_each(&mut self, c: char, f: impl FnMut(char)) {
        self.advance_until_for_each(|n| n == c, f);
    }

    fn advance_until_for_each(
        &mut self,
        should_stop: impl Fn(char) -> bool,
        mut f: impl FnMut(char)
    ) {
        while let Some(next) = self.peek() {
            if should_stop(next) { break }
            self.advance();
            f(next);
        }
    }

    fn error<S: Into<String>>(&mut self, message: S) {
        self.reporter.report(Error::lexical(self.line, message));
    }
}

fn can_start_identifier(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_part_of_valid_identifier(c: char) -> bool {
    can_start_identifier(c) || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use TokenKind::*;

    fn scan(src: &str) -> (Vec<Token>, Vec<Error>) {
        let mut errors = Vec::new();
        let tokens = Scanner::new(src, &mut errors).scan_tokens();
        (tokens, errors)
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_is_just_end_of_file() {
        let (tokens, errors) = scan("");
        assert!(errors.is_empty());
        assert_eq!(vec![Token::new(EndOfFile, "", None, 1)], tokens);
    }

    #[test]
    fn punctuation_and_operators() {
        let (tokens, errors) = scan("(){},.-+;*/ ! != = == < <= > >=");
        assert!(errors.is_empty());
        assert_eq!(
            vec![
                LeftParen, RightParen, LeftBrace, RightBrace, Comma, Dot, Minus, Plus,
                Semicolon, Star, Slash, Bang, BangEqual, Equal, EqualEqual, Less,
                LessEqual, Greater, GreaterEqual, EndOfFile,
            ],
            kinds(&tokens)
        );
        assert_eq!("!=", tokens[12].lexeme);
    }

    #[test]
    fn numbers_carry_their_value() {
        let (tokens, _) = scan("12 3.25");
        assert_eq!(Some(&LoxLiteral::Number(12.0)), tokens[0].literal());
        assert_eq!(Some(&LoxLiteral::Number(3.25)), tokens[1].literal());
        assert_eq!("3.25", tokens[1].lexeme);
    }

    #[test]
    fn trailing_dot_is_not_part_of_a_number() {
        let (tokens, _) = scan("7.");
        assert_eq!(vec![Number, Dot, EndOfFile], kinds(&tokens));
        assert_eq!("7", tokens[0].lexeme);
    }

    #[test]
    fn strings_strip_quotes_and_count_lines() {
        let (tokens, errors) = scan("\"one\ntwo\" x");
        assert!(errors.is_empty());
        assert_eq!(Some(&LoxLiteral::String("one\ntwo".into())), tokens[0].literal());
        assert_eq!("\"one\ntwo\"", tokens[0].lexeme);
        assert_eq!(2, tokens[0].line);
        assert_eq!(2, tokens[1].line);
    }

    #[test]
    fn unterminated_string_still_produces_a_token() {
        let (tokens, errors) = scan("\"abc");
        assert_eq!(1, errors.len());
        assert_eq!("Unterminated string.", errors[0].message());
        assert_eq!(vec![String, EndOfFile], kinds(&tokens));
        assert_eq!(Some(&LoxLiteral::String("abc".into())), tokens[0].literal());
    }

    #[test]
    fn keywords_are_not_identifiers() {
        let (tokens, _) = scan("and class else false for fun if nil or print return super this true var while");
        assert_eq!(
            vec![
                And, Class, Else, False, For, Fun, If, Nil, Or, Print, Return, Super,
                This, True, Var, While, EndOfFile,
            ],
            kinds(&tokens)
        );
    }

    #[test]
    fn identifiers_may_contain_keywords_and_digits() {
        let (tokens, _) = scan("iffy _x1 orchid");
        assert_eq!(vec![Identifier, Identifier, Identifier, EndOfFile], kinds(&tokens));
        assert_eq!(None, tokens[0].literal());
    }

    #[test]
    fn line_comments_run_to_end_of_line() {
        let (tokens, errors) = scan("// comment\n1");
        assert!(errors.is_empty());
        assert_eq!(vec![Number, EndOfFile], kinds(&tokens));
        assert_eq!(2, tokens[0].line);
    }

    #[test]
    fn block_comments_nest() {
        let (tokens, errors) = scan("/* outer /* inner */ still-outer */1");
        assert!(errors.is_empty());
        assert_eq!(vec![Number, EndOfFile], kinds(&tokens));
        assert_eq!("1", tokens[0].lexeme);
    }

    #[test]
    fn block_comments_advance_lines() {
        let (tokens, _) = scan("/* a\n/* b\n*/\n*/ 1");
        assert_eq!(4, tokens[0].line);
    }

    #[test]
    fn unterminated_block_comment_is_reported() {
        let (tokens, errors) = scan("/* open /* nested */ 1");
        assert_eq!(vec![EndOfFile], kinds(&tokens));
        assert_eq!(1, errors.len());
        assert_eq!(ErrorKind::Lexical { line: 1 }, *errors[0].kind());
    }

    #[test]
    fn unexpected_characters_are_reported_and_skipped() {
        let (tokens, errors) = scan("1 @\n# 2");
        assert_eq!(vec![Number, Number, EndOfFile], kinds(&tokens));
        assert_eq!(2, errors.len());
        assert_eq!("[line 1] Error: Unexpected character '@'.", errors[0].to_string());
        assert_eq!(2, errors[1].line());
    }

    #[test]
    fn iterator_stops_after_end_of_file() {
        let mut errors = Vec::new();
        let mut scanner = Scanner::new("1", &mut errors);
        assert_eq!(Some(Number), scanner.next().map(|t| t.kind));
        assert_eq!(Some(EndOfFile), scanner.next().map(|t| t.kind));
        assert_eq!(None, scanner.next());
    }
}
