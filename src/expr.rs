use std::fmt::Display;
use crate::token::Token;

macro_rules! generate_ast {
    ($($typename:ident / $ctor:ident => $($propname:ident: $proptype:ty),+);+) => {
        #[derive(Debug, PartialEq, Clone)]
        pub enum Expr {
            $($typename($typename)),+
        }

        $(
            #[derive(Debug, PartialEq, Clone)]
            pub struct $typename {
                $(pub $propname: $proptype),+
            }
        )+

        impl Expr {
            $(
                pub fn $ctor($($propname: $proptype),+) -> Expr {
                    Expr::$typename($typename { $($propname),+ })
                }
            )+
        }
    }
}

generate_ast!(
    Binary   / new_binary   => left: Box<Expr>, op: Token, right: Box<Expr>;
    Grouping / new_grouping => expression: Box<Expr>;
    Literal  / new_literal  => value: LoxLiteral;
    Unary    / new_unary    => op: Token, right: Box<Expr>
);

/// A literal value, either carried by a `Number`/`String` token or held
/// by an `Expr::Literal` leaf.
#[derive(Debug, PartialEq, Clone)]
pub enum LoxLiteral {
    Bool(bool),
    Nil,
    Number(f64),
    String(String),
}

impl From<bool> for LoxLiteral {
    fn from(b: bool) -> Self {
        LoxLiteral::Bool(b)
    }
}

impl From<f64> for LoxLiteral {
    fn from(n: f64) -> Self {
        LoxLiteral::Number(n)
    }
}

impl From<String> for LoxLiteral {
    fn from(s: String) -> Self {
        LoxLiteral::String(s)
    }
}

impl From<&str> for LoxLiteral {
    fn from(s: &str) -> Self {
        LoxLiteral::String(s.to_string())
    }
}

impl Display for LoxLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use LoxLiteral::*;
        match self {
            Bool(b) => write!(f, "{}", b),
            Nil => write!(f, "nil"),
            Number(n) => write!(f, "{}", n),
            String(s) => write!(f, "{}", s),
        }
    }
}
