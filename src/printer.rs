use crate::expr::{Expr, LoxLiteral};

/// Renders an expression as a fully parenthesised prefix form, e.g.
/// `(* (- 123) (group 45.67))`.
pub fn print(e: &Expr) -> String {
    let mut s = String::new();
    write_expr(&mut s, e);
    s
}

fn write_expr(s: &mut String, e: &Expr) {
    match e {
        Expr::Binary(b) => parenthesize(s, &b.op.lexeme, &[b.left.as_ref(), b.right.as_ref()]),
        Expr::Grouping(g) => parenthesize(s, "group", &[g.expression.as_ref()]),
        Expr::Literal(l) => match &l.value {
            LoxLiteral::Bool(b) => s.push_str(&b.to_string()),
            LoxLiteral::Nil => s.push_str("nil"),
            LoxLiteral::Number(n) => s.push_str(&n.to_string()),
            LoxLiteral::String(v) => s.push_str(v),
        },
        Expr::Unary(u) => parenthesize(s, &u.op.lexeme, &[u.right.as_ref()]),
    }
}

fn parenthesize(s: &mut String, name: &str, exprs: &[&Expr]) {
    s.push('(');
    s.push_str(name);

    for e in exprs.iter() {
        s.push(' ');
        write_expr(s, e);
    }

    s.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Token, TokenKind};

    #[test]
    fn string_literal() {
        let e = Expr::new_literal(LoxLiteral::String("yes".into()));
        assert_eq!("yes", print(&e));
    }

    #[test]
    fn grouped_number() {
        let e = Expr::new_grouping(Box::new(Expr::new_literal(531.9.into())));
        assert_eq!("(group 531.9)", print(&e));
    }

    #[test]
    fn keyword_literals() {
        assert_eq!("nil", print(&Expr::new_literal(LoxLiteral::Nil)));
        assert_eq!("false", print(&Expr::new_literal(false.into())));
    }

    #[test]
    fn binary_expression_with_unary_and_grouping_sub_exprs() {
        let e = Expr::new_binary(
            Box::new(Expr::new_unary(
                Token::new(TokenKind::Minus, "-", None, 1),
                Box::new(Expr::new_literal(123.0.into())),
            )),
            Token::new(TokenKind::Star, "*", None, 1),
            Box::new(Expr::new_grouping(Box::new(Expr::new_literal(45.67.into())))),
        );
        assert_eq!("(* (- 123) (group 45.67))", print(&e));
    }
}
