//! Formats syntax trees back to Lox source.
//!
//! The output reflects the tree exactly: `Grouping` nodes print their
//! parentheses and nothing else invents any, so parsing the printed form of a
//! parsed program reproduces a structurally equal tree. The REPL uses this to
//! echo what it understood before running it.

use crate::ast::{Expr, Literal, Program, Stmt};

pub fn format_program(program: &Program) -> String {
    let mut out = String::new();
    for statement in &program.statements {
        format_statement(&mut out, statement, 0);
        out.push('\n');
    }
    out
}

/// Emits `statement` at the current position; nested lines indent to `level`.
fn format_statement(out: &mut String, statement: &Stmt, level: usize) {
    match statement {
        Stmt::Expr(expr) => {
            out.push_str(&format_expression(expr));
            out.push(';');
        }
        Stmt::Print(expr) => {
            out.push_str("print ");
            out.push_str(&format_expression(expr));
            out.push(';');
        }
        Stmt::VarDecl { name, init } => {
            out.push_str("var ");
            out.push_str(name);
            if let Some(init) = init {
                out.push_str(" = ");
                out.push_str(&format_expression(init));
            }
            out.push(';');
        }
        Stmt::Assignment { name, value } => {
            out.push_str(name);
            out.push_str(" = ");
            out.push_str(&format_expression(value));
            out.push(';');
        }
        Stmt::Block(statements) => {
            out.push_str("{\n");
            for statement in statements {
                indent(out, level + 1);
                format_statement(out, statement, level + 1);
                out.push('\n');
            }
            indent(out, level);
            out.push('}');
        }
        Stmt::If { condition, then_branch, else_branch } => {
            out.push_str("if (");
            out.push_str(&format_expression(condition));
            out.push_str(") ");
            format_statement(out, then_branch, level);
            if let Some(else_branch) = else_branch {
                out.push_str(" else ");
                format_statement(out, else_branch, level);
            }
        }
        Stmt::While { condition, body } => {
            out.push_str("while (");
            out.push_str(&format_expression(condition));
            out.push_str(") ");
            format_statement(out, body, level);
        }
    }
}

pub fn format_expression(expr: &Expr) -> String {
    match expr {
        Expr::Literal(literal) => format_literal(literal),
        Expr::Grouping(inner) => format!("({})", format_expression(inner)),
        Expr::Identifier(name) => name.clone(),
        Expr::Unary { op, right } => format!("{}{}", op, format_expression(right)),
        Expr::Binary { left, op, right } => format!(
            "{} {} {}",
            format_expression(left),
            op,
            format_expression(right)
        ),
        Expr::Logical { left, op, right } => format!(
            "{} {} {}",
            format_expression(left),
            op,
            format_expression(right)
        ),
        Expr::Call { callee, args } => {
            let args = args
                .iter()
                .map(format_expression)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}({})", format_expression(callee), args)
        }
    }
}

fn format_literal(literal: &Literal) -> String {
    match literal {
        Literal::Nil => "nil".to_owned(),
        Literal::Bool(b) => b.to_string(),
        Literal::Number(n) => n.to_string(),
        Literal::String(s) => format!("\"{}\"", s),
    }
}

fn indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("    ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn parse(source: &str) -> Program {
        let tokens = Lexer::new(source).tokenize().expect("lexes cleanly");
        Parser::new(tokens).parse().expect("parses cleanly")
    }

    #[test]
    fn test_print_then_reparse_is_structurally_equal() {
        let sources = [
            "print 11 + 45 * 2 / (3 - 1);",
            "var a = 1; { var a = 2; print a; } print a;",
            "if (1 == 1) print \"yes\"; else print \"no\";",
            "while (x < 3) { x = x + 1; }",
            "for (var i = 0; i < 3; i = i + 1) print i;",
            "f(a)(b, c);",
            "print -x == !y;",
            "print true and (false or nil);",
            "var s = \"quoted text\";",
        ];

        for source in sources {
            let first = parse(source);
            let printed = format_program(&first);
            let second = parse(&printed);
            assert_eq!(first, second, "round trip changed the tree for: {}", source);
        }
    }

    #[test]
    fn test_block_layout() {
        let program = parse("if (true) { print 1; }");
        assert_eq!(format_program(&program), "if (true) {\n    print 1;\n}\n");
    }

    #[test]
    fn test_grouping_prints_its_parentheses() {
        let program = parse("print (1 + 2) * 3;");
        assert_eq!(format_program(&program), "print (1 + 2) * 3;\n");
    }

    #[test]
    fn test_var_without_init() {
        let program = parse("var x;");
        assert_eq!(format_program(&program), "var x;\n");
    }
}
