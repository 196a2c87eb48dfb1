use crate::ast::Expr;
use std::fmt;

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Val { value, .. } => write!(f, "(val {})", value),
            Expr::Var { name, .. } => write!(f, "(var {})", name),
            Expr::Add { left, right, .. } => write!(f, "(add {} {})", left, right),
            Expr::If {
                left,
                right,
                then_branch,
                else_branch,
                ..
            } => write!(f, "(if {} {} {} {})", left, right, then_branch, else_branch),
            Expr::Let {
                name, value, body, ..
            } => write!(f, "(let {} = {} in {})", name, value, body),
            Expr::Function { param, body, .. } => write!(f, "(function {} = {})", param, body),
            Expr::Call {
                callee, argument, ..
            } => write!(f, "(call {} {})", callee, argument),
            Expr::Set { name, value, .. } => write!(f, "(set {} {})", name, value),
            Expr::Block { exprs, .. } => write_list(f, "block", exprs),
            Expr::Arr { elements, .. } => write_list(f, "arr", elements),
            Expr::Gen {
                length, function, ..
            } => write!(f, "(gen {} {})", length, function),
            Expr::At { array, index, .. } => write!(f, "(at {} {})", array, index),
        }
    }
}

// Variadic forms put a space after every element, so `(arr )` is the empty array.
fn write_list(f: &mut fmt::Formatter<'_>, keyword: &str, items: &[Expr]) -> fmt::Result {
    write!(f, "({} ", keyword)?;
    for item in items {
        write!(f, "{} ", item)?;
    }
    write!(f, ")")
}

/// Canonical text of an expression or a value.
pub fn render<T: fmt::Display + ?Sized>(node: &T) -> String {
    node.to_string()
}
