use crate::ast::Expr;
use std::fmt;

/// The result of evaluating an expression.
///
/// Values print with the same grammar as the source they came from, so a
/// printed result can be fed back in as a program.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    /// A function carries only its parameter and body; it closes over nothing.
    Function {
        param: String,
        body: Box<Expr>,
    },
    Array(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Function { .. } => "function",
            Value::Array(_) => "array",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "(val {})", n),
            Value::Function { param, body } => write!(f, "(function {} = {})", param, body),
            Value::Array(items) => {
                write!(f, "(arr ")?;
                for item in items {
                    write!(f, "{} ", item)?;
                }
                write!(f, ")")
            }
        }
    }
}
