use crate::error::Span;

/// A parsed expression. Every node owns its children outright, so
/// `clone` is the deep copy used when evaluation needs a fresh tree.
#[derive(Debug, Clone)]
pub enum Expr {
    /// `(val N)`
    Val {
        value: i64,
        span: Span,
    },
    /// `(var ID)`
    Var {
        name: String,
        span: Span,
    },
    /// `(add A B)`
    Add {
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// `(if A B then T else E)`, taking `then_branch` when `A > B`.
    /// Renders without the `then`/`else` markers: `(if A B T E)`.
    If {
        left: Box<Expr>,
        right: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
        span: Span,
    },
    /// `(let ID = A in B)`
    Let {
        name: String,
        value: Box<Expr>,
        body: Box<Expr>,
        span: Span,
    },
    /// `(function ID = BODY)`
    Function {
        param: String,
        body: Box<Expr>,
        span: Span,
    },
    /// `(call F ARG)`
    Call {
        callee: Box<Expr>,
        argument: Box<Expr>,
        span: Span,
    },
    /// `(set ID A)`
    Set {
        name: String,
        value: Box<Expr>,
        span: Span,
    },
    /// `(block E1 E2 ... )`, never empty once parsed.
    Block {
        exprs: Vec<Expr>,
        span: Span,
    },
    /// `(arr E1 E2 ... )`
    Arr {
        elements: Vec<Expr>,
        span: Span,
    },
    /// `(gen LEN FUNC)`
    Gen {
        length: Box<Expr>,
        function: Box<Expr>,
        span: Span,
    },
    /// `(at ARR IDX)`
    At {
        array: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> &Span {
        match self {
            Expr::Val { span, .. } => span,
            Expr::Var { span, .. } => span,
            Expr::Add { span, .. } => span,
            Expr::If { span, .. } => span,
            Expr::Let { span, .. } => span,
            Expr::Function { span, .. } => span,
            Expr::Call { span, .. } => span,
            Expr::Set { span, .. } => span,
            Expr::Block { span, .. } => span,
            Expr::Arr { span, .. } => span,
            Expr::Gen { span, .. } => span,
            Expr::At { span, .. } => span,
        }
    }

    /// The keyword that opens this form.
    pub fn keyword(&self) -> &'static str {
        match self {
            Expr::Val { .. } => "val",
            Expr::Var { .. } => "var",
            Expr::Add { .. } => "add",
            Expr::If { .. } => "if",
            Expr::Let { .. } => "let",
            Expr::Function { .. } => "function",
            Expr::Call { .. } => "call",
            Expr::Set { .. } => "set",
            Expr::Block { .. } => "block",
            Expr::Arr { .. } => "arr",
            Expr::Gen { .. } => "gen",
            Expr::At { .. } => "at",
        }
    }
}
