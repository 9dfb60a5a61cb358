//! AST for Thyme v0

#[derive(Debug, Clone)]
pub enum Expr {
    /// Numeric literal, source text kept verbatim for re-emission.
    Num(String),
    Var(String),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
}

#[derive(Debug, Clone, Copy)]
pub enum UnaryOp { Plus, Minus }

#[derive(Debug, Clone, Copy)]
pub enum BinOp { Add, Sub, Mul, Div }

#[derive(Debug, Clone, Copy)]
pub enum CmpOp { Eq, Ne, Lt, Le, Gt, Ge }

/// Condition of an IF or WHILE. `rest` is never empty: the grammar requires
/// at least one comparator.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub lhs: Expr,
    pub rest: Vec<(CmpOp, Expr)>,
}

#[derive(Debug, Clone)]
pub enum PrintArg {
    Text(String),
    Expr(Expr),
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Print(PrintArg),
    If { cond: Comparison, body: Vec<Stmt> },
    While { cond: Comparison, body: Vec<Stmt> },
    Label(String),
    Goto(String),
    Let { name: String, init: Expr },
    Input { name: String },
    /// Source line marker, interleaved before each statement.
    Line(u32),
}

pub type Program = Vec<Stmt>;
