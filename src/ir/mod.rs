pub mod expr;
pub mod node;
pub mod types;
pub mod visitor;

pub use expr::{Expr, ExprKind};
pub use node::{
    cast, Add, BinOp, BinaryOp, Block, Cast, Div, Empty, FloatImm, For, IntImm, Mul, Sub,
    Variable,
};
pub use types::{promote, Dtype, ScalarElement, ScalarKind};
pub use visitor::{walk, IrVisitor};
