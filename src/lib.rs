//! fuser-ir: a typed expression IR for a scalar/vector arithmetic fuser.
//!
//! Expressions are built bottom-up through factory functions and shared by
//! cheap, reference-counted handles:
//!
//! ```text
//! IntImm / FloatImm / Variable → Cast / BinaryOp (promote + implicit cast)
//!   → Block / For → consumed by IrVisitor passes
//! ```
//!
//! Every binary node's operands carry the node's own dtype. The promotion
//! table that decides that dtype lives in `ir::types::promote`.

pub mod codegen;
pub mod error;
pub mod ir;

pub use error::{CodegenError, Error, IrError};
pub use ir::{Dtype, Expr, ExprKind, ScalarKind};
