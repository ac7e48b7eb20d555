//! Concrete node payloads and their factory functions.
//!
//! Every factory returns a fresh `Expr`. Binary operators run the promotion
//! table at construction so that both operands always carry the node's dtype.

use crate::error::IrError;
use crate::ir::expr::{Expr, ExprKind};
use crate::ir::types::{promote, Dtype, ScalarElement, ScalarKind};

// ---------------------------------------------------------------------------
// Immediates
// ---------------------------------------------------------------------------

/// 32-bit signed integer constant. Always `i32`, one lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntImm {
    value: i32,
}

impl IntImm {
    pub fn make(value: i32) -> Expr {
        Expr::new(Dtype::INT32, ExprKind::IntImm(IntImm { value }))
    }

    pub fn value(&self) -> i32 {
        self.value
    }
}

/// 32-bit float constant. Always `f32`, one lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatImm {
    value: f32,
}

impl FloatImm {
    pub fn make(value: f32) -> Expr {
        Expr::new(Dtype::FLOAT32, ExprKind::FloatImm(FloatImm { value }))
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

// ---------------------------------------------------------------------------
// Variable
// ---------------------------------------------------------------------------

/// A named value. Each `make` call yields a distinct variable; the name is
/// only a hint for diagnostics and codegen.
#[derive(Debug, Clone)]
pub struct Variable {
    name_hint: String,
}

impl Variable {
    pub fn make(name_hint: impl Into<String>, dtype: Dtype) -> Expr {
        Expr::new(
            dtype,
            ExprKind::Variable(Variable {
                name_hint: name_hint.into(),
            }),
        )
    }

    /// A variable with an empty name hint.
    pub fn make_anonymous(dtype: Dtype) -> Expr {
        Self::make(String::new(), dtype)
    }

    pub fn name_hint(&self) -> &str {
        &self.name_hint
    }
}

// ---------------------------------------------------------------------------
// Cast
// ---------------------------------------------------------------------------

/// Conversion of `src_value` to the node's dtype.
#[derive(Debug, Clone)]
pub struct Cast {
    src_value: Expr,
}

impl Cast {
    /// Wraps `src_value` even when it already has dtype `dtype`.
    pub fn make(dtype: Dtype, src_value: &Expr) -> Expr {
        Expr::new(
            dtype,
            ExprKind::Cast(Cast {
                src_value: src_value.clone(),
            }),
        )
    }

    pub fn src_value(&self) -> &Expr {
        &self.src_value
    }
}

/// Casts `src_value` to the element kind of host type `T`, keeping its lanes.
pub fn cast<T: ScalarElement>(src_value: &Expr) -> Expr {
    Cast::make(src_value.dtype().with_kind(T::KIND), src_value)
}

// ---------------------------------------------------------------------------
// Binary arithmetic
// ---------------------------------------------------------------------------

/// Binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BinOp::Add => "add",
            BinOp::Sub => "sub",
            BinOp::Mul => "mul",
            BinOp::Div => "div",
        };
        f.write_str(s)
    }
}

/// `lhs op rhs`.
///
/// Invariant: `lhs.dtype() == rhs.dtype() == ` the node's dtype.
#[derive(Debug, Clone)]
pub struct BinaryOp {
    op: BinOp,
    lhs: Expr,
    rhs: Expr,
}

impl BinaryOp {
    /// Builds `lhs op rhs`, promoting both sides to a common dtype.
    ///
    /// Operands whose dtype differs from the result are wrapped in a `Cast`;
    /// operands that already match are stored as-is. Fails with
    /// `IrError::UnsupportedPromotion` when the result would be typed `None`.
    pub fn make(op: BinOp, lhs: &Expr, rhs: &Expr) -> Result<Expr, IrError> {
        let dtype = promote(lhs.dtype(), rhs.dtype())?;
        // Structural operands promote to None, which is not an arithmetic type.
        if dtype.kind() == ScalarKind::None {
            return Err(IrError::UnsupportedPromotion {
                lhs: lhs.dtype(),
                rhs: rhs.dtype(),
            });
        }
        let lhs = cast_if_needed(lhs, dtype);
        let rhs = cast_if_needed(rhs, dtype);
        Ok(Expr::new(dtype, ExprKind::Binary(BinaryOp { op, lhs, rhs })))
    }

    pub fn op(&self) -> BinOp {
        self.op
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }
}

fn cast_if_needed(expr: &Expr, dtype: Dtype) -> Expr {
    if expr.dtype() == dtype {
        return expr.clone();
    }
    log::trace!("inserting implicit cast {} -> {}", expr.dtype(), dtype);
    Cast::make(dtype, expr)
}

/// `lhs + rhs`
pub struct Add;
/// `lhs - rhs`
pub struct Sub;
/// `lhs * rhs`
pub struct Mul;
/// `lhs / rhs`
pub struct Div;

impl Add {
    pub fn make(lhs: &Expr, rhs: &Expr) -> Result<Expr, IrError> {
        BinaryOp::make(BinOp::Add, lhs, rhs)
    }
}

impl Sub {
    pub fn make(lhs: &Expr, rhs: &Expr) -> Result<Expr, IrError> {
        BinaryOp::make(BinOp::Sub, lhs, rhs)
    }
}

impl Mul {
    pub fn make(lhs: &Expr, rhs: &Expr) -> Result<Expr, IrError> {
        BinaryOp::make(BinOp::Mul, lhs, rhs)
    }
}

impl Div {
    pub fn make(lhs: &Expr, rhs: &Expr) -> Result<Expr, IrError> {
        BinaryOp::make(BinOp::Div, lhs, rhs)
    }
}

// ---------------------------------------------------------------------------
// Structural containers
// ---------------------------------------------------------------------------

/// Ordered sequence of expressions. Evaluation order is left to consumers;
/// only insertion order is preserved.
#[derive(Debug, Clone)]
pub struct Block {
    exprs: Vec<Expr>,
}

impl Block {
    pub fn make(exprs: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::new(
            Dtype::NONE,
            ExprKind::Block(Block {
                exprs: exprs.into_iter().collect(),
            }),
        )
    }

    pub fn nexprs(&self) -> usize {
        self.exprs.len()
    }

    pub fn expr(&self, index: usize) -> Result<&Expr, IrError> {
        self.exprs.get(index).ok_or(IrError::IndexOutOfRange {
            index,
            len: self.exprs.len(),
        })
    }

    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }
}

/// `for var in start..stop { body }`. Not expression-valued.
#[derive(Debug, Clone)]
pub struct For {
    var: Expr,
    start: Expr,
    stop: Expr,
    body: Expr,
}

impl For {
    /// Fails with `IrError::NotAVariable` unless `var` is a `Variable` node.
    pub fn make(var: &Expr, start: &Expr, stop: &Expr, body: &Expr) -> Result<Expr, IrError> {
        if var.as_variable().is_none() {
            log::debug!("rejecting loop over {}", var.kind().name());
            return Err(IrError::NotAVariable {
                found: var.kind().name().to_string(),
            });
        }
        Ok(Expr::new(
            Dtype::NONE,
            ExprKind::For(For {
                var: var.clone(),
                start: start.clone(),
                stop: stop.clone(),
                body: body.clone(),
            }),
        ))
    }

    pub fn var(&self) -> &Expr {
        &self.var
    }

    pub fn start(&self) -> &Expr {
        &self.start
    }

    pub fn stop(&self) -> &Expr {
        &self.stop
    }

    pub fn body(&self) -> &Expr {
        &self.body
    }
}

/// Inert placeholder node.
pub struct Empty;

impl Empty {
    pub fn make() -> Expr {
        Expr::new(Dtype::NONE, ExprKind::Empty)
    }
}
