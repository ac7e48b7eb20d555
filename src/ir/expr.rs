//! The shared expression handle and the closed node taxonomy.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::ir::node::{BinaryOp, Block, Cast, FloatImm, For, IntImm, Variable};
use crate::ir::types::Dtype;
use crate::ir::visitor::IrVisitor;

/// One node shape per variant. Structural nodes (`Block`, `For`, `Empty`)
/// are typed `Dtype::NONE`.
#[derive(Debug)]
pub enum ExprKind {
    IntImm(IntImm),
    FloatImm(FloatImm),
    Variable(Variable),
    Cast(Cast),
    Binary(BinaryOp),
    Block(Block),
    For(For),
    Empty,
}

impl ExprKind {
    /// Short description used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::IntImm(_) => "int immediate",
            ExprKind::FloatImm(_) => "float immediate",
            ExprKind::Variable(_) => "variable",
            ExprKind::Cast(_) => "cast",
            ExprKind::Binary(_) => "binary op",
            ExprKind::Block(_) => "block",
            ExprKind::For(_) => "for loop",
            ExprKind::Empty => "empty expression",
        }
    }
}

/// A heap-allocated IR node. Never mutated after construction.
#[derive(Debug)]
pub struct ExprNode {
    dtype: Dtype,
    kind: ExprKind,
}

/// Shared, immutable handle to an `ExprNode`.
///
/// Cloning is O(1). Equality and hashing are by node identity, so two
/// structurally identical nodes built by separate factory calls compare
/// unequal. Children are always built before their parents, which rules out
/// cycles and lets plain reference counting reclaim every subtree.
#[derive(Clone)]
pub struct Expr(Arc<ExprNode>);

impl Expr {
    pub(crate) fn new(dtype: Dtype, kind: ExprKind) -> Self {
        Expr(Arc::new(ExprNode { dtype, kind }))
    }

    pub fn dtype(&self) -> Dtype {
        self.0.dtype
    }

    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    /// True if both handles refer to the same node.
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live handles to this node.
    pub fn share_count(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    /// Dispatches to the visitor method for this node's variant.
    pub fn accept<V: IrVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self.kind() {
            ExprKind::IntImm(imm) => visitor.visit_int_imm(self, imm),
            ExprKind::FloatImm(imm) => visitor.visit_float_imm(self, imm),
            ExprKind::Variable(var) => visitor.visit_variable(self, var),
            ExprKind::Cast(cast) => visitor.visit_cast(self, cast),
            ExprKind::Binary(bin) => visitor.visit_binary(self, bin),
            ExprKind::Block(block) => visitor.visit_block(self, block),
            ExprKind::For(for_) => visitor.visit_for(self, for_),
            ExprKind::Empty => visitor.visit_empty(self),
        }
    }

    /// Direct children in declaration order.
    pub fn operands(&self) -> Vec<&Expr> {
        match self.kind() {
            ExprKind::IntImm(_)
            | ExprKind::FloatImm(_)
            | ExprKind::Variable(_)
            | ExprKind::Empty => Vec::new(),
            ExprKind::Cast(cast) => vec![cast.src_value()],
            ExprKind::Binary(bin) => vec![bin.lhs(), bin.rhs()],
            ExprKind::Block(block) => block.exprs().iter().collect(),
            ExprKind::For(for_) => vec![for_.var(), for_.start(), for_.stop(), for_.body()],
        }
    }

    pub fn as_int_imm(&self) -> Option<&IntImm> {
        match self.kind() {
            ExprKind::IntImm(imm) => Some(imm),
            _ => None,
        }
    }

    pub fn as_float_imm(&self) -> Option<&FloatImm> {
        match self.kind() {
            ExprKind::FloatImm(imm) => Some(imm),
            _ => None,
        }
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self.kind() {
            ExprKind::Variable(var) => Some(var),
            _ => None,
        }
    }

    pub fn as_cast(&self) -> Option<&Cast> {
        match self.kind() {
            ExprKind::Cast(cast) => Some(cast),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&BinaryOp> {
        match self.kind() {
            ExprKind::Binary(bin) => Some(bin),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self.kind() {
            ExprKind::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_for(&self) -> Option<&For> {
        match self.kind() {
            ExprKind::For(for_) => Some(for_),
            _ => None,
        }
    }

    pub fn is_empty_expr(&self) -> bool {
        matches!(self.kind(), ExprKind::Empty)
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        Expr::ptr_eq(self, other)
    }
}

impl Eq for Expr {}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.0), state)
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expr")
            .field("dtype", &self.0.dtype)
            .field("kind", &self.0.kind)
            .finish()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::codegen::printer::emit_expr_text(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
