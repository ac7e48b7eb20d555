//! Double-dispatch visitation for passes that consume the IR.

use crate::ir::expr::Expr;
use crate::ir::node::{BinaryOp, Block, Cast, FloatImm, For, IntImm, Variable};

/// One method per node variant. `Expr::accept` picks the method; the
/// visitor decides whether and how to recurse into children.
///
/// Each method receives both the handle and the variant payload, so a pass
/// can keep the handle (for identity) without re-matching on the kind.
pub trait IrVisitor {
    type Output;

    fn visit_int_imm(&mut self, expr: &Expr, imm: &IntImm) -> Self::Output;
    fn visit_float_imm(&mut self, expr: &Expr, imm: &FloatImm) -> Self::Output;
    fn visit_variable(&mut self, expr: &Expr, var: &Variable) -> Self::Output;
    fn visit_cast(&mut self, expr: &Expr, cast: &Cast) -> Self::Output;
    fn visit_binary(&mut self, expr: &Expr, bin: &BinaryOp) -> Self::Output;
    fn visit_block(&mut self, expr: &Expr, block: &Block) -> Self::Output;
    fn visit_for(&mut self, expr: &Expr, for_: &For) -> Self::Output;
    fn visit_empty(&mut self, expr: &Expr) -> Self::Output;
}

/// Calls `f` on `root` and every descendant in pre-order.
///
/// A subtree reachable through several parents is visited once per path.
pub fn walk(root: &Expr, f: &mut impl FnMut(&Expr)) {
    f(root);
    for child in root.operands() {
        walk(child, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::node::{Add, Empty, Mul};
    use crate::ir::types::Dtype;

    /// Counts nodes per variant.
    #[derive(Default)]
    struct Census {
        imms: usize,
        vars: usize,
        casts: usize,
        binaries: usize,
        structural: usize,
    }

    impl IrVisitor for Census {
        type Output = ();

        fn visit_int_imm(&mut self, _: &Expr, _: &IntImm) {
            self.imms += 1;
        }
        fn visit_float_imm(&mut self, _: &Expr, _: &FloatImm) {
            self.imms += 1;
        }
        fn visit_variable(&mut self, _: &Expr, _: &Variable) {
            self.vars += 1;
        }
        fn visit_cast(&mut self, _: &Expr, cast: &Cast) {
            self.casts += 1;
            cast.src_value().accept(self);
        }
        fn visit_binary(&mut self, _: &Expr, bin: &BinaryOp) {
            self.binaries += 1;
            bin.lhs().accept(self);
            bin.rhs().accept(self);
        }
        fn visit_block(&mut self, _: &Expr, block: &Block) {
            self.structural += 1;
            for e in block.exprs() {
                e.accept(self);
            }
        }
        fn visit_for(&mut self, _: &Expr, for_: &For) {
            self.structural += 1;
            for_.var().accept(self);
            for_.start().accept(self);
            for_.stop().accept(self);
            for_.body().accept(self);
        }
        fn visit_empty(&mut self, _: &Expr) {
            self.structural += 1;
        }
    }

    fn sample() -> Expr {
        let i = Variable::make("i", Dtype::INT32);
        let scaled = Mul::make(&i, &FloatImm::make(0.5)).unwrap();
        let shifted = Add::make(&scaled, &IntImm::make(1)).unwrap();
        let body = Block::make(vec![shifted, Empty::make()]);
        For::make(&i, &IntImm::make(0), &IntImm::make(8), &body).unwrap()
    }

    #[test]
    fn test_accept_dispatches_every_variant() {
        let mut census = Census::default();
        sample().accept(&mut census);
        // i is visited as the loop var and again inside the body.
        assert_eq!(census.vars, 2);
        assert_eq!(census.imms, 4);
        assert_eq!(census.casts, 2);
        assert_eq!(census.binaries, 2);
        assert_eq!(census.structural, 3);
    }

    #[test]
    fn test_walk_matches_visitor_count() {
        let mut total = 0;
        walk(&sample(), &mut |_| total += 1);
        let mut census = Census::default();
        sample().accept(&mut census);
        let expected =
            census.vars + census.imms + census.casts + census.binaries + census.structural;
        assert_eq!(total, expected);
    }

    #[test]
    fn test_visitor_output_type() {
        struct DtypeOf;
        impl IrVisitor for DtypeOf {
            type Output = Dtype;
            fn visit_int_imm(&mut self, e: &Expr, _: &IntImm) -> Dtype {
                e.dtype()
            }
            fn visit_float_imm(&mut self, e: &Expr, _: &FloatImm) -> Dtype {
                e.dtype()
            }
            fn visit_variable(&mut self, e: &Expr, _: &Variable) -> Dtype {
                e.dtype()
            }
            fn visit_cast(&mut self, e: &Expr, _: &Cast) -> Dtype {
                e.dtype()
            }
            fn visit_binary(&mut self, e: &Expr, _: &BinaryOp) -> Dtype {
                e.dtype()
            }
            fn visit_block(&mut self, e: &Expr, _: &Block) -> Dtype {
                e.dtype()
            }
            fn visit_for(&mut self, e: &Expr, _: &For) -> Dtype {
                e.dtype()
            }
            fn visit_empty(&mut self, e: &Expr) -> Dtype {
                e.dtype()
            }
        }
        assert_eq!(IntImm::make(2).accept(&mut DtypeOf), Dtype::INT32);
        assert_eq!(sample().accept(&mut DtypeOf), Dtype::NONE);
    }
}
