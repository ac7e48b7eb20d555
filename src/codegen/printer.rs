//! Expression pretty-printer.
//!
//! Emits a human-readable text rendering of an expression tree for
//! diagnostics and debug logs. Output is deterministic: children are printed
//! in operand order, and anonymous variables are numbered in order of first
//! appearance.

use std::collections::HashMap;
use std::fmt::Write;

use crate::error::CodegenError;
use crate::ir::expr::Expr;
use crate::ir::node::{BinaryOp, Block, Cast, FloatImm, For, IntImm, Variable};
use crate::ir::visitor::IrVisitor;

/// Emits a text dump of the tree rooted at `expr`.
pub fn emit_expr_text(expr: &Expr) -> Result<String, CodegenError> {
    let mut printer = ExprPrinter::default();
    expr.accept(&mut printer)?;
    Ok(printer.out)
}

#[derive(Default)]
struct ExprPrinter {
    out: String,
    indent: usize,
    anonymous: HashMap<Expr, usize>,
}

impl ExprPrinter {
    fn newline(&mut self) -> Result<(), CodegenError> {
        writeln!(self.out)?;
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
        Ok(())
    }
}

impl IrVisitor for ExprPrinter {
    type Output = Result<(), CodegenError>;

    fn visit_int_imm(&mut self, _: &Expr, imm: &IntImm) -> Self::Output {
        write!(self.out, "{}", imm.value())?;
        Ok(())
    }

    fn visit_float_imm(&mut self, _: &Expr, imm: &FloatImm) -> Self::Output {
        // Debug keeps the fractional part: 2.0 rather than 2.
        write!(self.out, "{:?}", imm.value())?;
        Ok(())
    }

    fn visit_variable(&mut self, expr: &Expr, var: &Variable) -> Self::Output {
        if !var.name_hint().is_empty() {
            write!(self.out, "%{}", var.name_hint())?;
            return Ok(());
        }
        let next = self.anonymous.len();
        let n = *self.anonymous.entry(expr.clone()).or_insert(next);
        write!(self.out, "%v{}", n)?;
        Ok(())
    }

    fn visit_cast(&mut self, expr: &Expr, cast: &Cast) -> Self::Output {
        write!(self.out, "cast<{}>(", expr.dtype())?;
        cast.src_value().accept(self)?;
        self.out.push(')');
        Ok(())
    }

    fn visit_binary(&mut self, _: &Expr, bin: &BinaryOp) -> Self::Output {
        self.out.push('(');
        bin.lhs().accept(self)?;
        write!(self.out, " {} ", bin.op().symbol())?;
        bin.rhs().accept(self)?;
        self.out.push(')');
        Ok(())
    }

    fn visit_block(&mut self, _: &Expr, block: &Block) -> Self::Output {
        if block.nexprs() == 0 {
            self.out.push_str("{}");
            return Ok(());
        }
        self.out.push('{');
        self.indent += 1;
        for e in block.exprs() {
            self.newline()?;
            e.accept(self)?;
            self.out.push(';');
        }
        self.indent -= 1;
        self.newline()?;
        self.out.push('}');
        Ok(())
    }

    fn visit_for(&mut self, _: &Expr, for_: &For) -> Self::Output {
        self.out.push_str("for ");
        for_.var().accept(self)?;
        self.out.push_str(" in ");
        for_.start().accept(self)?;
        self.out.push_str("..");
        for_.stop().accept(self)?;
        self.out.push(' ');
        for_.body().accept(self)
    }

    fn visit_empty(&mut self, _: &Expr) -> Self::Output {
        self.out.push_str("<empty>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::node::{Add, Div, Empty, Sub};
    use crate::ir::types::Dtype;

    #[test]
    fn test_emit_promoted_add() {
        let e = Add::make(&IntImm::make(3), &FloatImm::make(2.0)).unwrap();
        assert_eq!(emit_expr_text(&e).unwrap(), "(cast<f32>(3) + 2.0)");
    }

    #[test]
    fn test_emit_nested_ops() {
        let x = Variable::make("x", Dtype::INT32);
        let y = Variable::make("y", Dtype::INT32);
        let e = Div::make(&Sub::make(&x, &y).unwrap(), &IntImm::make(2)).unwrap();
        assert_eq!(e.to_string(), "((%x - %y) / 2)");
    }

    #[test]
    fn test_anonymous_variables_are_numbered() {
        let a = Variable::make_anonymous(Dtype::INT32);
        let b = Variable::make_anonymous(Dtype::INT32);
        let e = Add::make(&Add::make(&a, &b).unwrap(), &a).unwrap();
        assert_eq!(e.to_string(), "((%v0 + %v1) + %v0)");
    }

    #[test]
    fn test_emit_loop() {
        let i = Variable::make("i", Dtype::INT32);
        let body = Block::make(vec![Add::make(&i, &IntImm::make(1)).unwrap(), Empty::make()]);
        let lp = For::make(&i, &IntImm::make(0), &IntImm::make(10), &body).unwrap();
        let text = emit_expr_text(&lp).unwrap();
        assert_eq!(text, "for %i in 0..10 {\n  (%i + 1);\n  <empty>;\n}");
    }

    #[test]
    fn test_emit_empty_block() {
        assert_eq!(Block::make(Vec::new()).to_string(), "{}");
    }
}
