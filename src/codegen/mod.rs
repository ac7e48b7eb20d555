pub mod printer;

pub use printer::emit_expr_text;
