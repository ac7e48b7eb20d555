use thiserror::Error;

use crate::ir::types::{Dtype, ScalarKind};

/// Top-level error type for the fuser IR.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{}", format_error_pretty("ir error", &format!("{}", _0)))]
    Ir(#[from] IrError),

    #[error("{}", format_error_pretty("codegen error", &format!("{}", _0)))]
    Codegen(#[from] CodegenError),
}

/// Formats an error with its category prefix.
fn format_error_pretty(category: &str, msg: &str) -> String {
    format!("[{}] {}", category, msg)
}

// ---------------------------------------------------------------------------
// IR construction errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IrError {
    #[error("lane mismatch: cannot combine '{lhs}' with '{rhs}', both operands must have the same number of lanes")]
    LaneMismatch { lhs: Dtype, rhs: Dtype },

    #[error("no promotion rule for '{lhs}' and '{rhs}'")]
    UnsupportedPromotion { lhs: Dtype, rhs: Dtype },

    #[error("index out of range: tried to access expression {index} but the block only has {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("loop variable must be a variable node, found {found}")]
    NotAVariable { found: String },

    #[error("a '{kind}' dtype needs at least one lane")]
    ZeroLanes { kind: ScalarKind },
}

// ---------------------------------------------------------------------------
// Codegen errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("failed to format expression text: {detail}")]
    Format { detail: String },
}

impl From<std::fmt::Error> for CodegenError {
    fn from(e: std::fmt::Error) -> Self {
        CodegenError::Format {
            detail: e.to_string(),
        }
    }
}

impl Error {
    /// Returns a stable diagnostic code string for this error.
    pub fn diagnostic_code(&self) -> &'static str {
        match self {
            Error::Ir(e) => match e {
                IrError::LaneMismatch { .. } => "E0100",
                IrError::UnsupportedPromotion { .. } => "E0101",
                IrError::IndexOutOfRange { .. } => "E0102",
                IrError::NotAVariable { .. } => "E0103",
                IrError::ZeroLanes { .. } => "E0104",
            },
            Error::Codegen(_) => "E0300",
        }
    }
}
