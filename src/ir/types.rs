//! Scalar type descriptors and the binary-op promotion table.

use std::fmt;

use crate::error::IrError;

/// Element kind of a scalar or vector value.
///
/// `None` is the type of structural nodes (blocks, loops) and has no
/// promotion rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    None,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl ScalarKind {
    /// Position in the promotion order. Higher rank wins.
    ///
    /// | kind    | rank |
    /// |---------|------|
    /// | Bool    | 0    |
    /// | Int8    | 1    |
    /// | Int16   | 2    |
    /// | Int32   | 3    |
    /// | Int64   | 4    |
    /// | Float32 | 5    |
    /// | Float64 | 6    |
    ///
    /// `None` is unranked and never takes part in promotion.
    pub fn rank(self) -> Option<u8> {
        match self {
            ScalarKind::None => None,
            ScalarKind::Bool => Some(0),
            ScalarKind::Int8 => Some(1),
            ScalarKind::Int16 => Some(2),
            ScalarKind::Int32 => Some(3),
            ScalarKind::Int64 => Some(4),
            ScalarKind::Float32 => Some(5),
            ScalarKind::Float64 => Some(6),
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScalarKind::None => "none",
            ScalarKind::Bool => "bool",
            ScalarKind::Int8 => "i8",
            ScalarKind::Int16 => "i16",
            ScalarKind::Int32 => "i32",
            ScalarKind::Int64 => "i64",
            ScalarKind::Float32 => "f32",
            ScalarKind::Float64 => "f64",
        };
        f.write_str(s)
    }
}

/// Scalar type descriptor: element kind plus vector width.
///
/// Invariant: `lanes >= 1`. Two descriptors are equal iff both fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dtype {
    kind: ScalarKind,
    lanes: u32,
}

impl Dtype {
    pub const NONE: Dtype = Dtype::scalar(ScalarKind::None);
    pub const BOOL: Dtype = Dtype::scalar(ScalarKind::Bool);
    pub const INT8: Dtype = Dtype::scalar(ScalarKind::Int8);
    pub const INT16: Dtype = Dtype::scalar(ScalarKind::Int16);
    pub const INT32: Dtype = Dtype::scalar(ScalarKind::Int32);
    pub const INT64: Dtype = Dtype::scalar(ScalarKind::Int64);
    pub const FLOAT32: Dtype = Dtype::scalar(ScalarKind::Float32);
    pub const FLOAT64: Dtype = Dtype::scalar(ScalarKind::Float64);

    /// Creates a descriptor with the given lane count.
    pub fn new(kind: ScalarKind, lanes: u32) -> Result<Self, IrError> {
        if lanes == 0 {
            return Err(IrError::ZeroLanes { kind });
        }
        Ok(Self { kind, lanes })
    }

    /// Single-lane descriptor.
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self { kind, lanes: 1 }
    }

    /// Same lane count, different element kind.
    pub fn with_kind(self, kind: ScalarKind) -> Self {
        Self { kind, ..self }
    }

    pub fn with_lanes(self, lanes: u32) -> Result<Self, IrError> {
        Self::new(self.kind, lanes)
    }

    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    pub fn lanes(&self) -> u32 {
        self.lanes
    }

    pub fn is_vector(&self) -> bool {
        self.lanes > 1
    }

    /// Descriptor for host scalar type `T`, single lane.
    pub fn of<T: ScalarElement>() -> Self {
        Self::scalar(T::KIND)
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.lanes == 1 {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}x{}", self.kind, self.lanes)
        }
    }
}

/// Result type of a binary operator applied to `a` and `b`.
///
/// Identical descriptors promote to themselves. Otherwise both sides must
/// have the same lane count and a ranked kind; the higher-ranked kind wins.
pub fn promote(a: Dtype, b: Dtype) -> Result<Dtype, IrError> {
    if a == b {
        return Ok(a);
    }
    if a.lanes != b.lanes {
        return Err(IrError::LaneMismatch { lhs: a, rhs: b });
    }
    match (a.kind.rank(), b.kind.rank()) {
        (Some(ra), Some(rb)) => Ok(if ra >= rb { a } else { b }),
        _ => Err(IrError::UnsupportedPromotion { lhs: a, rhs: b }),
    }
}

/// Host-level scalar types that have an IR element kind.
pub trait ScalarElement: Copy + 'static {
    const KIND: ScalarKind;
}

impl ScalarElement for bool {
    const KIND: ScalarKind = ScalarKind::Bool;
}

impl ScalarElement for i8 {
    const KIND: ScalarKind = ScalarKind::Int8;
}

impl ScalarElement for i16 {
    const KIND: ScalarKind = ScalarKind::Int16;
}

impl ScalarElement for i32 {
    const KIND: ScalarKind = ScalarKind::Int32;
}

impl ScalarElement for i64 {
    const KIND: ScalarKind = ScalarKind::Int64;
}

impl ScalarElement for f32 {
    const KIND: ScalarKind = ScalarKind::Float32;
}

impl ScalarElement for f64 {
    const KIND: ScalarKind = ScalarKind::Float64;
}
