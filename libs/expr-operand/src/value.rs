use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::convert::OperandValue;
use crate::error::OperandError;
use crate::hash::{f32_bits, f32_eq, f64_bits, f64_eq, operand_hash};
use crate::string::ExprString;

// ═══════════════════════════════════════════════════════════════
//  OperandKind
// ═══════════════════════════════════════════════════════════════

/// Discriminant of [`Operand`]. The `u8` value is fed into the operand hash;
/// it starts at 1 so that `Null` still moves the hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OperandKind {
    Null = 1,
    Int32 = 2,
    Int64 = 3,
    Bool = 4,
    Float = 5,
    Double = 6,
    String = 7,
    Int32Array = 8,
    Int64Array = 9,
    BoolArray = 10,
    FloatArray = 11,
    DoubleArray = 12,
    StringArray = 13,
}

impl OperandKind {
    pub const fn name(self) -> &'static str {
        match self {
            OperandKind::Null => "null",
            OperandKind::Int32 => "int32",
            OperandKind::Int64 => "int64",
            OperandKind::Bool => "bool",
            OperandKind::Float => "float",
            OperandKind::Double => "double",
            OperandKind::String => "string",
            OperandKind::Int32Array => "int32[]",
            OperandKind::Int64Array => "int64[]",
            OperandKind::BoolArray => "bool[]",
            OperandKind::FloatArray => "float[]",
            OperandKind::DoubleArray => "double[]",
            OperandKind::StringArray => "string[]",
        }
    }
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ═══════════════════════════════════════════════════════════════
//  Operand
// ═══════════════════════════════════════════════════════════════

/// Dynamically typed, immutable expression value.
///
/// Strategy by alternative:
/// - Scalars (Int32, Int64, Bool, Float, Double): inline, copied
/// - String: owned buffer, copied on clone
/// - Arrays: `Arc<[T]>`, clone shares the buffer (atomic refcount)
///
/// Equality is alternative-sensitive: `Int32(3) != Int64(3)`.
/// Floats compare with IEEE `==` except that NaN equals NaN, which keeps
/// `Eq` and `Hash` lawful.
#[derive(Debug, Clone, Default)]
pub enum Operand {
    #[default]
    Null,
    Int32(i32),
    Int64(i64),
    Bool(bool),
    Float(f32),
    Double(f64),
    String(ExprString),
    Int32Array(Arc<[i32]>),
    Int64Array(Arc<[i64]>),
    BoolArray(Arc<[bool]>),
    FloatArray(Arc<[f32]>),
    DoubleArray(Arc<[f64]>),
    StringArray(Arc<[String]>),
}

/// Null sentinel. `operand == Null` is true iff the operand is `Operand::Null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Null;

impl Operand {
    pub fn kind(&self) -> OperandKind {
        match self {
            Operand::Null => OperandKind::Null,
            Operand::Int32(_) => OperandKind::Int32,
            Operand::Int64(_) => OperandKind::Int64,
            Operand::Bool(_) => OperandKind::Bool,
            Operand::Float(_) => OperandKind::Float,
            Operand::Double(_) => OperandKind::Double,
            Operand::String(_) => OperandKind::String,
            Operand::Int32Array(_) => OperandKind::Int32Array,
            Operand::Int64Array(_) => OperandKind::Int64Array,
            Operand::BoolArray(_) => OperandKind::BoolArray,
            Operand::FloatArray(_) => OperandKind::FloatArray,
            Operand::DoubleArray(_) => OperandKind::DoubleArray,
            Operand::StringArray(_) => OperandKind::StringArray,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Null)
    }

    /// Typed extraction. Never coerces: asking for `i64` from an `Int32`
    /// operand is a `TypeMismatch`, as is asking anything of `Null`.
    ///
    /// Array alternatives extract as `Arc<[T]>` (shared handle) or `Vec<T>`
    /// (fresh copy), depending on the requested type.
    pub fn get<T: OperandValue>(&self) -> Result<T, OperandError> {
        T::from_operand(self)
    }

    /// Deterministic 64-bit hash, consistent with `==`.
    pub fn hash_code(&self) -> u64 {
        operand_hash(self)
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Operand::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Operand::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Operand::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Operand::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Operand::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Operand::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i32_array(&self) -> Option<&Arc<[i32]>> {
        match self {
            Operand::Int32Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64_array(&self) -> Option<&Arc<[i64]>> {
        match self {
            Operand::Int64Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool_array(&self) -> Option<&Arc<[bool]>> {
        match self {
            Operand::BoolArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32_array(&self) -> Option<&Arc<[f32]>> {
        match self {
            Operand::FloatArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64_array(&self) -> Option<&Arc<[f64]>> {
        match self {
            Operand::DoubleArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_string_array(&self) -> Option<&Arc<[String]>> {
        match self {
            Operand::StringArray(v) => Some(v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Equality
// ---------------------------------------------------------------------------

fn slices_eq<T>(a: &Arc<[T]>, b: &Arc<[T]>, eq: impl Fn(&T, &T) -> bool) -> bool {
    Arc::ptr_eq(a, b) || (a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| eq(x, y)))
}

impl PartialEq for Operand {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Operand::Null, Operand::Null) => true,
            (Operand::Int32(a), Operand::Int32(b)) => a == b,
            (Operand::Int64(a), Operand::Int64(b)) => a == b,
            (Operand::Bool(a), Operand::Bool(b)) => a == b,
            (Operand::Float(a), Operand::Float(b)) => f32_eq(*a, *b),
            (Operand::Double(a), Operand::Double(b)) => f64_eq(*a, *b),
            (Operand::String(a), Operand::String(b)) => a == b,
            (Operand::Int32Array(a), Operand::Int32Array(b)) => slices_eq(a, b, |x, y| x == y),
            (Operand::Int64Array(a), Operand::Int64Array(b)) => slices_eq(a, b, |x, y| x == y),
            (Operand::BoolArray(a), Operand::BoolArray(b)) => slices_eq(a, b, |x, y| x == y),
            (Operand::FloatArray(a), Operand::FloatArray(b)) => slices_eq(a, b, |x, y| f32_eq(*x, *y)),
            (Operand::DoubleArray(a), Operand::DoubleArray(b)) => slices_eq(a, b, |x, y| f64_eq(*x, *y)),
            (Operand::StringArray(a), Operand::StringArray(b)) => slices_eq(a, b, |x, y| x == y),
            _ => false,
        }
    }
}

impl Eq for Operand {}

impl PartialEq<Null> for Operand {
    fn eq(&self, _: &Null) -> bool {
        self.is_null()
    }
}

impl PartialEq<Operand> for Null {
    fn eq(&self, other: &Operand) -> bool {
        other.is_null()
    }
}

// ---------------------------------------------------------------------------
// Hash: kind tag, then payload. Floats go through canonical bits so that
// 0.0 / -0.0 and every NaN hash alike, matching `==`.
// ---------------------------------------------------------------------------

impl Hash for Operand {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.kind() as u8);
        match self {
            Operand::Null => {}
            Operand::Int32(v) => v.hash(state),
            Operand::Int64(v) => v.hash(state),
            Operand::Bool(v) => v.hash(state),
            Operand::Float(v) => f32_bits(*v).hash(state),
            Operand::Double(v) => f64_bits(*v).hash(state),
            Operand::String(s) => s.hash(state),
            Operand::Int32Array(v) => v.hash(state),
            Operand::Int64Array(v) => v.hash(state),
            Operand::BoolArray(v) => v.hash(state),
            Operand::FloatArray(v) => {
                state.write_usize(v.len());
                for x in v.iter() {
                    f32_bits(*x).hash(state);
                }
            }
            Operand::DoubleArray(v) => {
                state.write_usize(v.len());
                for x in v.iter() {
                    f64_bits(*x).hash(state);
                }
            }
            Operand::StringArray(v) => v.hash(state),
        }
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    item: impl Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, x) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item(f, x)?;
    }
    f.write_str("]")
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Null => f.write_str("NULL"),
            Operand::Int32(v) => write!(f, "{v}"),
            Operand::Int64(v) => write!(f, "{v}"),
            Operand::Bool(v) => write!(f, "{v}"),
            Operand::Float(v) => write!(f, "{v}"),
            Operand::Double(v) => write!(f, "{v}"),
            Operand::String(s) => f.write_str(s.as_str()),
            Operand::Int32Array(v) => write_list(f, v, |f, x| write!(f, "{x}")),
            Operand::Int64Array(v) => write_list(f, v, |f, x| write!(f, "{x}")),
            Operand::BoolArray(v) => write_list(f, v, |f, x| write!(f, "{x}")),
            Operand::FloatArray(v) => write_list(f, v, |f, x| write!(f, "{x}")),
            Operand::DoubleArray(v) => write_list(f, v, |f, x| write!(f, "{x}")),
            Operand::StringArray(v) => write_list(f, v, |f, x| write!(f, "{x:?}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

macro_rules! from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self { Operand::$variant(v) }
            }
        )*
    };
}

macro_rules! from_array {
    ($($elem:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Arc<[$elem]>> for Operand {
                fn from(v: Arc<[$elem]>) -> Self { Operand::$variant(v) }
            }

            impl From<Vec<$elem>> for Operand {
                fn from(v: Vec<$elem>) -> Self { Operand::$variant(Arc::from(v)) }
            }
        )*
    };
}

from_scalar! {
    i32 => Int32,
    i64 => Int64,
    bool => Bool,
    f32 => Float,
    f64 => Double,
    ExprString => String,
}

from_array! {
    i32 => Int32Array,
    i64 => Int64Array,
    bool => BoolArray,
    f32 => FloatArray,
    f64 => DoubleArray,
    String => StringArray,
}

impl From<String> for Operand {
    fn from(v: String) -> Self { Operand::String(ExprString::from(v)) }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self { Operand::String(ExprString::from(v)) }
}

impl From<Null> for Operand {
    fn from(_: Null) -> Self { Operand::Null }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        v.map_or(Operand::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_null() {
        assert!(Operand::default().is_null());
        assert_eq!(Operand::default(), Null);
        assert_eq!(Operand::from(Null), Operand::Null);
        assert_eq!(Operand::from(None::<i32>), Operand::Null);
    }

    #[test]
    fn test_null_sentinel_comparison() {
        assert!(Operand::default() == Null);
        assert!(Operand::from(5) != Null);
        assert!(Null != Operand::from("x"));
        assert!(!(Operand::from(5) == Null));
    }

    #[test]
    fn test_alternative_sensitive_equality() {
        assert_ne!(Operand::from(3i32), Operand::from(3i64));
        assert_ne!(Operand::from(1.0f32), Operand::from(1.0f64));
        assert_ne!(Operand::from(vec![1i32]), Operand::from(vec![1i64]));
        assert_eq!(Operand::from(3i32), Operand::Int32(3));
    }

    #[test]
    fn test_float_equality() {
        assert_eq!(Operand::from(f64::NAN), Operand::from(f64::NAN));
        assert_eq!(Operand::from(0.0f64), Operand::from(-0.0f64));
        assert_eq!(Operand::from(0.0f64).hash_code(), Operand::from(-0.0f64).hash_code());
        assert_eq!(
            Operand::from(vec![f32::NAN, 1.0]).hash_code(),
            Operand::from(vec![f32::NAN, 1.0]).hash_code()
        );
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Operand::Null.kind(), OperandKind::Null);
        assert_eq!(Operand::from("a").kind(), OperandKind::String);
        assert_eq!(Operand::from(vec![true]).kind(), OperandKind::BoolArray);
    }

    #[test]
    fn test_clone_shares_array() {
        let a = Operand::from(vec![1i64, 2, 3]);
        let b = a.clone();
        let (Some(x), Some(y)) = (a.as_i64_array(), b.as_i64_array()) else {
            panic!("expected int64 arrays");
        };
        assert!(Arc::ptr_eq(x, y));
        assert_eq!(Arc::strong_count(x), 2);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Operand::from(7i32).as_i32(), Some(7));
        assert_eq!(Operand::from(7i32).as_i64(), None);
        assert_eq!(Operand::from("hi").as_str(), Some("hi"));
        assert_eq!(Operand::from(true).as_bool(), Some(true));
        assert_eq!(Operand::Null.as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Operand::Null.to_string(), "NULL");
        assert_eq!(Operand::from(42i64).to_string(), "42");
        assert_eq!(Operand::from("abc").to_string(), "abc");
        assert_eq!(Operand::from(vec![1i32, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(
            Operand::from(vec!["a".to_string(), "b".to_string()]).to_string(),
            r#"["a", "b"]"#
        );
    }
}
