use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::OperandError;
use crate::string::ExprString;
use crate::value::{Operand, OperandKind};

/// Static type that maps onto one [`Operand`] alternative.
///
/// One impl per supported type; adding a type means adding an impl.
///
/// - Scalars and strings copy in and out.
/// - `Vec<T>` copies into a fresh `Arc` on the way in and back into a fresh
///   `Vec` on the way out, so callers never alias operand storage.
/// - `Arc<[T]>` shares: both directions clone the handle. Used by
///   [`Operand::get`] only, never by the adaptor.
pub trait OperandValue: Sized {
    const KIND: OperandKind;

    fn to_operand(&self) -> Operand;

    /// Fails with `TypeMismatch` unless the operand holds `Self::KIND`.
    fn from_operand(operand: &Operand) -> Result<Self, OperandError>;
}

/// Types accepted by the adaptor. Every conversion copies, so an external
/// value never shares storage with an operand.
pub trait AdaptorValue: OperandValue {}

/// External optional → operand. `None` becomes `Operand::Null`.
pub fn to_operand<T: AdaptorValue>(value: Option<&T>) -> Operand {
    value.map_or(Operand::Null, T::to_operand)
}

/// Operand → external optional. `Operand::Null` becomes `None`.
pub fn from_operand<T: AdaptorValue>(operand: &Operand) -> Result<Option<T>, OperandError> {
    if operand.is_null() {
        return Ok(None);
    }
    T::from_operand(operand).map(Some)
}

// ═══════════════════════════════════════════════════════════════
//  Impls
// ═══════════════════════════════════════════════════════════════

macro_rules! scalar_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl OperandValue for $ty {
                const KIND: OperandKind = OperandKind::$variant;

                fn to_operand(&self) -> Operand {
                    Operand::$variant(*self)
                }

                fn from_operand(operand: &Operand) -> Result<Self, OperandError> {
                    match operand {
                        Operand::$variant(v) => Ok(*v),
                        other => Err(OperandError::mismatch(Self::KIND, other.kind())),
                    }
                }
            }

            impl AdaptorValue for $ty {}
        )*
    };
}

macro_rules! array_value {
    ($($elem:ty => $variant:ident),* $(,)?) => {
        $(
            impl OperandValue for Vec<$elem> {
                const KIND: OperandKind = OperandKind::$variant;

                fn to_operand(&self) -> Operand {
                    Operand::$variant(Arc::from(self.as_slice()))
                }

                fn from_operand(operand: &Operand) -> Result<Self, OperandError> {
                    match operand {
                        Operand::$variant(v) => Ok(v.to_vec()),
                        other => Err(OperandError::mismatch(Self::KIND, other.kind())),
                    }
                }
            }

            impl AdaptorValue for Vec<$elem> {}

            impl OperandValue for Arc<[$elem]> {
                const KIND: OperandKind = OperandKind::$variant;

                fn to_operand(&self) -> Operand {
                    Operand::$variant(Arc::clone(self))
                }

                fn from_operand(operand: &Operand) -> Result<Self, OperandError> {
                    match operand {
                        Operand::$variant(v) => Ok(Arc::clone(v)),
                        other => Err(OperandError::mismatch(Self::KIND, other.kind())),
                    }
                }
            }
        )*
    };
}

scalar_value! {
    i32 => Int32,
    i64 => Int64,
    bool => Bool,
    f32 => Float,
    f64 => Double,
}

array_value! {
    i32 => Int32Array,
    i64 => Int64Array,
    bool => BoolArray,
    f32 => FloatArray,
    f64 => DoubleArray,
    String => StringArray,
}

impl OperandValue for ExprString {
    const KIND: OperandKind = OperandKind::String;

    fn to_operand(&self) -> Operand {
        Operand::String(self.clone())
    }

    fn from_operand(operand: &Operand) -> Result<Self, OperandError> {
        match operand {
            Operand::String(s) => Ok(s.clone()),
            other => Err(OperandError::mismatch(Self::KIND, other.kind())),
        }
    }
}

impl AdaptorValue for ExprString {}

/// Raw string: stored as `Operand::String`, read back through the raw accessor.
impl OperandValue for String {
    const KIND: OperandKind = OperandKind::String;

    fn to_operand(&self) -> Operand {
        Operand::String(ExprString::new(self.as_str()))
    }

    fn from_operand(operand: &Operand) -> Result<Self, OperandError> {
        match operand {
            Operand::String(s) => Ok(s.as_str().to_string()),
            other => Err(OperandError::mismatch(Self::KIND, other.kind())),
        }
    }
}

impl AdaptorValue for String {}

// ═══════════════════════════════════════════════════════════════
//  AnyValue — type-erased optional cell
// ═══════════════════════════════════════════════════════════════

/// Optional value of a type known only to the host (an "any" column cell).
///
/// The static type is supplied at each conversion call; a cell holding a
/// different type is a `TypeMismatch`, same as a wrong operand alternative.
#[derive(Default)]
pub struct AnyValue(Option<Box<dyn Any + Send + Sync>>);

impl AnyValue {
    pub fn empty() -> Self {
        Self(None)
    }

    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    pub fn has_value(&self) -> bool {
        self.0.is_some()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_ref().and_then(|v| v.downcast_ref::<T>())
    }

    pub fn to_operand<T: AdaptorValue + Any>(&self) -> Result<Operand, OperandError> {
        let Some(inner) = &self.0 else {
            return Ok(Operand::Null);
        };
        let value = inner
            .downcast_ref::<T>()
            .ok_or_else(|| OperandError::foreign(T::KIND))?;
        let operand = value.to_operand();
        tracing::trace!(kind = %operand.kind(), "any-typed cell converted to operand");
        Ok(operand)
    }

    pub fn from_operand<T: AdaptorValue + Any + Send + Sync>(
        operand: &Operand,
    ) -> Result<Self, OperandError> {
        Ok(match from_operand::<T>(operand)? {
            Some(value) => Self::new(value),
            None => Self::empty(),
        })
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("AnyValue(..)"),
            None => f.write_str("AnyValue(empty)"),
        }
    }
}
