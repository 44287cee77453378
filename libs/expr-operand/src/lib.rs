//! Runtime value representation for expression evaluation.
//!
//! - [`Operand`] — one dynamically typed value (scalar, string, or shared array)
//! - [`Tuple`] — ordered operands, a row or an argument list
//! - [`convert`] — bridge between operands and external optional values

pub mod convert;
pub mod error;
pub mod hash;
pub mod string;
pub mod tuple;
pub mod value;

pub use convert::{from_operand, to_operand, AdaptorValue, AnyValue, OperandValue};
pub use error::OperandError;
pub use hash::{operand_hash, tuple_hash, TUPLE_HASH_MULTIPLIER};
pub use string::ExprString;
pub use tuple::Tuple;
pub use value::{Null, Operand, OperandKind};
