use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use crate::hash::tuple_hash;
use crate::value::Operand;

/// Positional sequence of operands (a row or an argument list).
///
/// Order is significant for both equality and hashing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tuple(pub Vec<Operand>);

impl Tuple {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, operand: impl Into<Operand>) {
        self.0.push(operand.into());
    }

    pub fn into_inner(self) -> Vec<Operand> {
        self.0
    }

    /// See [`tuple_hash`].
    pub fn hash_code(&self) -> u64 {
        tuple_hash(&self.0)
    }
}

impl Deref for Tuple {
    type Target = [Operand];

    fn deref(&self) -> &[Operand] {
        &self.0
    }
}

impl Hash for Tuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl From<Vec<Operand>> for Tuple {
    fn from(v: Vec<Operand>) -> Self { Self(v) }
}

impl FromIterator<Operand> for Tuple {
    fn from_iter<I: IntoIterator<Item = Operand>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Tuple {
    type Item = Operand;
    type IntoIter = std::vec::IntoIter<Operand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tuple {
    type Item = &'a Operand;
    type IntoIter = std::slice::Iter<'a, Operand>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, operand) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{operand}")?;
        }
        f.write_str(")")
    }
}
