use std::fmt;

/// Owned text value stored in `Operand::String`.
///
/// Value semantics: cloning copies the buffer. The raw `String` is reachable
/// through [`ExprString::as_str`] / [`ExprString::into_string`].
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprString(String);

impl ExprString {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ExprString {
    fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for ExprString {
    fn from(s: &str) -> Self { Self(s.to_string()) }
}

impl AsRef<str> for ExprString {
    fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Display for ExprString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
