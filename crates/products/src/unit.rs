use serde::{Deserialize, Serialize};

use supplyline_core::ValueObject;

/// Unit of measure. Two units are the same unit when their codes match.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub code: String,
    pub name: String,
}

impl Unit {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl core::hash::Hash for Unit {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.code)
    }
}

impl ValueObject for Unit {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_display_name() {
        assert_eq!(Unit::new("KG", "Kilogram"), Unit::new("KG", "kilo"));
        assert_ne!(Unit::new("KG", "Kilogram"), Unit::new("G", "Gram"));
    }
}
