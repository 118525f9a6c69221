//! User-defined function signatures

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlcoerce_types::SqlType;

/// Formal parameters of a user-defined function
///
/// Parameters keep declaration order so they can be looked up by name (for
/// named arguments) or by ordinal (for positional ones).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: IndexMap<String, SqlType>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: IndexMap::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, ty: SqlType) -> Self {
        self.parameters.insert(name.into(), ty);
        self
    }

    /// Declared type of a parameter by name; exact match first, then ASCII case-insensitive
    pub fn parameter_by_name(&self, name: &str) -> Option<&SqlType> {
        self.parameters.get(name).or_else(|| {
            self.parameters
                .iter()
                .find(|(param, _)| param.eq_ignore_ascii_case(name))
                .map(|(_, ty)| ty)
        })
    }

    /// Declared type of the parameter at `ordinal`
    pub fn parameter_at(&self, ordinal: usize) -> Option<&SqlType> {
        self.parameters.get_index(ordinal).map(|(_, ty)| ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let sig = FunctionSignature::new("discount")
            .with_parameter("price", SqlType::decimal(10, 2))
            .with_parameter("rate", SqlType::double());

        assert_eq!(sig.parameter_at(1), Some(&SqlType::double()));
        assert_eq!(sig.parameter_at(2), None);
        assert_eq!(sig.parameter_by_name("PRICE"), Some(&SqlType::decimal(10, 2)));
        assert_eq!(sig.parameter_by_name("qty"), None);
    }

    #[test]
    fn test_serde_keeps_order() {
        let sig = FunctionSignature::new("f")
            .with_parameter("z", SqlType::integer())
            .with_parameter("a", SqlType::date());
        let json = serde_json::to_string(&sig).unwrap();
        let back: FunctionSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(back.parameter_at(0), Some(&SqlType::integer()));
        assert_eq!(back, sig);
    }
}
