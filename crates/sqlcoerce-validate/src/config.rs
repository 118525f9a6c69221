//! Coercion configuration

use crate::{DefaultTypeCoercion, StrictTypeCoercion, TypeCoercion};
use log::debug;
use serde::{Deserialize, Serialize};
use sqlcoerce_diagnostics::{Result, SqlError};
use sqlcoerce_types::PrecisionPolicy;

/// Which type lattice coercion runs over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// Lenient lattice with string promotion
    #[default]
    Default,
    /// No implicit conversion between character and other families
    Strict,
}

/// Configuration for a coercion engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoercionConfig {
    pub dialect: Dialect,
    pub precision: PrecisionPolicy,
}

impl CoercionConfig {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            precision: PrecisionPolicy::default(),
        }
    }

    pub fn with_precision(mut self, precision: PrecisionPolicy) -> Self {
        self.precision = precision;
        self
    }

    /// Parse and validate a JSON configuration; absent fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| SqlError::configuration(format!("Invalid coercion config: {e}")))?;
        config.precision.validate()?;
        Ok(config)
    }

    /// Build the engine for the configured dialect
    pub fn build(&self) -> Box<dyn TypeCoercion> {
        debug!(
            "building {:?} coercion (max precision {}, max scale {})",
            self.dialect, self.precision.max_precision, self.precision.max_scale
        );
        match self.dialect {
            Dialect::Default => Box::new(DefaultTypeCoercion::new(self.precision)),
            Dialect::Strict => Box::new(StrictTypeCoercion::new(self.precision)),
        }
    }
}
