//! Breakpoint tables loaded from JSON.
//!
//! The accepted shape mirrors the options object web breakpoint hooks take:
//!
//! ```json
//! { "breakpoints": { "micro": [0, 375], "mobile": [375, 639] } }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigError,
    registry::{DEFAULT_BREAKPOINTS, Registry, SharedRegistry},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointConfig {
    pub breakpoints: IndexMap<String, [u32; 2]>,
}

impl BreakpointConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_registry(self) -> Result<Registry, ConfigError> {
        Registry::new(self.breakpoints)
    }

    /// Validates this table and makes it the active one in `shared`.
    pub fn apply(self, shared: &SharedRegistry) -> Result<(), ConfigError> {
        shared.replace(self.into_registry()?);
        Ok(())
    }
}

impl Default for BreakpointConfig {
    fn default() -> Self {
        Self {
            breakpoints: DEFAULT_BREAKPOINTS
                .iter()
                .map(|(name, range)| (name.to_string(), [range.from, range.to]))
                .collect(),
        }
    }
}
