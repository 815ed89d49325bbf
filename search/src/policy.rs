//! Search policy: serializable engine configuration.

use crate::error::ConfigError;

/// Default number of concurrent expansions per round.
pub const DEFAULT_CORES: usize = 16;

/// Engine configuration loaded from TOML or built in code.
///
/// Applied to a [`crate::batch::BatchSearch`] with `with_policy`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchPolicy {
    /// Maximum number of candidates expanded concurrently per round.
    #[serde(default = "default_cores")]
    pub cores: usize,

    /// Frontier cap enforced after every round. `None` means unbounded.
    #[serde(default)]
    pub max_frontier: Option<usize>,
}

fn default_cores() -> usize {
    DEFAULT_CORES
}

impl SearchPolicy {
    /// Parse a policy from TOML text. Unspecified fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Policy`] if the text is not valid TOML, has
    /// unknown keys, or has values of the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Policy {
            detail: e.to_string(),
        })
    }

    /// Validate the policy before a search starts.
    ///
    /// An unset `max_frontier` is legal but logged: the frontier may then
    /// grow without bound.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCores`] if `cores` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cores == 0 {
            return Err(ConfigError::ZeroCores);
        }
        if self.max_frontier.is_none() {
            tracing::warn!(
                cores = self.cores,
                "no max_frontier set; frontier growth is unbounded"
            );
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            cores: default_cores(),
            max_frontier: None,
        }
    }
}
