use serde::Deserialize;

use super::error::{ChildKind, PairingError};

/// Configuration of a reactive transport coupler.
///
/// Field names match the keys of the coupler's parameter sub-list, so any
/// serde format can be used to read it:
///
/// ```
/// use twine_reactive_transport::models::reactive_transport::CouplerConfig;
///
/// let config: CouplerConfig = serde_json::from_str(
///     r#"{ "transport index": 1, "transport subcycling": true }"#,
/// ).unwrap();
///
/// assert_eq!(config.indices(), Ok((1, 0)));
/// assert!(config.transport_subcycling);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CouplerConfig {
    /// Position of the transport composite among the coupler's children.
    #[serde(rename = "transport index")]
    pub transport_index: usize,

    /// Position of the chemistry composite; defaults to `1 - transport index`.
    #[serde(rename = "chemistry index")]
    pub chemistry_index: Option<usize>,

    /// Whether transport subcycles within the chemistry step.
    #[serde(rename = "transport subcycling")]
    pub transport_subcycling: bool,
}

impl CouplerConfig {
    /// Resolves the `(transport, chemistry)` child indices.
    ///
    /// # Errors
    ///
    /// Returns a [`PairingError`] if either index is not 0 or 1, or if both
    /// resolve to the same child.
    pub fn indices(&self) -> Result<(usize, usize), PairingError> {
        let transport = self.transport_index;
        if transport > 1 {
            return Err(PairingError::IndexOutOfRange {
                kind: ChildKind::Transport,
                index: transport,
            });
        }

        let chemistry = self.chemistry_index.unwrap_or(1 - transport);
        if chemistry > 1 {
            return Err(PairingError::IndexOutOfRange {
                kind: ChildKind::Chemistry,
                index: chemistry,
            });
        }
        if chemistry == transport {
            return Err(PairingError::IndicesCoincide { index: transport });
        }

        Ok((transport, chemistry))
    }
}
