use serde::{Deserialize, Serialize};

/// General events that do not belong to a single domain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeneralEvent {
    /// Warning message with optional context
    Warning {
        message: String,
        context: Option<String>,
    },
}

impl GeneralEvent {
    /// Create a warning event with context
    #[must_use]
    pub fn warning_with_context(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::Warning {
            message: message.into(),
            context: Some(context.into()),
        }
    }
}
