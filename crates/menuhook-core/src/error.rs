use thiserror::Error;

/// Failures of the menu bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BootError {
    /// No element in the document carries the identifier.
    #[error("element not found: #{id}")]
    ElementNotFound { id: String },

    /// The same handler is already registered for this event type and phase.
    #[error("listener already registered for `{event_type}` (capture: {capture})")]
    DuplicateListener { event_type: String, capture: bool },

    /// `initialize` was called on a hook that already ran or is waiting to run.
    #[error("bootstrap hook already initialized")]
    AlreadyInitialized,

    /// A host DOM call failed.
    #[error("host error: {0}")]
    Host(String),
}

impl BootError {
    pub fn element_not_found(id: &str) -> Self {
        Self::ElementNotFound { id: id.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            BootError::element_not_found("menuButton").to_string(),
            "element not found: #menuButton"
        );
        assert_eq!(
            BootError::DuplicateListener {
                event_type: "click".to_string(),
                capture: false,
            }
            .to_string(),
            "listener already registered for `click` (capture: false)"
        );
    }
}
