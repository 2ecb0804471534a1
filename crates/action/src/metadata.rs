use serde::{Deserialize, Serialize};

/// Identity of an action.
///
/// The key names the action in logs and in the `safe_action` tracing
/// span; name and description are for humans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMetadata {
    /// Dotted identifier, e.g. `"alerts.send"`.
    pub key: String,
    /// Label shown to people, e.g. `"Send Alert"`.
    pub name: String,
    /// One sentence on what running it does.
    pub description: String,
}

impl ActionMetadata {
    /// Key, label and description, in that order.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Metadata for actions built without any, keyed `"anonymous"`.
    pub fn anonymous() -> Self {
        Self::new("anonymous", "Anonymous action", "")
    }
}

impl Default for ActionMetadata {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_sets_fields() {
        let meta = ActionMetadata::new("alerts.send", "Send Alert", "Sends an alert");
        assert_eq!(meta.key, "alerts.send");
        assert_eq!(meta.name, "Send Alert");
        assert_eq!(meta.description, "Sends an alert");
    }

    #[test]
    fn default_is_anonymous() {
        assert_eq!(ActionMetadata::default().key, "anonymous");
    }
}
