//! Template data handed to the notification dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied context passed through to the dispatcher untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationContext {
    /// Template the dispatcher should render, if the caller picks one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Free-form template variables (recipient name, shop name, ...)
    #[serde(default)]
    pub variables: Map<String, Value>,
}

impl NotificationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let context = NotificationContext::new()
            .with_template("seller-activation")
            .with_variable("name", "Ada")
            .with_variable("shop_count", 2);

        assert_eq!(context.template.as_deref(), Some("seller-activation"));
        assert_eq!(context.variables["name"], "Ada");
        assert_eq!(context.variables["shop_count"], 2);
    }
}
