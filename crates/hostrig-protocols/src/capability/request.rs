//! Dispatch request types.

use serde::{Deserialize, Serialize};

/// One request for a tagged capability. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    tag: String,
    script: String,
    #[serde(default)]
    parameters: Vec<String>,
}

impl DispatchRequest {
    /// Create a request for `tag` carrying `script` as its body.
    pub fn new(tag: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            script: script.into(),
            parameters: Vec::new(),
        }
    }

    /// Declare named parameters the produced capability accepts.
    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// A request without parameters describes a runnable.
    pub fn is_runnable(&self) -> bool {
        self.parameters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_request_new() {
        let request = DispatchRequest::new("sh", "echo hi");
        assert_eq!(request.tag(), "sh");
        assert_eq!(request.script(), "echo hi");
        assert!(request.parameters().is_empty());
        assert!(request.is_runnable());
    }

    #[test]
    fn test_dispatch_request_with_parameters() {
        let request = DispatchRequest::new("template", "Hello ${name}").with_parameters(["name"]);
        assert_eq!(request.parameters(), ["name".to_string()]);
        assert!(!request.is_runnable());
    }

    #[test]
    fn test_dispatch_request_deserialize_without_parameters() {
        let request: DispatchRequest =
            serde_json::from_str(r#"{"tag":"bash","script":"true"}"#).unwrap();
        assert_eq!(request, DispatchRequest::new("bash", "true"));
    }
}
