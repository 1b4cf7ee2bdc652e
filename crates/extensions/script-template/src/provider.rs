//! Template capability provider.

use async_trait::async_trait;

use hostrig_protocols::capability::{Capability, CapabilityProvider, DispatchRequest};
use hostrig_protocols::error::CapabilityError;

use crate::template::Template;

pub const PROVIDER_ID: &str = "script-template";

const TAGS: &[&str] = &["template", "tmpl"];

/// Provider creating [`Template`] capabilities.
#[derive(Default)]
pub struct TemplateProvider;

impl TemplateProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CapabilityProvider for TemplateProvider {
    fn id(&self) -> &str {
        PROVIDER_ID
    }

    fn supports(&self, tag: &str) -> bool {
        TAGS.iter().any(|t| *t == tag)
    }

    async fn create(
        &self,
        request: &DispatchRequest,
    ) -> Result<Box<dyn Capability>, CapabilityError> {
        let template = Template::parse(request.tag(), request.script(), request.parameters())?;
        Ok(Box::new(template))
    }
}
