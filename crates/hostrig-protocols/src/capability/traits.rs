//! Capability provider and capability traits.

use async_trait::async_trait;

use super::DispatchRequest;
use crate::error::CapabilityError;

/// A plugin offering one implementation of a tagged capability.
#[async_trait]
pub trait CapabilityProvider: Send + Sync + 'static {
    /// Identity used in logs and error reports.
    fn id(&self) -> &str;

    /// Preference among providers supporting the same tag (higher = preferred).
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this provider can service `tag`.
    ///
    /// Must be deterministic and free of side effects; callers memoize it.
    fn supports(&self, tag: &str) -> bool;

    /// Produce a ready-to-use capability for one request.
    ///
    /// Implementations must tolerate concurrent calls.
    async fn create(
        &self,
        request: &DispatchRequest,
    ) -> Result<Box<dyn Capability>, CapabilityError>;
}

/// Artifact created by a provider for one dispatch request.
///
/// A capability built without parameters is a runnable; with parameters it is
/// a callable whose positional arguments bind to those names in order.
#[async_trait]
pub trait Capability: Send + Sync {
    /// Tag this capability was created for.
    fn tag(&self) -> &str;

    /// Parameter names positional arguments bind to.
    fn parameters(&self) -> &[String];

    /// Run the capability.
    async fn invoke(
        &self,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CapabilityError>;

    /// Check `args` against the declared parameters.
    fn check_arity(&self, args: &[serde_json::Value]) -> Result<(), CapabilityError> {
        let expected = self.parameters().len();
        if args.len() != expected {
            return Err(CapabilityError::ArgumentMismatch {
                expected,
                actual: args.len(),
            });
        }
        Ok(())
    }
}
