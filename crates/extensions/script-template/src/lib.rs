//! Template capability for hostrig.
//!
//! Serves the `template` and `tmpl` tags: the request body is text with
//! `${name}` placeholders bound to the declared parameters.

mod provider;
mod template;

pub use provider::TemplateProvider;
pub use template::Template;
