//! `${name}` template parsing and rendering.

use async_trait::async_trait;
use regex::Regex;

use hostrig_protocols::capability::Capability;
use hostrig_protocols::error::CapabilityError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    /// Index into the parameter list.
    Slot(usize),
}

/// A parsed template. `$${name}` renders as a literal `${name}`.
#[derive(Debug)]
pub struct Template {
    tag: String,
    parameters: Vec<String>,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source`, resolving every placeholder against `parameters`.
    pub fn parse(
        tag: &str,
        source: &str,
        parameters: &[String],
    ) -> Result<Self, CapabilityError> {
        let re = Regex::new(r"\$(\$)?\{([^}]*)\}")
            .map_err(|e| CapabilityError::Custom(e.to_string()))?;

        let mut segments = Vec::new();
        let mut text = String::new();
        let mut last = 0;
        for cap in re.captures_iter(source) {
            let Some(whole) = cap.get(0) else { continue };
            text.push_str(&source[last..whole.start()]);
            last = whole.end();

            let name = &cap[2];
            if cap.get(1).is_some() {
                text.push_str("${");
                text.push_str(name);
                text.push('}');
                continue;
            }

            let index = parameters.iter().position(|p| p == name).ok_or_else(|| {
                CapabilityError::InvalidScript(format!(
                    "placeholder '${{{}}}' is not a declared parameter",
                    name
                ))
            })?;
            if !text.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut text)));
            }
            segments.push(Segment::Slot(index));
        }
        text.push_str(&source[last..]);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Ok(Self {
            tag: tag.to_string(),
            parameters: parameters.to_vec(),
            segments,
        })
    }

    /// Render with positional values bound to the parameters.
    pub fn render(&self, args: &[serde_json::Value]) -> Result<String, CapabilityError> {
        self.check_arity(args)?;
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Slot(index) => match &args[*index] {
                    serde_json::Value::String(s) => out.push_str(s),
                    other => out.push_str(&other.to_string()),
                },
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl Capability for Template {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn parameters(&self) -> &[String] {
        &self.parameters
    }

    async fn invoke(
        &self,
        args: Vec<serde_json::Value>,
    ) -> Result<serde_json::Value, CapabilityError> {
        self.render(&args).map(serde_json::Value::String)
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
