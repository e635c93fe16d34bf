//! The structured guidance document and its canonical rendering.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A two-section guidance document: one purpose paragraph plus
/// implementation bullets.
///
/// This is the authoritative shape. Markdown only exists at the rendering
/// edge; nothing downstream ever re-parses rendered text except the
/// formatter itself.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GuidanceDoc {
    pub purpose: String,
    pub implementation: Vec<String>,
}

impl GuidanceDoc {
    /// Render the canonical text form.
    ///
    /// Convention (the one the rest of the system round-trips on):
    ///
    /// ```text
    /// Purpose: <one paragraph>
    ///
    /// Implementation:
    /// - <bullet>
    /// - <bullet>
    /// ```
    ///
    /// No trailing newline. An empty implementation list renders the purpose
    /// line only.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("Purpose: {}", self.purpose);
        if !self.implementation.is_empty() {
            out.push_str("\n\nImplementation:");
            for bullet in &self.implementation {
                out.push_str("\n- ");
                out.push_str(bullet);
            }
        }
        out
    }

    /// Whether both sections carry content.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.purpose.is_empty() && !self.implementation.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::GuidanceDoc;

    #[test]
    fn render_two_sections() {
        let doc = GuidanceDoc {
            purpose: "Maintain asset inventory".into(),
            implementation: vec!["Deploy discovery tooling".into(), "Review weekly".into()],
        };
        assert_eq!(
            doc.render(),
            "Purpose: Maintain asset inventory\n\nImplementation:\n- Deploy discovery tooling\n- Review weekly"
        );
    }

    #[test]
    fn render_purpose_only_when_no_bullets() {
        let doc = GuidanceDoc {
            purpose: "Maintain asset inventory".into(),
            implementation: vec![],
        };
        assert_eq!(doc.render(), "Purpose: Maintain asset inventory");
    }
}
