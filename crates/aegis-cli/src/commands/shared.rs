use aegis_core::enums::Framework;
use aegis_core::errors::CoreError;

/// Parse a framework name as passed on the command line.
pub fn parse_framework(value: &str) -> anyhow::Result<Framework> {
    Framework::all()
        .iter()
        .copied()
        .find(|f| f.as_str() == value.to_ascii_lowercase())
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "unknown framework '{value}' (expected one of: iso27001, iso27002, cis_ig1, cis_ig2, cis_ig3)"
            ))
            .into()
        })
}
