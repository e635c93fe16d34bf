use anyhow::Context;
use aegis_config::AegisConfig;

/// Load layered configuration (.env + TOML files + environment).
pub fn load_config() -> anyhow::Result<AegisConfig> {
    AegisConfig::load_with_dotenv().context("failed to load aegis configuration")
}
