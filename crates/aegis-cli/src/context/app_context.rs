use std::path::PathBuf;

use anyhow::Context;
use aegis_config::AegisConfig;
use aegis_db::service::AegisService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: AegisService,
    pub config: AegisConfig,
}

impl AppContext {
    /// Initialize all shared resources using the discovered project root.
    pub async fn init(project_root: PathBuf, config: AegisConfig) -> anyhow::Result<Self> {
        let db_path = if config.database.has_override() {
            PathBuf::from(&config.database.path)
        } else {
            project_root.join(".aegis").join("aegis.db")
        };
        let db_path_str = db_path.to_string_lossy();

        let service = AegisService::new_local(&db_path_str)
            .await
            .context("failed to initialize aegis-db service")?;

        Ok(Self { service, config })
    }
}
