use std::path::PathBuf;

use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Serialize)]
struct InitResponse {
    project_root: String,
    created: bool,
    database: String,
}

const CONFIG_TEMPLATE: &str = "\
# Aegis project configuration. Environment variables (AEGIS_*) win over
# values set here.

[general]
# throttle_ms = 100
# batch_size = 8

[stripe]
# secret_key = \"sk_test_...\"

[server]
# bind = \"127.0.0.1:8787\"
";

/// Handle `aeg init`: create the `.aegis` directory, a config stub, and the
/// database with its schema.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match &args.path {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    let aegis_dir = root.join(".aegis");
    let created = !aegis_dir.is_dir();
    std::fs::create_dir_all(&aegis_dir)
        .with_context(|| format!("failed to create {}", aegis_dir.display()))?;

    let config_path = aegis_dir.join("config.toml");
    if !config_path.exists() {
        std::fs::write(&config_path, CONFIG_TEMPLATE)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
    }

    // Opening the database runs the schema migrations.
    let db_path = aegis_dir.join("aegis.db");
    aegis_db::service::AegisService::new_local(&db_path.to_string_lossy())
        .await
        .context("failed to initialize database")?;

    output(
        &InitResponse {
            project_root: root.display().to_string(),
            created,
            database: db_path.display().to_string(),
        },
        flags.format,
    )
}
