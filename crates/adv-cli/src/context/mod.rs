use anyhow::Context;
use adv_config::AdvConfig;
use adv_db::service::CaseService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: CaseService,
    pub config: AdvConfig,
}

impl AppContext {
    /// Load layered configuration, apply CLI overrides, and open the service.
    pub async fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let mut config = AdvConfig::load_with_dotenv().context("failed to load configuration")?;
        if let Some(db) = &flags.db {
            config.database.path.clone_from(db);
            config.validate().context("invalid --db override")?;
        }
        tracing::debug!(db = %config.database.path, "opening case store");

        let service = CaseService::from_config(&config)
            .await
            .with_context(|| format!("failed to open database '{}'", config.database.path))?;
        Ok(Self { service, config })
    }
}
