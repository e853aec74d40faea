use std::sync::Arc;

use anyhow::Context;
use feature_onboarding::PluginRegistry;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::AppConfig;
use crate::registered_plugins::register_builtin_plugins;

/// Wired services sharing one database connection.
pub struct App {
    pub onboarding: feature_onboarding::Service,
    pub finance: Arc<finance::Service>,
}

impl App {
    /// Connect, migrate every module schema and register the built-in plugins.
    ///
    /// # Errors
    ///
    /// Returns an error if the database is unreachable or a migration fails.
    pub async fn start(config: &AppConfig) -> anyhow::Result<Self> {
        let db = Database::connect(config.database.dsn.as_str())
            .await
            .context("failed to connect to database")?;
        migrate(&db).await?;

        let registry = Arc::new(PluginRegistry::new());
        register_builtin_plugins(&registry, &db);
        info!(
            plugins = registry.len(),
            disabled = ?config.feature_onboarding.disabled_plugins,
            "Feature plugins registered"
        );

        let onboarding =
            feature_onboarding::Service::new(registry, config.feature_onboarding.clone());
        let finance = Arc::new(finance::Service::new(
            Arc::new(finance::SeaOrmTransactionRepository::new(db.clone())),
            Arc::new(finance::SeaOrmCatalogRepository::new(db)),
            &config.finance,
        ));

        Ok(Self {
            onboarding,
            finance,
        })
    }
}

// Each module keeps its own migration history table.
async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    membership_onboarding_plugin::Migrator::up(db, None)
        .await
        .context("membership migrations failed")?;
    finance::Migrator::up(db, None)
        .await
        .context("finance migrations failed")?;
    Ok(())
}
