//! Application bootstrap
//!
//! Turns an [`AppConfig`] into a ready [`ServiceContext`]: logging, the
//! PostgreSQL pool, migrations and the id generator.

use std::sync::Arc;

use tracing::info;

use boosty_common::{try_init_tracing_with_config, AppConfig, AppError, TracingConfig};
use boosty_core::SnowflakeGenerator;
use boosty_db::{create_pool, run_migrations, DatabaseConfig};

use crate::services::ServiceContext;

/// Connect to the database and wire every service dependency
pub async fn create_service_context(config: &AppConfig) -> Result<ServiceContext, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = DatabaseConfig::from(&config.database);
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    info!(worker_id = config.snowflake.worker_id, "Service context ready");

    Ok(ServiceContext::postgres(pool, snowflake_generator))
}

/// Load configuration from the environment, start logging, and connect
pub async fn init_from_env() -> Result<(AppConfig, ServiceContext), AppError> {
    let config = AppConfig::from_env().map_err(|e| AppError::Config(e.to_string()))?;

    if let Err(e) = try_init_tracing_with_config(TracingConfig::from(&config.logging)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(env = ?config.app.env, "Configuration loaded");
    let ctx = create_service_context(&config).await?;
    Ok((config, ctx))
}
