use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::{
    Config, ConnectionManager, ConnectionPool, Hashing, JwtConfig, PaymentPolicy, StorageBackend,
};
use std::{fmt, sync::Arc};
use ticketing::{
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::{Repositories, memory::MemoryStore},
    service::SandboxPaymentGateway,
};
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("registry", &"Registry")
            .finish()
    }
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self> {
        let repos = match config.storage {
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is required for the postgres backend")?;

                let pool = ConnectionManager::new_pool(url, config.db_min_conn, config.db_max_conn)
                    .await
                    .context("Failed to connect to database")?;

                if config.run_migrations {
                    run_migrations(&pool).await?;
                }

                Repositories::postgres(pool)
            }
            StorageBackend::Memory => {
                warn!("⚠️ Using in-memory storage, data is lost on restart");
                Repositories::memory(MemoryStore::new())
            }
        };

        Self::with_repositories(
            repos,
            Hashing::new(),
            &config.jwt_secret,
            config.payment_policy,
        )
    }

    /// Wires the services over already-built repositories.
    pub fn with_repositories(
        repos: Repositories,
        hashing: Hashing,
        jwt_secret: &str,
        payment_policy: PaymentPolicy,
    ) -> Result<Self> {
        let mut registry = Registry::default();

        let deps = DependenciesInjectDeps {
            repos,
            hashing: Arc::new(hashing),
            jwt: Arc::new(JwtConfig::new(jwt_secret)),
            gateway: Arc::new(SandboxPaymentGateway::new()),
            payment_policy,
        };

        let di_container = DependenciesInject::new(deps, &mut registry)
            .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            di_container,
            registry: Arc::new(Mutex::new(registry)),
        })
    }
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    info!("🏗️ Running database migrations");

    sqlx::migrate!("../ticketing/migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    info!("✅ Migrations applied");
    Ok(())
}
