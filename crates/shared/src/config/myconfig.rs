use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "postgres" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(anyhow!(
                "STORAGE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            )),
        }
    }
}

/// How a freshly booked order's payment status is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPolicy {
    /// The order is recorded as paid at booking time.
    AssumeCompleted,
    /// The order stays pending until the gateway reports capture or settlement.
    AwaitGateway,
}

impl FromStr for PaymentPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "assume_completed" => Ok(PaymentPolicy::AssumeCompleted),
            "await_gateway" => Ok(PaymentPolicy::AwaitGateway),
            other => Err(anyhow!(
                "PAYMENT_POLICY must be 'assume_completed' or 'await_gateway', got '{}'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub database_url: Option<String>,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub run_migrations: bool,
    pub jwt_secret: String,
    pub port: u16,
    pub payment_policy: PaymentPolicy,
    pub otel_endpoint: String,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = lookup("STORAGE_BACKEND")
            .unwrap_or_else(|| "postgres".to_string())
            .parse::<StorageBackend>()?;

        let database_url = lookup("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(anyhow!("Missing environment variable: DATABASE_URL"));
        }

        let jwt_secret =
            lookup("JWT_SECRET").context("Missing environment variable: JWT_SECRET")?;

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = lookup("PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = lookup("DB_MIN_CONN")
            .unwrap_or_else(|| "1".to_string())
            .parse::<u32>()
            .context("DB_MIN_CONN must be a valid u32 integer")?;

        let db_max_conn = lookup("DB_MAX_CONN")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u32>()
            .context("DB_MAX_CONN must be a valid u32 integer")?;

        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({}) must not exceed DB_MAX_CONN ({})",
                db_min_conn,
                db_max_conn
            ));
        }

        let payment_policy = lookup("PAYMENT_POLICY")
            .unwrap_or_else(|| "assume_completed".to_string())
            .parse::<PaymentPolicy>()?;

        let otel_endpoint =
            lookup("OTEL_ENDPOINT").unwrap_or_else(|| "http://otel-collector:4317".to_string());

        Ok(Self {
            storage,
            database_url,
            db_min_conn,
            db_max_conn,
            run_migrations,
            jwt_secret,
            port,
            payment_policy,
            otel_endpoint,
        })
    }
}
