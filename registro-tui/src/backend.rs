//! Store selection from flags and environment

use crate::cli::BackendKind;
use crate::config::Config;
use anyhow::{Context, bail};
use registro_client::demo::seed_empleados;
use registro_client::{ClientConfig, DataStore, MemoryStore, PgStore};
use std::sync::Arc;

/// Rows loaded by `--demo`
const DEMO_ROWS: usize = 240;

pub async fn connect(
    kind: BackendKind,
    demo: bool,
    config: &Config,
) -> anyhow::Result<Arc<dyn DataStore>> {
    let store: Arc<dyn DataStore> = match resolve(kind, demo, config)? {
        Resolved::Memory => {
            let rows = if demo { seed_empleados(DEMO_ROWS) } else { Vec::new() };
            tracing::info!(rows = rows.len(), "Using in-memory store");
            Arc::new(MemoryStore::with_rows(rows))
        }
        Resolved::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres backend")?;
            Arc::new(PgStore::connect(url, config.db_max_connections).await?)
        }
        Resolved::Rest => {
            let base = config
                .supabase_url
                .as_deref()
                .context("SUPABASE_URL must be set for the rest backend")?;
            let key = config
                .supabase_anon_key
                .as_deref()
                .context("SUPABASE_ANON_KEY must be set for the rest backend")?;
            let store = ClientConfig::new(base, key)
                .with_timeout(config.request_timeout_secs)
                .build_rest_store()?;
            tracing::info!(base, "Using REST store");
            Arc::new(store)
        }
    };
    Ok(store)
}

#[derive(Debug, PartialEq, Eq)]
enum Resolved {
    Memory,
    Postgres,
    Rest,
}

fn resolve(kind: BackendKind, demo: bool, config: &Config) -> anyhow::Result<Resolved> {
    Ok(match kind {
        BackendKind::Memory => Resolved::Memory,
        BackendKind::Postgres => Resolved::Postgres,
        BackendKind::Rest => Resolved::Rest,
        BackendKind::Auto if demo => Resolved::Memory,
        BackendKind::Auto if config.database_url.is_some() => Resolved::Postgres,
        BackendKind::Auto if config.supabase_url.is_some() => Resolved::Rest,
        BackendKind::Auto => bail!(
            "No backend configured: set DATABASE_URL or SUPABASE_URL/SUPABASE_ANON_KEY, or run with --demo"
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            environment: "development".into(),
            supabase_url: None,
            supabase_anon_key: None,
            database_url: None,
            db_max_connections: 5,
            app_origin: crate::config::DEFAULT_APP_ORIGIN.into(),
            access_secret: "x".into(),
            request_timeout_secs: 30,
            log_dir: "logs".into(),
        }
    }

    #[test]
    fn test_auto_resolution() {
        let mut cfg = config();
        assert!(resolve(BackendKind::Auto, false, &cfg).is_err());
        assert_eq!(resolve(BackendKind::Auto, true, &cfg).unwrap(), Resolved::Memory);

        cfg.supabase_url = Some("https://x.supabase.co".into());
        assert_eq!(resolve(BackendKind::Auto, false, &cfg).unwrap(), Resolved::Rest);
        cfg.database_url = Some("postgres://localhost/registro".into());
        assert_eq!(resolve(BackendKind::Auto, false, &cfg).unwrap(), Resolved::Postgres);
        assert_eq!(resolve(BackendKind::Rest, false, &cfg).unwrap(), Resolved::Rest);
    }

    #[tokio::test]
    async fn test_demo_store_is_seeded() {
        let store = connect(BackendKind::Auto, true, &config()).await.unwrap();
        let page = store.list(&shared::models::ListParams::default()).await;
        assert_eq!(page.count, Some(DEMO_ROWS as u64));
    }
}
