//! Registro client library
//!
//! Data access and UI state for the employee registry:
//!
//! - [`store`]: the [`DataStore`] boundary with REST, Postgres and in-memory backends
//! - [`query`]: list parameters rendered into backend queries
//! - [`listing`]: table state (debounced search, stale responses, cache)
//! - [`virtual_rows`]: windowed row layout
//! - [`form`]: the seven-step registration form
//! - [`gate`]: organizer access gate and link panel
//!
//! # Example
//!
//! ```ignore
//! use registro_client::{ClientConfig, DataStore};
//! use shared::models::ListParams;
//!
//! let store = ClientConfig::new("https://xyz.supabase.co", "anon-key").build_rest_store()?;
//! let page = store.list(&ListParams::default()).await;
//! println!("{} empleados", page.count.unwrap_or(0));
//! ```

pub mod config;
pub mod demo;
pub mod error;
pub mod form;
pub mod gate;
pub mod listing;
pub mod query;
pub mod store;
pub mod virtual_rows;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use form::{Field, FormWizard, Phase, Step};
pub use gate::{AccessGate, Clipboard, LinkPanel};
pub use listing::ListController;
pub use query::QueryPlan;
pub use store::{DataStore, InsertResult, ListResult, MemoryStore, PgStore, RestStore};
pub use virtual_rows::{VirtualItem, Virtualizer};

// Re-export shared types for convenience
pub use shared::models::{Empleado, EmpleadoInput, ListParams, ParamChange, ProjectTag};
