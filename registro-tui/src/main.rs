//! Registro de personal: terminal front end
//!
//! ```text
//! registro-tui --demo                       # table over sample data
//! registro-tui formulario --nv NV499        # registration form
//! registro-tui formulario "https://host/formulario?nv=NV499"
//! registro-tui links                        # organizer link panel
//! ```

mod app;
mod backend;
mod cli;
mod clipboard;
mod config;
mod logging;

use app::{App, FormView, LinksView, ScreenKind};
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use registro_client::FormWizard;
use std::path::Path;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    let _guard = logging::init_file_logger(
        logging::DEFAULT_FILTER,
        config.is_production(),
        Path::new(&config.log_dir),
    )?;
    tracing::info!(
        environment = %config.environment,
        backend = ?cli.backend,
        demo = cli.demo,
        "Starting registro-tui"
    );

    let store = backend::connect(cli.backend, cli.demo, &config).await?;

    let (screen, form) = match cli.command.unwrap_or(Command::Tabla) {
        Command::Tabla => (ScreenKind::Table, None),
        Command::Links => (ScreenKind::Links, None),
        Command::Formulario { url, nv } => {
            let entry = Command::form_entry(url.as_deref(), nv.as_deref());
            (ScreenKind::Form, Some(FormView::new(FormWizard::from_entry(&entry))))
        }
    };
    let links = LinksView::new(config.access_secret.clone(), config.app_origin.clone());

    let (tx, rx) = mpsc::unbounded_channel();
    let app = App::new(store, tx, screen, form, links);
    let res = app::run(app, rx).await;
    if let Err(e) = &res {
        tracing::error!(error = %e, "registro-tui exited with an error");
    }
    res
}
