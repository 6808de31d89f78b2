use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(author, version, about = "Registro de personal en la terminal")]
pub struct Cli {
    /// Use an in-memory store filled with sample employees
    #[arg(long, global = true)]
    pub demo: bool,

    /// Data backend; `auto` prefers DATABASE_URL, then SUPABASE_URL
    #[arg(long, value_enum, default_value_t = BackendKind::Auto, env = "REGISTRO_BACKEND", global = true)]
    pub backend: BackendKind,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Personnel table (default)
    Tabla,
    /// Registration form opened from an entry link
    Formulario {
        /// Full link, e.g. https://host/formulario?nv=NV499
        #[arg(conflicts_with = "nv")]
        url: Option<String>,
        /// Project tag, e.g. NV499
        #[arg(long)]
        nv: Option<String>,
    },
    /// Organizer link panel
    Links,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Auto,
    Rest,
    Postgres,
    Memory,
}

impl Command {
    /// Entry string handed to the form; empty when nothing was given
    pub fn form_entry(url: Option<&str>, nv: Option<&str>) -> String {
        match (url, nv) {
            (Some(url), _) => url.to_string(),
            (None, Some(nv)) => format!("nv={nv}"),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_with_tag() {
        let cli = Cli::parse_from(["registro-tui", "--demo", "formulario", "--nv", "NV499"]);
        assert!(cli.demo);
        assert_eq!(
            cli.command,
            Some(Command::Formulario {
                url: None,
                nv: Some("NV499".into())
            })
        );
    }

    #[test]
    fn test_url_and_tag_conflict() {
        let res = Cli::try_parse_from(["registro-tui", "formulario", "https://x/formulario?nv=NV1", "--nv", "NV2"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_form_entry() {
        assert_eq!(Command::form_entry(None, Some("NV7")), "nv=NV7");
        assert_eq!(Command::form_entry(Some("https://h/formulario?nv=NV7"), None), "https://h/formulario?nv=NV7");
        assert_eq!(Command::form_entry(None, None), "");
    }

    #[test]
    fn test_backend_flag() {
        let cli = Cli::parse_from(["registro-tui", "links", "--backend", "postgres"]);
        assert_eq!(cli.backend, BackendKind::Postgres);
        assert_eq!(cli.command, Some(Command::Links));
    }
}
