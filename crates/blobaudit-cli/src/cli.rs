use blobaudit_config::CONNECTION_STRING_ENV;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blobaudit")]
#[command(about = "Record blob uploads in an audit table", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Audit store connection string
    #[arg(long, global = true, env = CONNECTION_STRING_ENV, hide_env_values = true)]
    pub connection_string: Option<String>,

    /// Connect timeout in seconds
    #[arg(long, global = true)]
    pub connect_timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process a local file as an uploaded blob
    Ingest {
        /// File to read as the blob body
        file: PathBuf,

        /// Blob name to record (defaults to the path as given)
        #[arg(long)]
        name: Option<String>,

        /// Reported blob size in bytes (defaults to the file size)
        #[arg(long)]
        length: Option<u64>,
    },

    /// Show the number of recorded blobs
    Count,

    /// List the most recent audit records
    List {
        #[arg(long, default_value = "20")]
        limit: u32,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create the audit table if it does not exist
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingest() {
        let cli = Cli::try_parse_from([
            "blobaudit",
            "ingest",
            "invoice-2024.edi",
            "--length",
            "4096",
            "--connection-string",
            "sqlite::memory:",
        ])
        .unwrap();

        assert_eq!(cli.connection_string.as_deref(), Some("sqlite::memory:"));
        match cli.command {
            Commands::Ingest { file, name, length } => {
                assert_eq!(file, PathBuf::from("invoice-2024.edi"));
                assert!(name.is_none());
                assert_eq!(length, Some(4096));
            }
            _ => panic!("expected ingest"),
        }
    }

    #[test]
    fn test_connection_string_reads_env_key() {
        use clap::CommandFactory;

        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "connection_string")
            .unwrap();
        assert_eq!(
            arg.get_env(),
            Some(std::ffi::OsStr::new(CONNECTION_STRING_ENV))
        );
    }

    #[test]
    fn test_list_defaults() {
        let cli = Cli::try_parse_from(["blobaudit", "list"]).unwrap();
        match cli.command {
            Commands::List { limit, json } => {
                assert_eq!(limit, 20);
                assert!(!json);
            }
            _ => panic!("expected list"),
        }
    }
}
