//! CLI argument parsing for the tabor-backend binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "tabor-backend", about = "Tabor camp logistics backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP server (default if no subcommand given)
    Serve,
    /// Run database migrations and exit
    Migrate,
    /// Parse a GPX recording and attach its track to a training
    ImportTrack {
        /// Camp that owns the training
        #[arg(long)]
        camp: Uuid,
        /// Training to attach the track to
        #[arg(long)]
        training: Uuid,
        /// Path to the GPX file
        #[arg(long)]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_migrate_command_parses() {
        let cli = Cli::parse_from(["tabor-backend", "migrate"]);
        assert!(matches!(cli.command, Some(Command::Migrate)));
    }

    #[test]
    fn test_cli_no_command_defaults_to_none() {
        let cli = Cli::parse_from(["tabor-backend"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_serve_command_parses() {
        let cli = Cli::parse_from(["tabor-backend", "serve"]);
        assert!(matches!(cli.command, Some(Command::Serve)));
    }

    #[test]
    fn test_cli_import_track_requires_all_args() {
        let result = Cli::try_parse_from([
            "tabor-backend",
            "import-track",
            "--camp",
            "3fa9c1d2-0000-0000-0000-000000000001",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_import_track_parses() {
        let cli = Cli::parse_from([
            "tabor-backend",
            "import-track",
            "--camp",
            "3fa9c1d2-0000-0000-0000-000000000001",
            "--training",
            "3fa9c1d2-0000-0000-0000-000000000002",
            "--file",
            "morning-loop.gpx",
        ]);
        match cli.command {
            Some(Command::ImportTrack { camp, training, file }) => {
                assert_ne!(camp, training);
                assert_eq!(file, PathBuf::from("morning-loop.gpx"));
            }
            _ => panic!("expected import-track"),
        }
    }
}
