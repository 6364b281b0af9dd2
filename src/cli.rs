use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fedipost", version, about = "Post status updates to a Mastodon-compatible instance")]
pub struct Cli {
    /// Path of the persisted session file (default: ./.config)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Show the stored instance and account (never the token)
    Show,
    /// Forget the stored instance and token
    Logout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_runs_session() {
        let cli = Cli::try_parse_from(["fedipost"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_subcommand_with_global_config() {
        let cli = Cli::try_parse_from(["fedipost", "logout", "--config", "/tmp/state.json"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Logout));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/state.json")));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["fedipost", "timeline"]).is_err());
    }
}
