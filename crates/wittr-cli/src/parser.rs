//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for following a Wittr server's live updates.
#[derive(Parser)]
#[command(name = "wittr")]
#[command(about = "Follow Wittr posts as they are published")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::parse_from(["wittr", "--verbose", "watch"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Watch(_))));
    }

    #[test]
    fn test_no_command() {
        let cli = Cli::parse_from(["wittr"]);
        assert!(cli.command.is_none());
    }
}
