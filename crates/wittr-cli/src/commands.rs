//! Commands and their arguments.

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use wittr_core::LiveUpdateSettings;

use crate::error::CliError;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Connect to a server and print posts as they arrive
    Watch(WatchArgs),
}

/// Arguments of `wittr watch`.
#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Address of the Wittr site (http, https, ws or wss)
    #[arg(long, env = "WITTR_HOST", default_value = "http://localhost:8888")]
    pub host: String,

    /// Only ask for posts newer than this RFC 3339 timestamp
    #[arg(long)]
    pub since: Option<String>,

    /// Delay before reconnecting after the connection drops, in milliseconds
    #[arg(long, env = "WITTR_RETRY_DELAY_MS")]
    pub retry_delay_ms: Option<u64>,

    /// Path of the updates endpoint
    #[arg(long, env = "WITTR_UPDATES_PATH")]
    pub updates_path: Option<String>,

    /// Pass the host address's query string through to the updates endpoint
    #[arg(long)]
    pub forward_query: bool,

    /// Interval between paint frames, in milliseconds
    #[arg(long)]
    pub paint_interval_ms: Option<u64>,
}

impl WatchArgs {
    /// Defaults overlaid with whatever was given on the command line.
    pub fn settings(&self) -> LiveUpdateSettings {
        let mut settings = LiveUpdateSettings::with_defaults();
        settings.merge(&LiveUpdateSettings {
            retry_delay_ms: self.retry_delay_ms,
            updates_path: self.updates_path.clone(),
            disconnected_message: None,
            forward_page_query: self.forward_query.then_some(true),
            paint_interval_ms: self.paint_interval_ms,
        });
        settings
    }

    /// Parsed `--since` timestamp.
    pub fn since(&self) -> Result<Option<DateTime<Utc>>, CliError> {
        self.since
            .as_deref()
            .map(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|date| date.with_timezone(&Utc))
                    .map_err(|e| CliError::Arguments(format!("--since '{raw}': {e}")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Cli;
    use clap::Parser;

    fn watch(args: &[&str]) -> WatchArgs {
        let mut argv = vec!["wittr", "watch"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Some(Commands::Watch(args)) => args,
            None => panic!("expected watch command"),
        }
    }

    #[test]
    fn test_watch_defaults() {
        let args = watch(&[]);
        let settings = args.settings();

        assert_eq!(settings.retry_delay_ms, Some(5000));
        assert_eq!(settings.updates_path.as_deref(), Some("/updates"));
        assert_eq!(settings.forward_page_query, Some(false));
        assert_eq!(args.since().unwrap(), None);
    }

    #[test]
    fn test_watch_overrides() {
        let args = watch(&[
            "--host",
            "https://wittr.example",
            "--retry-delay-ms",
            "250",
            "--forward-query",
        ]);
        let settings = args.settings();

        assert_eq!(args.host, "https://wittr.example");
        assert_eq!(settings.retry_delay_ms, Some(250));
        assert_eq!(settings.forward_page_query, Some(true));
    }

    #[test]
    fn test_since_parses_rfc3339() {
        let args = watch(&["--since", "1970-01-01T00:00:01Z"]);
        let since = args.since().unwrap().unwrap();
        assert_eq!(since.timestamp_millis(), 1000);
    }

    #[test]
    fn test_since_rejects_garbage() {
        let args = watch(&["--since", "yesterday"]);
        assert!(matches!(args.since(), Err(CliError::Arguments(_))));
    }
}
