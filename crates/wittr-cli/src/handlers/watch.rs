//! Watch command handler.

use std::io;
use std::sync::Arc;

use tracing::{info, warn};

use crate::bootstrap::start_client;
use crate::commands::WatchArgs;
use crate::error::CliError;
use crate::views::{TerminalPostsView, TerminalToastView};

/// Execute the watch command.
///
/// Prints posts to stdout and connectivity notices to stderr until Ctrl-C.
pub async fn execute(args: WatchArgs) -> Result<(), CliError> {
    let settings = args.settings();
    let since = args.since()?;

    let posts = Arc::new(TerminalPostsView::new(io::stdout(), since));
    let toasts = Arc::new(TerminalToastView::new(io::stderr()));
    let handle = start_client(&args.host, &settings, posts, toasts)?;

    info!(host = %args.host, "Watching for posts");

    let mut state = handle.subscribe();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result = loop {
        tokio::select! {
            signal = &mut ctrl_c => break signal.map_err(CliError::from),
            changed = state.changed() => {
                if changed.is_err() {
                    warn!("Live update client exited");
                    break Ok(());
                }
                let current = *state.borrow_and_update();
                info!(state = ?current, "Connectivity changed");
            }
        }
    };

    handle.stop().await;
    result
}
