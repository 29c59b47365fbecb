//! Interactive session mode.

use super::{EXIT_IO, EXIT_SUCCESS};
use crate::build_info;
use crate::config::Config;
use crate::engine::Engine;
use crate::session::{LineChannel, Session, StreamChannel};
use crate::ui::render::RenderSink;
use crate::ui::settings::BANNER_EXIT_HINT;
use std::io::IsTerminal;
use tokio::io::{BufReader, Stdin, Stdout};

/// Open the stdin/stdout channel, announcing the session on a terminal.
pub fn stdio_channel(
    renderer: &dyn RenderSink,
    config: &Config,
) -> StreamChannel<BufReader<Stdin>, Stdout> {
    if config.repl.banner && std::io::stdin().is_terminal() {
        renderer.banner(&build_info::startup_metadata_line());
        renderer.banner(BANNER_EXIT_HINT);
    }
    StreamChannel::stdio(&config.repl.prompt, config.display.color)
}

/// Run one session on `channel` until it ends, returning the exit status.
pub async fn run_session<C: LineChannel>(
    engine: &dyn Engine,
    renderer: &dyn RenderSink,
    channel: C,
) -> i32 {
    match Session::new(engine).run(channel).await {
        Ok(summary) => {
            tracing::info!(
                reason = ?summary.reason,
                evaluated = summary.evaluated,
                failed = summary.failed,
                "session finished"
            );
            EXIT_SUCCESS
        }
        Err(err) => {
            renderer.error(&err.to_string());
            EXIT_IO
        }
    }
}
