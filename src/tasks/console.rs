//! Console frontend that mirrors the display model on stdout

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    sync::watch,
};
use tracing::{debug, warn};

use crate::state::display::Display;

/// Render one display snapshot as a single status line
pub fn render_line(display: &Display) -> String {
    let name = if display.name.is_empty() { "timer" } else { display.name.as_str() };
    let state = if display.is_idle() { "idle" } else { "running" };
    format!("{} [{}] {}  End Time: {}", name, state, display.countdown, display.end_time)
}

/// Redraw the status line every time the display changes, until the channel closes
pub async fn console_display_task<W>(mut display_rx: watch::Receiver<Display>, mut out: W)
where
    W: AsyncWrite + Unpin,
{
    debug!("Starting console display task");

    loop {
        let line = render_line(&display_rx.borrow_and_update());
        // Pad to clear leftovers from a longer previous line
        if let Err(e) = out.write_all(format!("\r{:<60}", line).as_bytes()).await {
            warn!("Failed to write to console: {}", e);
            return;
        }
        if let Err(e) = out.flush().await {
            warn!("Failed to flush console: {}", e);
            return;
        }

        if display_rx.changed().await.is_err() {
            debug!("Display channel closed, console display task exiting");
            return;
        }
    }
}
