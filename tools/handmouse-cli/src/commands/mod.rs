pub mod check;
pub mod config;
pub mod replay;
pub mod run;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use handmouse_engine::SessionSummary;
use handmouse_pointer::backends::FALLBACK_SCREEN;
use handmouse_pointer::PointerBackend;

/// Screen size from the backend, or the fallback when it cannot tell.
pub fn screen_size(pointer: &dyn PointerBackend) -> (u32, u32) {
    match pointer.screen_size() {
        Ok(size) => size,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Could not query screen size, assuming {}x{}",
                FALLBACK_SCREEN.0,
                FALLBACK_SCREEN.1
            );
            FALLBACK_SCREEN
        }
    }
}

/// Flag raised by the first Ctrl+C. A second Ctrl+C exits at once.
pub fn stop_on_ctrl_c() -> anyhow::Result<Arc<AtomicBool>> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
                    return;
                }
                println!();
                tracing::info!("Ctrl+C received, stopping after this frame");
                flag.store(true, Ordering::SeqCst);

                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("Second Ctrl+C, exiting without cleanup");
                    std::process::exit(130);
                }
            });
        })?;

    Ok(stop)
}

pub fn print_summary(summary: &SessionSummary) {
    println!("Session summary:");
    println!("  Frames:       {}", summary.frames);
    println!("  With hand:    {}", summary.hand_frames);
    println!("  Moves:        {}", summary.moves);
    println!("  Left clicks:  {}", summary.left_clicks);
    println!("  Right clicks: {}", summary.right_clicks);
}
