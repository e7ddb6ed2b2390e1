//! Ctrl+C handling.
//!
//! The first interrupt sets a shared [`AtomicBool`]; the scanner checks it
//! between files and the reviewer checks it between groups, so the run winds
//! down at the next safe point and no deletion is left half-applied. A
//! second interrupt (for example while blocked on the prompt) exits
//! immediately with status 130.
//!
//! ```rust,no_run
//! use dupes::duplicates::FinderConfig;
//! use dupes::signal::install_handler;
//!
//! let handler = install_handler().unwrap();
//! let config = FinderConfig::default().with_shutdown_flag(handler.get_flag());
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Process exit status after an interrupt (128 + SIGINT).
pub const EXIT_CODE_INTERRUPTED: i32 = 130;

/// Shared shutdown flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an interrupt has been received.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Set the flag by hand.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// The flag to hand to the scanner and reviewer.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Clear the flag.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// Record one interrupt. Returns `true` if one had already been recorded.
    fn on_interrupt(&self) -> bool {
        self.flag.swap(true, Ordering::SeqCst)
    }
}

/// Failure to register the Ctrl+C hook.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// `ctrlc` refused the handler.
    #[error("failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Register the process-wide Ctrl+C hook and return its handler.
///
/// Later calls return the same handler with the flag cleared, so `run_app`
/// may be invoked several times in one process (as the tests do).
///
/// # Errors
///
/// Returns [`SignalError::InstallFailed`] if another hook already owns the
/// signal and none of ours is registered.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let hooked = handler.clone();
    let result = ctrlc::set_handler(move || {
        if hooked.on_interrupt() {
            let _ = writeln!(std::io::stderr(), "\nInterrupted again. Exiting.");
            std::process::exit(EXIT_CODE_INTERRUPTED);
        }
        let _ = writeln!(
            std::io::stderr(),
            "\nInterrupted. Finishing current step (Ctrl+C again to quit)..."
        );
        let _ = std::io::stderr().flush();
        log::info!("Shutdown signal received");
    });

    match result {
        Ok(()) => Ok(GLOBAL_HANDLER.get_or_init(|| handler).clone()),
        Err(e) => match GLOBAL_HANDLER.get() {
            Some(existing) => {
                existing.reset();
                Ok(existing.clone())
            }
            None => Err(SignalError::InstallFailed(e)),
        },
    }
}
