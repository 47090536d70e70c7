//! System clipboard access.

use std::error::Error;

use column_tally_core::{Clipboard, ClipboardError};
use copypasta::{ClipboardContext, ClipboardProvider};
use tracing::debug;

type ProviderResult = Result<Box<dyn ClipboardProvider>, Box<dyn Error + Send + Sync>>;

/// The system clipboard.
///
/// A clipboard context is opened for every copy so a missing display only
/// fails the copy that needed it.
pub struct SystemClipboard {
    open: Box<dyn Fn() -> ProviderResult>,
}

impl SystemClipboard {
    /// Create backed by the platform clipboard.
    pub fn new() -> Self {
        Self::with_provider(|| {
            let ctx = ClipboardContext::new()?;
            Ok(Box::new(ctx) as Box<dyn ClipboardProvider>)
        })
    }

    /// Create with a specific provider (for testing).
    pub fn with_provider(open: impl Fn() -> ProviderResult + 'static) -> Self {
        Self {
            open: Box::new(open),
        }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard for SystemClipboard {
    fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut ctx = (self.open)().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| ClipboardError::WriteFailed(e.to_string()))?;
        debug!(bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}
