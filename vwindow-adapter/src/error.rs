use alloc::boxed::Box;

use thiserror::Error;
use vwindow::ConfigError;

/// Error type returned by caller-supplied render callbacks.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A render callback failed; the pass that hit it was discarded without committing.
    #[error("failed to render item {index}")]
    Render {
        index: usize,
        #[source]
        source: BoxError,
    },
}
