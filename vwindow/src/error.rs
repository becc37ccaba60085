use thiserror::Error;

/// Invalid configuration detected while constructing a window or engine.
///
/// These are contract violations on the caller's side; nothing meaningful can
/// happen after one of them, so construction fails fast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("item height must be greater than zero")]
    ZeroItemHeight,
    #[error("render batch size must be greater than zero")]
    ZeroRenderBatch,
    #[error("container is not attached to a host surface")]
    ContainerUnavailable,
}
