//! Error types for embed setup and playback control.

use std::fmt;

/// Errors raised while mounting an embed into the document.
#[derive(Debug, Clone)]
pub enum EmbedError {
    /// No `window`/`document` is available in this environment.
    NoDocument,
    /// A DOM operation was rejected by the browser.
    Dom(String),
}

impl fmt::Display for EmbedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbedError::NoDocument => write!(f, "no document available"),
            EmbedError::Dom(msg) => write!(f, "DOM operation failed: {msg}"),
        }
    }
}

impl std::error::Error for EmbedError {}

/// Errors surfaced by [`crate::handle::PlayerHandle::play`].
///
/// Play requests go through the browser's media pipeline and can be refused
/// asynchronously; autoplay policy is the common case.
#[derive(Debug, Clone)]
pub enum PlaybackError {
    /// The browser refused playback, typically because autoplay requires a
    /// user gesture or a muted stream.
    NotAllowed(String),
    /// The player rejected the request for another reason.
    Rejected(String),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::NotAllowed(msg) => {
                write!(f, "playback not allowed by the browser: {msg}")
            }
            PlaybackError::Rejected(msg) => write!(f, "playback rejected: {msg}"),
        }
    }
}

impl std::error::Error for PlaybackError {}
