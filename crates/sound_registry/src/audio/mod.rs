//! Audio system
//!
//! Sound groups are authored (or loaded from a [`library::SoundLibraryConfig`]) once at
//! startup and indexed by a [`SoundRegistry`]. Callers resolve a `(group tag, clip name)`
//! pair to a [`SoundRecord`] and hand it to the [`dispatcher`], which configures and
//! triggers a playback component supplied by the host through the [`backend`] traits.
//!
//! The host owns exactly one registry and passes it by reference; there is no global
//! manager instance.

pub mod backend;
pub mod clip;
pub mod dispatcher;
pub mod group;
pub mod library;
pub mod record;
pub mod registry;

#[cfg(test)]
mod tests;

pub use clip::{AudioClip, AudioFormat, ClipHandle, ClipStore};
pub use dispatcher::SoundDispatcher;
pub use group::SoundGroup;
pub use record::{PlayMode, SoundRecord};
pub use registry::{LookupError, RegistryError, SoundRegistry};

/// Errors raised while loading clips or driving a playback backend
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// Output device could not be opened
    #[error("Audio backend initialization failed: {0}")]
    BackendInitFailed(String),

    /// Sink creation or decoding failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// Clip handle does not refer to a loaded clip
    #[error("Invalid clip handle")]
    InvalidHandle,

    /// Clip bytes are empty or in an unrecognised format
    #[error("Invalid clip data: {0}")]
    InvalidClip(String),

    /// IO error while reading a clip
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
