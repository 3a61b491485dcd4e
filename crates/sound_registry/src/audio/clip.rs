//! Audio clip storage
//!
//! The clip store is the loader-side owner of encoded audio data. Records and
//! playback components only ever hold a [`ClipHandle`]; the bytes stay here and
//! are decoded on demand by the playback backend.

use crate::audio::AudioError;
use crate::foundation::collections::{HandleMap, TypedHandle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opaque, non-owning reference to a clip held by a [`ClipStore`]
pub type ClipHandle = TypedHandle<AudioClip>;

/// Encoded audio clip
///
/// This stores the raw audio file bytes which can be decoded on-demand
/// by the audio backend during playback. Supports WAV, OGG, MP3, and FLAC formats.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Raw audio file data (encoded format), shared with in-flight decoders
    data: Arc<[u8]>,
    format: AudioFormat,
    /// File the clip was read from, if any
    source: Option<PathBuf>,
}

/// Supported audio formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// WAV uncompressed
    Wav,
    /// OGG Vorbis compressed
    Ogg,
    /// MP3 compressed
    Mp3,
    /// FLAC lossless
    Flac,
    /// Unknown format
    Unknown,
}

impl AudioClip {
    /// Create a clip from encoded bytes
    ///
    /// # Errors
    /// `InvalidClip` if `bytes` is empty or its format is not recognised.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AudioError> {
        if bytes.is_empty() {
            return Err(AudioError::InvalidClip("Empty audio file".to_string()));
        }

        let format = Self::detect_format(bytes);
        if format == AudioFormat::Unknown {
            return Err(AudioError::InvalidClip("Unknown audio format".to_string()));
        }

        // Validation of the payload happens when the backend decodes it
        Ok(Self {
            data: Arc::from(bytes),
            format,
            source: None,
        })
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Shared reference to the raw data, cheap to hand to a decoder
    pub fn shared_data(&self) -> Arc<[u8]> {
        Arc::clone(&self.data)
    }

    /// Detected container format
    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// File the clip was loaded from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Detect audio format from magic bytes
    fn detect_format(bytes: &[u8]) -> AudioFormat {
        if bytes.len() < 4 {
            return AudioFormat::Unknown;
        }

        match &bytes[0..4] {
            b"RIFF" => AudioFormat::Wav,
            b"OggS" => AudioFormat::Ogg,
            b"fLaC" => AudioFormat::Flac,
            // MP3 can start with ID3 tag or frame sync
            [0xFF, 0xFB, _, _] | [0xFF, 0xFA, _, _] => AudioFormat::Mp3,
            [b'I', b'D', b'3', _] => AudioFormat::Mp3,
            _ => AudioFormat::Unknown,
        }
    }
}

/// Owner of every clip referenced by sound records
#[derive(Debug, Default)]
pub struct ClipStore {
    clips: HandleMap<AudioClip>,
    by_path: HashMap<PathBuf, ClipHandle>,
    /// Directory relative clip paths are resolved against
    root: Option<PathBuf>,
}

impl ClipStore {
    /// Create an empty store resolving paths against the working directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store resolving relative paths against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    /// Add an already decoded-from-bytes clip
    pub fn insert(&mut self, clip: AudioClip) -> ClipHandle {
        ClipHandle::new(self.clips.insert(clip))
    }

    /// Add a clip from encoded bytes
    ///
    /// # Errors
    /// `InvalidClip` as for [`AudioClip::from_bytes`].
    pub fn insert_bytes(&mut self, bytes: &[u8]) -> Result<ClipHandle, AudioError> {
        Ok(self.insert(AudioClip::from_bytes(bytes)?))
    }

    /// Load a clip from disk
    ///
    /// Loading the same path twice returns the handle from the first load.
    ///
    /// # Errors
    /// - `Io` if the file cannot be read
    /// - `InvalidClip` if it is empty or in an unknown format
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<ClipHandle, AudioError> {
        let full_path = self.resolve_path(path.as_ref());
        if let Some(handle) = self.by_path.get(&full_path) {
            return Ok(*handle);
        }

        let bytes = std::fs::read(&full_path)?;
        let mut clip = AudioClip::from_bytes(&bytes).map_err(|e| match e {
            AudioError::InvalidClip(reason) => {
                AudioError::InvalidClip(format!("{}: {}", full_path.display(), reason))
            }
            other => other,
        })?;
        clip.source = Some(full_path.clone());

        let handle = self.insert(clip);
        log::debug!("Loaded audio clip {} ({} bytes)", full_path.display(), bytes.len());
        self.by_path.insert(full_path, handle);
        Ok(handle)
    }

    /// Get a clip by handle
    pub fn get(&self, handle: ClipHandle) -> Option<&AudioClip> {
        self.clips.get(handle.key())
    }

    /// Handle of a clip previously loaded from `path`
    pub fn handle_for(&self, path: impl AsRef<Path>) -> Option<ClipHandle> {
        self.by_path.get(&self.resolve_path(path.as_ref())).copied()
    }

    /// Number of stored clips
    pub fn len(&self) -> usize {
        self.clips.len()
    }

    /// Whether the store holds no clips
    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}
