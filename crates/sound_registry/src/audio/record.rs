//! Sound records
//!
//! A [`SoundRecord`] is the immutable playback descriptor for one named clip.
//! Every numeric field is clamped into its range when the record is built, so
//! consumers never need to re-validate.

use crate::audio::clip::ClipHandle;
use crate::foundation::math::utils::clamp_finite;
use serde::{Deserialize, Serialize};

/// Valid volume range
pub const VOLUME_RANGE: (f32, f32) = (0.0, 1.0);
/// Valid pitch range
pub const PITCH_RANGE: (f32, f32) = (-3.0, 3.0);
/// Valid spatial blend range (0 = 2D, 1 = fully 3D)
pub const SPATIAL_BLEND_RANGE: (f32, f32) = (0.0, 1.0);
/// Valid start delay range in seconds
pub const DELAY_RANGE: (f32, f32) = (0.0, 100.0);

/// How a record triggers playback on its component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Start (or restart) from the beginning, honouring the loop flag
    #[default]
    Play,
    /// Fire a non-looping instance that overlaps whatever is already playing
    PlayOneShot,
    /// Start after the record's delay
    PlayDelayed,
}

/// Playback descriptor for one named clip
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRecord {
    clip_name: String,
    clip: ClipHandle,
    play_mode: PlayMode,
    looping: bool,
    volume: f32,
    pitch: f32,
    spatial_blend: f32,
    delay_seconds: f32,
    play_on_create: bool,
}

impl SoundRecord {
    /// Create a record with full volume, unit pitch, 2D output and [`PlayMode::Play`]
    pub fn new(clip_name: impl Into<String>, clip: ClipHandle) -> Self {
        Self {
            clip_name: clip_name.into(),
            clip,
            play_mode: PlayMode::Play,
            looping: false,
            volume: 1.0,
            pitch: 1.0,
            spatial_blend: 0.0,
            delay_seconds: 0.0,
            play_on_create: false,
        }
    }

    /// Set the play mode
    pub fn with_play_mode(mut self, play_mode: PlayMode) -> Self {
        self.play_mode = play_mode;
        self
    }

    /// Set the loop flag
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set the volume, clamped to [`VOLUME_RANGE`]
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = clamp_finite(volume, VOLUME_RANGE.0, VOLUME_RANGE.1, 1.0);
        self
    }

    /// Set the pitch, clamped to [`PITCH_RANGE`]
    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = clamp_finite(pitch, PITCH_RANGE.0, PITCH_RANGE.1, 1.0);
        self
    }

    /// Set the spatial blend, clamped to [`SPATIAL_BLEND_RANGE`]
    pub fn with_spatial_blend(mut self, spatial_blend: f32) -> Self {
        self.spatial_blend =
            clamp_finite(spatial_blend, SPATIAL_BLEND_RANGE.0, SPATIAL_BLEND_RANGE.1, 0.0);
        self
    }

    /// Set the start delay, clamped to [`DELAY_RANGE`]
    pub fn with_delay_seconds(mut self, delay_seconds: f32) -> Self {
        self.delay_seconds = clamp_finite(delay_seconds, DELAY_RANGE.0, DELAY_RANGE.1, 0.0);
        self
    }

    /// Trigger playback as soon as the record is bound to a fresh component
    pub fn with_play_on_create(mut self, play_on_create: bool) -> Self {
        self.play_on_create = play_on_create;
        self
    }

    /// Name of the clip, unique within its group
    pub fn clip_name(&self) -> &str {
        &self.clip_name
    }

    /// Handle of the clip data
    pub fn clip(&self) -> ClipHandle {
        self.clip
    }

    /// Trigger mode
    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    /// Whether [`PlayMode::Play`] and [`PlayMode::PlayDelayed`] loop
    pub fn looping(&self) -> bool {
        self.looping
    }

    /// Volume in `[0, 1]`
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Pitch in `[-3, 3]`
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Spatial blend in `[0, 1]`
    pub fn spatial_blend(&self) -> f32 {
        self.spatial_blend
    }

    /// Start delay in seconds, `[0, 100]`
    pub fn delay_seconds(&self) -> f32 {
        self.delay_seconds
    }

    /// Whether binding the record to a component also triggers it
    pub fn play_on_create(&self) -> bool {
        self.play_on_create
    }
}
