//! Playback backend capabilities
//!
//! The dispatcher never creates or owns audio objects. Hosts expose their audio
//! primitives through these traits: a per-target [`PlaybackComponent`] obtained
//! from a [`PlaybackComponentProvider`], a stateless [`PointPlayback`] service for
//! fire-and-forget sounds at a world position, and a [`TargetLocator`] that
//! reports where a target currently is.
//!
//! # Threading
//! None of the traits require `Send` or `Sync`. Calls are expected on the host's
//! main loop thread and must return without blocking; delayed starts are
//! scheduled inside the host's audio primitive.
//!
//! # Cancellation
//! Scheduled delayed starts and one-shots cannot be cancelled through these
//! traits; no handle is returned for them.

#[cfg(feature = "rodio")]
pub mod rodio_backend;

use crate::audio::clip::ClipHandle;
use crate::audio::AudioError;
use crate::foundation::math::Point3;

/// Audio-emitting component bound to one target
pub trait PlaybackComponent {
    /// Bind the clip used by [`play`](Self::play) and [`play_delayed`](Self::play_delayed)
    fn set_clip(&mut self, clip: ClipHandle);

    /// Set the loop flag for subsequent starts
    fn set_looping(&mut self, looping: bool);

    /// Set the output volume (0.0 to 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Set the pitch multiplier (-3.0 to 3.0)
    fn set_pitch(&mut self, pitch: f32);

    /// Set the 2D/3D blend (0.0 = 2D, 1.0 = fully 3D)
    fn set_spatial_blend(&mut self, spatial_blend: f32);

    /// Start the bound clip from the beginning, restarting it if already playing
    fn play(&mut self) -> Result<(), AudioError>;

    /// Fire a single non-looping instance of `clip` without touching the current playback
    fn play_one_shot(&mut self, clip: ClipHandle) -> Result<(), AudioError>;

    /// Schedule the bound clip to start after `seconds`
    fn play_delayed(&mut self, seconds: f32) -> Result<(), AudioError>;
}

/// Source of playback components for host targets
pub trait PlaybackComponentProvider {
    /// Host object sounds are attached to
    type Target: ?Sized;

    /// Component type handed to the dispatcher
    type Component: PlaybackComponent;

    /// Component already attached to `target`, if any
    fn get_existing(&mut self, target: &Self::Target) -> Option<&mut Self::Component>;

    /// Attach a fresh component to `target` and return it
    fn attach_new(&mut self, target: &Self::Target) -> &mut Self::Component;
}

/// One-shot playback at a world position, independent of any target
pub trait PointPlayback {
    /// Play `clip` once at `location`; the host cleans up when it finishes
    fn play_clip_at_point(&mut self, clip: ClipHandle, location: Point3) -> Result<(), AudioError>;
}

/// World position lookup for host targets
pub trait TargetLocator {
    /// Host object being located
    type Target: ?Sized;

    /// Current world position of `target`, or `None` if it has none
    fn world_position(&self, target: &Self::Target) -> Option<Point3>;
}
