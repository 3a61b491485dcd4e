//! Playback dispatch
//!
//! Applies a resolved [`SoundRecord`] to a host playback component and triggers
//! it according to its [`PlayMode`]. The free functions only need the record;
//! [`SoundDispatcher`] adds the name-based variants that resolve through a
//! [`SoundRegistry`] first.
//!
//! Lookup misses and absent targets are no-ops. Misses are reported once, by the registry.

use crate::audio::backend::{
    PlaybackComponent, PlaybackComponentProvider, PointPlayback, TargetLocator,
};
use crate::audio::clip::ClipHandle;
use crate::audio::record::{PlayMode, SoundRecord};
use crate::audio::registry::SoundRegistry;
use crate::audio::AudioError;
use crate::foundation::math::Point3;

/// Configure and trigger `record` on the component attached to `target`
///
/// Reuses the target's existing component or asks the provider to attach one.
/// A `None` target is a no-op and returns `Ok(())`.
///
/// # Errors
/// Whatever the component returns when triggered.
pub fn play_on_target<P>(
    record: &SoundRecord,
    target: Option<&P::Target>,
    provider: &mut P,
) -> Result<(), AudioError>
where
    P: PlaybackComponentProvider,
{
    let Some(target) = target else {
        log::trace!("No target for '{}', skipping", record.clip_name());
        return Ok(());
    };

    if let Some(component) = provider.get_existing(target) {
        return apply(component, record);
    }
    apply(provider.attach_new(target), record)
}

/// Bind `record` to the target's component, triggering it only if the record
/// asks to play on create
///
/// # Errors
/// Whatever the component returns when triggered.
pub fn prepare_on_target<P>(
    record: &SoundRecord,
    target: Option<&P::Target>,
    provider: &mut P,
) -> Result<(), AudioError>
where
    P: PlaybackComponentProvider,
{
    let Some(target) = target else {
        return Ok(());
    };

    if let Some(component) = provider.get_existing(target) {
        return prepare(component, record);
    }
    prepare(provider.attach_new(target), record)
}

/// Play `clip` once at `location`
///
/// Fire-and-forget: backend failures are logged, nothing is returned.
pub fn play_at_location<Pt>(clip: ClipHandle, location: Point3, point: &mut Pt)
where
    Pt: PointPlayback + ?Sized,
{
    if let Err(err) = point.play_clip_at_point(clip, location) {
        log::warn!("Point playback at {:?} failed: {}", location, err);
    }
}

/// Play `clip` once at the current position of `target`
///
/// No-op when the target is absent or the locator has no position for it.
pub fn play_clip_at_target<L, Pt>(
    clip: ClipHandle,
    target: Option<&L::Target>,
    locator: &L,
    point: &mut Pt,
) where
    L: TargetLocator,
    Pt: PointPlayback + ?Sized,
{
    let Some(location) = target.and_then(|target| locator.world_position(target)) else {
        log::debug!("Target has no world position, skipping point playback");
        return;
    };
    play_at_location(clip, location, point);
}

fn apply<C>(component: &mut C, record: &SoundRecord) -> Result<(), AudioError>
where
    C: PlaybackComponent + ?Sized,
{
    configure(component, record);
    trigger(component, record)
}

fn prepare<C>(component: &mut C, record: &SoundRecord) -> Result<(), AudioError>
where
    C: PlaybackComponent + ?Sized,
{
    configure(component, record);
    if record.play_on_create() {
        trigger(component, record)
    } else {
        Ok(())
    }
}

fn configure<C>(component: &mut C, record: &SoundRecord)
where
    C: PlaybackComponent + ?Sized,
{
    component.set_looping(record.looping());
    component.set_clip(record.clip());
    component.set_volume(record.volume());
    component.set_pitch(record.pitch());
    component.set_spatial_blend(record.spatial_blend());
}

// No wildcard arm: a new PlayMode must be handled here before the crate compiles.
fn trigger<C>(component: &mut C, record: &SoundRecord) -> Result<(), AudioError>
where
    C: PlaybackComponent + ?Sized,
{
    log::debug!("Triggering '{}' ({:?})", record.clip_name(), record.play_mode());
    match record.play_mode() {
        PlayMode::Play => component.play(),
        PlayMode::PlayOneShot => component.play_one_shot(record.clip()),
        PlayMode::PlayDelayed => component.play_delayed(record.delay_seconds()),
    }
}

/// Name-based playback through a registry
///
/// Borrowing the registry keeps ownership with the host's startup code; any
/// number of dispatchers can share one registry.
#[derive(Debug, Clone, Copy)]
pub struct SoundDispatcher<'r> {
    registry: &'r SoundRegistry,
}

impl<'r> SoundDispatcher<'r> {
    /// Create a dispatcher over `registry`
    pub fn new(registry: &'r SoundRegistry) -> Self {
        Self { registry }
    }

    /// Registry used for name lookups
    pub fn registry(&self) -> &'r SoundRegistry {
        self.registry
    }

    /// Play a record on a target; see [`play_on_target`]
    ///
    /// # Errors
    /// Whatever the component returns when triggered.
    pub fn play_on_target<P>(
        &self,
        record: &SoundRecord,
        target: Option<&P::Target>,
        provider: &mut P,
    ) -> Result<(), AudioError>
    where
        P: PlaybackComponentProvider,
    {
        play_on_target(record, target, provider)
    }

    /// Resolve `(group_tag, clip_name)` and play it on `target`
    ///
    /// A failed lookup is logged by the registry and returns `Ok(())`.
    ///
    /// # Errors
    /// Whatever the component returns when triggered.
    pub fn play_named_on_target<P>(
        &self,
        group_tag: &str,
        clip_name: &str,
        target: Option<&P::Target>,
        provider: &mut P,
    ) -> Result<(), AudioError>
    where
        P: PlaybackComponentProvider,
    {
        match self.registry.sound_data(group_tag, clip_name) {
            Some(record) => play_on_target(record, target, provider),
            None => Ok(()),
        }
    }

    /// Resolve `(group_tag, clip_name)` and bind it to `target` without
    /// triggering, unless the record plays on create
    ///
    /// # Errors
    /// Whatever the component returns when triggered.
    pub fn prepare_named_on_target<P>(
        &self,
        group_tag: &str,
        clip_name: &str,
        target: Option<&P::Target>,
        provider: &mut P,
    ) -> Result<(), AudioError>
    where
        P: PlaybackComponentProvider,
    {
        match self.registry.sound_data(group_tag, clip_name) {
            Some(record) => prepare_on_target(record, target, provider),
            None => Ok(()),
        }
    }

    /// Play a clip once at a world position; see [`play_at_location`]
    pub fn play_at_location<Pt>(&self, clip: ClipHandle, location: Point3, point: &mut Pt)
    where
        Pt: PointPlayback + ?Sized,
    {
        play_at_location(clip, location, point);
    }

    /// Resolve `(group_tag, clip_name)` and play its clip once at `location`
    ///
    /// A failed lookup is logged by the registry only.
    pub fn play_named_at_location<Pt>(
        &self,
        group_tag: &str,
        clip_name: &str,
        location: Point3,
        point: &mut Pt,
    ) where
        Pt: PointPlayback + ?Sized,
    {
        if let Some(record) = self.registry.sound_data(group_tag, clip_name) {
            play_at_location(record.clip(), location, point);
        }
    }

    /// Resolve `(group_tag, clip_name)` and play its clip once where `target` is
    pub fn play_named_at_target<L, Pt>(
        &self,
        group_tag: &str,
        clip_name: &str,
        target: Option<&L::Target>,
        locator: &L,
        point: &mut Pt,
    ) where
        L: TargetLocator,
        Pt: PointPlayback + ?Sized,
    {
        if let Some(record) = self.registry.sound_data(group_tag, clip_name) {
            play_clip_at_target(record.clip(), target, locator, point);
        }
    }
}
