//! Rodio playback host
//!
//! Implements the playback capabilities on top of the Rodio library.
//! Rodio is pure Rust and supports WAV, OGG Vorbis, MP3, and FLAC formats.
//!
//! Each target gets a [`RodioEmitter`] owning one main sink for `play()`;
//! one-shots run on detached sinks so they never interrupt it, and delayed
//! starts get their own sinks so repeated calls schedule independent starts.
//! An emitter with a spatial blend above zero and a known target position
//! (see [`RodioHost::set_position`]) plays through a [`SpatialSink`] placed at
//! that position. Rodio has no partial blend, so any non-zero blend is fully
//! positional. Point playback uses a detached [`SpatialSink`]; attenuation and
//! panning are Rodio's.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sound_registry::audio::{ClipStore, SoundRecord, SoundRegistry, SoundGroup};
//! use sound_registry::audio::backend::rodio_backend::{RodioHost, RodioHostConfig};
//! use sound_registry::audio::dispatcher::play_on_target;
//!
//! let mut clips = ClipStore::with_root("assets/audio");
//! let click = clips.load("click.wav").unwrap();
//! let groups = [SoundGroup::new("UI").with_record(SoundRecord::new("click", click))];
//! let registry = SoundRegistry::from_groups(&groups).unwrap();
//!
//! let mut host = RodioHost::<u32>::new(Arc::new(clips), RodioHostConfig::default()).unwrap();
//! let record = registry.resolve("UI", "click").unwrap();
//! play_on_target(record, Some(&1), &mut host).unwrap();
//! ```

use super::{PlaybackComponent, PlaybackComponentProvider, PointPlayback, TargetLocator};
use crate::audio::clip::{ClipHandle, ClipStore};
use crate::audio::record::DELAY_RANGE;
use crate::audio::AudioError;
use crate::foundation::math::{point_to_array, utils::clamp_finite, Point3, Vec3};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, SpatialSink};
use std::collections::HashMap;
use std::hash::Hash;
use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

/// Slowest playback speed Rodio is driven at
const MIN_SPEED: f32 = 0.01;

/// Decoder over shared clip bytes
type ClipDecoder = Decoder<Cursor<Arc<[u8]>>>;

/// Configuration for the Rodio host
#[derive(Debug, Clone)]
pub struct RodioHostConfig {
    /// Distance between the listener's ears, in world units
    pub ear_spacing: f32,
    /// Initial listener position
    pub listener_position: Point3,
}

impl Default for RodioHostConfig {
    fn default() -> Self {
        Self {
            ear_spacing: 0.2,
            listener_position: Point3::origin(),
        }
    }
}

/// Rodio has no reverse playback; negative pitch plays forward at the same rate
fn playback_speed(pitch: f32) -> f32 {
    pitch.abs().max(MIN_SPEED)
}

/// Where a sound should be emitted from, or `None` for flat stereo
fn spatial_origin(spatial_blend: f32, position: Option<[f32; 3]>) -> Option<[f32; 3]> {
    if spatial_blend > 0.0 {
        position
    } else {
        None
    }
}

/// Stereo or positional Rodio sink
enum EmitterSink {
    Flat(Sink),
    Spatial(SpatialSink),
}

impl EmitterSink {
    fn append(&self, source: impl Source<Item = i16> + Send + 'static) {
        match self {
            Self::Flat(sink) => sink.append(source),
            Self::Spatial(sink) => sink.append(source),
        }
    }

    fn set_volume(&self, volume: f32) {
        match self {
            Self::Flat(sink) => sink.set_volume(volume),
            Self::Spatial(sink) => sink.set_volume(volume),
        }
    }

    fn set_speed(&self, speed: f32) {
        match self {
            Self::Flat(sink) => sink.set_speed(speed),
            Self::Spatial(sink) => sink.set_speed(speed),
        }
    }

    fn stop(&self) {
        match self {
            Self::Flat(sink) => sink.stop(),
            Self::Spatial(sink) => sink.stop(),
        }
    }

    fn empty(&self) -> bool {
        match self {
            Self::Flat(sink) => sink.empty(),
            Self::Spatial(sink) => sink.empty(),
        }
    }

    fn detach(self) {
        match self {
            Self::Flat(sink) => sink.detach(),
            Self::Spatial(sink) => sink.detach(),
        }
    }
}

fn decode(clips: &ClipStore, clip: ClipHandle) -> Result<ClipDecoder, AudioError> {
    let audio = clips.get(clip).ok_or(AudioError::InvalidHandle)?;
    Decoder::new(Cursor::new(audio.shared_data()))
        .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {}", e)))
}

/// Playback component bound to one target
pub struct RodioEmitter {
    stream_handle: OutputStreamHandle,
    clips: Arc<ClipStore>,
    clip: Option<ClipHandle>,
    looping: bool,
    volume: f32,
    pitch: f32,
    spatial_blend: f32,
    /// Target position, refreshed whenever the host hands the emitter out
    position: Option<[f32; 3]>,
    ears: ([f32; 3], [f32; 3]),
    /// Sink driven by `play()`; replacing it stops the previous sound
    sink: Option<EmitterSink>,
    /// Sinks created by `play_delayed()`
    scheduled: Vec<EmitterSink>,
}

impl RodioEmitter {
    fn new(stream_handle: OutputStreamHandle, clips: Arc<ClipStore>) -> Self {
        Self {
            stream_handle,
            clips,
            clip: None,
            looping: false,
            volume: 1.0,
            pitch: 1.0,
            spatial_blend: 0.0,
            position: None,
            ears: ([0.0; 3], [0.0; 3]),
            sink: None,
            scheduled: Vec::new(),
        }
    }

    fn place(&mut self, position: Option<[f32; 3]>, ears: ([f32; 3], [f32; 3])) {
        self.position = position;
        self.ears = ears;
    }

    /// Stop the main sink and every scheduled start
    pub fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        for sink in self.scheduled.drain(..) {
            sink.stop();
        }
    }

    /// Drop finished scheduled sinks
    fn prune(&mut self) {
        self.scheduled.retain(|sink| !sink.empty());
    }

    fn new_sink(&self) -> Result<EmitterSink, AudioError> {
        let sink = match spatial_origin(self.spatial_blend, self.position) {
            Some(origin) => {
                let (left_ear, right_ear) = self.ears;
                SpatialSink::try_new(&self.stream_handle, origin, left_ear, right_ear)
                    .map(EmitterSink::Spatial)
            }
            None => Sink::try_new(&self.stream_handle).map(EmitterSink::Flat),
        }
        .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {}", e)))?;
        sink.set_volume(self.volume);
        sink.set_speed(playback_speed(self.pitch));
        Ok(sink)
    }

    fn start_bound_clip(&self, delay: Duration) -> Result<EmitterSink, AudioError> {
        let clip = self
            .clip
            .ok_or_else(|| AudioError::PlaybackFailed("No clip bound to emitter".to_string()))?;
        let source = decode(&self.clips, clip)?;
        let sink = self.new_sink()?;

        if self.looping {
            sink.append(source.repeat_infinite().delay(delay));
        } else {
            sink.append(source.delay(delay));
        }
        Ok(sink)
    }
}

impl PlaybackComponent for RodioEmitter {
    fn set_clip(&mut self, clip: ClipHandle) {
        self.clip = Some(clip);
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
        if let Some(sink) = &self.sink {
            sink.set_speed(playback_speed(pitch));
        }
    }

    fn set_spatial_blend(&mut self, spatial_blend: f32) {
        self.spatial_blend = spatial_blend;
    }

    fn play(&mut self) -> Result<(), AudioError> {
        let sink = self.start_bound_clip(Duration::ZERO)?;
        // Dropping the previous sink stops it
        self.sink = Some(sink);
        Ok(())
    }

    fn play_one_shot(&mut self, clip: ClipHandle) -> Result<(), AudioError> {
        let source = decode(&self.clips, clip)?;
        let sink = self.new_sink()?;
        sink.append(source);
        sink.detach();
        Ok(())
    }

    fn play_delayed(&mut self, seconds: f32) -> Result<(), AudioError> {
        let delay = Duration::from_secs_f32(clamp_finite(seconds, DELAY_RANGE.0, DELAY_RANGE.1, 0.0));
        let sink = self.start_bound_clip(delay)?;
        self.prune();
        self.scheduled.push(sink);
        Ok(())
    }
}

/// Rodio-based playback host keyed by target id
pub struct RodioHost<K> {
    /// Audio output stream (must be kept alive)
    _output_stream: OutputStream,
    stream_handle: OutputStreamHandle,
    clips: Arc<ClipStore>,
    emitters: HashMap<K, RodioEmitter>,
    positions: HashMap<K, Point3>,
    config: RodioHostConfig,
}

impl<K: Hash + Eq + Clone> RodioHost<K> {
    /// Open the default output device
    ///
    /// # Errors
    /// - `BackendInitFailed` if no output stream can be created
    pub fn new(clips: Arc<ClipStore>, config: RodioHostConfig) -> Result<Self, AudioError> {
        let (stream, stream_handle) = OutputStream::try_default().map_err(|e| {
            AudioError::BackendInitFailed(format!("Failed to create audio output: {}", e))
        })?;

        log::info!("Rodio audio host initialized ({} clip(s))", clips.len());
        Ok(Self {
            _output_stream: stream,
            stream_handle,
            clips,
            emitters: HashMap::new(),
            positions: HashMap::new(),
            config,
        })
    }

    /// Move the listener
    pub fn set_listener_position(&mut self, position: Point3) {
        self.config.listener_position = position;
    }

    /// Record the world position of a target
    ///
    /// Sounds already playing keep the position they started at.
    pub fn set_position(&mut self, target: K, position: Point3) {
        self.positions.insert(target, position);
    }

    fn placement(&self, target: &K) -> (Option<[f32; 3]>, ([f32; 3], [f32; 3])) {
        (self.positions.get(target).map(point_to_array), self.ears())
    }

    /// Forget a target, stopping its emitter
    pub fn remove_target(&mut self, target: &K) {
        if let Some(mut emitter) = self.emitters.remove(target) {
            emitter.stop();
        }
        self.positions.remove(target);
    }

    /// Cleanup finished scheduled sounds (call once per frame)
    pub fn update(&mut self) {
        for emitter in self.emitters.values_mut() {
            emitter.prune();
        }
    }

    /// Stop every emitter
    pub fn stop_all(&mut self) {
        for emitter in self.emitters.values_mut() {
            emitter.stop();
        }
    }

    /// Number of targets with an attached emitter
    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    fn ears(&self) -> ([f32; 3], [f32; 3]) {
        let offset = Vec3::x() * (self.config.ear_spacing * 0.5);
        let listener = self.config.listener_position;
        (point_to_array(&(listener - offset)), point_to_array(&(listener + offset)))
    }
}

impl<K: Hash + Eq + Clone> PlaybackComponentProvider for RodioHost<K> {
    type Target = K;
    type Component = RodioEmitter;

    fn get_existing(&mut self, target: &K) -> Option<&mut RodioEmitter> {
        let (position, ears) = self.placement(target);
        let emitter = self.emitters.get_mut(target)?;
        emitter.place(position, ears);
        Some(emitter)
    }

    fn attach_new(&mut self, target: &K) -> &mut RodioEmitter {
        let (position, ears) = self.placement(target);
        let emitter = self
            .emitters
            .entry(target.clone())
            .or_insert_with(|| RodioEmitter::new(self.stream_handle.clone(), Arc::clone(&self.clips)));
        emitter.place(position, ears);
        emitter
    }
}

impl<K: Hash + Eq + Clone> PointPlayback for RodioHost<K> {
    fn play_clip_at_point(&mut self, clip: ClipHandle, location: Point3) -> Result<(), AudioError> {
        let source = decode(&self.clips, clip)?;
        let (left_ear, right_ear) = self.ears();
        let sink = SpatialSink::try_new(
            &self.stream_handle,
            point_to_array(&location),
            left_ear,
            right_ear,
        )
        .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create spatial sink: {}", e)))?;
        sink.append(source);
        sink.detach();
        Ok(())
    }
}

impl<K: Hash + Eq + Clone> TargetLocator for RodioHost<K> {
    type Target = K;

    fn world_position(&self, target: &K) -> Option<Point3> {
        self.positions.get(target).copied()
    }
}

impl<K> Drop for RodioHost<K> {
    fn drop(&mut self) {
        for emitter in self.emitters.values_mut() {
            emitter.stop();
        }
        log::info!("Rodio audio host shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_store() -> Arc<ClipStore> {
        Arc::new(ClipStore::new())
    }

    #[test]
    fn test_playback_speed() {
        assert_eq!(playback_speed(1.0), 1.0);
        assert_eq!(playback_speed(-2.0), 2.0);
        assert_eq!(playback_speed(0.0), MIN_SPEED);
    }

    #[test]
    fn test_spatial_origin() {
        let at = Some([1.0, 2.0, 3.0]);
        assert_eq!(spatial_origin(0.0, at), None);
        assert_eq!(spatial_origin(0.5, at), at);
        assert_eq!(spatial_origin(1.0, None), None);
    }

    #[test]
    fn test_emitter_follows_target_position() {
        if let Ok(mut host) = RodioHost::<u32>::new(empty_store(), RodioHostConfig::default()) {
            host.attach_new(&4);
            assert_eq!(host.get_existing(&4).and_then(|e| e.position), None);

            host.set_position(4, Point3::new(1.0, 0.0, -2.0));
            assert_eq!(host.get_existing(&4).and_then(|e| e.position), Some([1.0, 0.0, -2.0]));
        }
    }

    #[test]
    fn test_host_initialization() {
        // May fail in CI/test environments without audio device
        if let Ok(host) = RodioHost::<u32>::new(empty_store(), RodioHostConfig::default()) {
            assert_eq!(host.emitter_count(), 0);
        }
    }

    #[test]
    fn test_attach_reuses_emitter() {
        if let Ok(mut host) = RodioHost::<u32>::new(empty_store(), RodioHostConfig::default()) {
            assert!(host.get_existing(&7).is_none());
            host.attach_new(&7).set_volume(0.25);
            host.attach_new(&7);
            assert_eq!(host.emitter_count(), 1);
            assert_eq!(host.get_existing(&7).map(|e| e.volume), Some(0.25));
        }
    }

    #[test]
    fn test_invalid_clip_handle() {
        let mut other = ClipStore::new();
        let foreign = other.insert_bytes(b"RIFF....WAVE").unwrap();

        if let Ok(mut host) = RodioHost::<u32>::new(empty_store(), RodioHostConfig::default()) {
            let emitter = host.attach_new(&1);
            assert!(matches!(emitter.play_one_shot(foreign), Err(AudioError::InvalidHandle)));
            assert!(matches!(
                host.play_clip_at_point(foreign, Point3::origin()),
                Err(AudioError::InvalidHandle)
            ));
        }
    }

    #[test]
    fn test_play_without_clip() {
        if let Ok(mut host) = RodioHost::<u32>::new(empty_store(), RodioHostConfig::default()) {
            let emitter = host.attach_new(&1);
            assert!(matches!(emitter.play(), Err(AudioError::PlaybackFailed(_))));
        }
    }

    #[test]
    fn test_positions() {
        if let Ok(mut host) = RodioHost::<u32>::new(empty_store(), RodioHostConfig::default()) {
            host.set_position(3, Point3::new(1.0, 2.0, 3.0));
            assert_eq!(host.world_position(&3), Some(Point3::new(1.0, 2.0, 3.0)));
            host.remove_target(&3);
            assert_eq!(host.world_position(&3), None);
        }
    }
}
