//! Host that logs playback instead of producing sound

use sound_registry::audio::backend::{
    PlaybackComponent, PlaybackComponentProvider, PointPlayback, TargetLocator,
};
use sound_registry::audio::{AudioError, ClipHandle, ClipStore};
use sound_registry::foundation::math::Point3;
use std::collections::HashMap;

/// Entity id used as playback target
pub type EntityId = u32;

fn clip_label(clips: &ClipStore, clip: Option<ClipHandle>) -> String {
    match clip.and_then(|handle| clips.get(handle)) {
        Some(audio) => audio
            .source()
            .and_then(|path| path.file_name())
            .map_or_else(|| "<memory>".to_string(), |name| name.to_string_lossy().into_owned()),
        None => "<none>".to_string(),
    }
}

/// Emitter attached to one entity
pub struct LoggingEmitter<'a> {
    entity: EntityId,
    clips: &'a ClipStore,
    clip: Option<ClipHandle>,
    looping: bool,
    volume: f32,
    pitch: f32,
    spatial_blend: f32,
}

impl<'a> LoggingEmitter<'a> {
    fn new(entity: EntityId, clips: &'a ClipStore) -> Self {
        Self {
            entity,
            clips,
            clip: None,
            looping: false,
            volume: 1.0,
            pitch: 1.0,
            spatial_blend: 0.0,
        }
    }

    fn bound_label(&self) -> Result<String, AudioError> {
        if self.clip.is_none() {
            return Err(AudioError::PlaybackFailed(format!(
                "entity {} has no clip bound",
                self.entity
            )));
        }
        Ok(clip_label(self.clips, self.clip))
    }
}

impl PlaybackComponent for LoggingEmitter<'_> {
    fn set_clip(&mut self, clip: ClipHandle) {
        self.clip = Some(clip);
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch;
    }

    fn set_spatial_blend(&mut self, spatial_blend: f32) {
        self.spatial_blend = spatial_blend;
    }

    fn play(&mut self) -> Result<(), AudioError> {
        log::info!(
            "[entity {}] play {} (loop={}, volume={:.2}, pitch={:.2}, blend={:.2})",
            self.entity,
            self.bound_label()?,
            self.looping,
            self.volume,
            self.pitch,
            self.spatial_blend
        );
        Ok(())
    }

    fn play_one_shot(&mut self, clip: ClipHandle) -> Result<(), AudioError> {
        log::info!(
            "[entity {}] one-shot {} (volume={:.2})",
            self.entity,
            clip_label(self.clips, Some(clip)),
            self.volume
        );
        Ok(())
    }

    fn play_delayed(&mut self, seconds: f32) -> Result<(), AudioError> {
        log::info!(
            "[entity {}] play {} in {:.2}s (loop={})",
            self.entity,
            self.bound_label()?,
            seconds,
            self.looping
        );
        Ok(())
    }
}

/// Logging host keyed by entity id
pub struct LoggingHost<'a> {
    clips: &'a ClipStore,
    emitters: HashMap<EntityId, LoggingEmitter<'a>>,
}

impl<'a> LoggingHost<'a> {
    /// Create a host labelling clips from `clips`
    pub fn new(clips: &'a ClipStore) -> Self {
        Self {
            clips,
            emitters: HashMap::new(),
        }
    }
}

impl<'a> PlaybackComponentProvider for LoggingHost<'a> {
    type Target = EntityId;
    type Component = LoggingEmitter<'a>;

    fn get_existing(&mut self, target: &EntityId) -> Option<&mut LoggingEmitter<'a>> {
        self.emitters.get_mut(target)
    }

    fn attach_new(&mut self, target: &EntityId) -> &mut LoggingEmitter<'a> {
        log::debug!("Attaching emitter to entity {}", target);
        let emitter = LoggingEmitter::new(*target, self.clips);
        self.emitters.entry(*target).or_insert(emitter)
    }
}

impl PointPlayback for LoggingHost<'_> {
    fn play_clip_at_point(&mut self, clip: ClipHandle, location: Point3) -> Result<(), AudioError> {
        log::info!(
            "[world] one-shot {} at ({:.1}, {:.1}, {:.1})",
            clip_label(self.clips, Some(clip)),
            location.x,
            location.y,
            location.z
        );
        Ok(())
    }
}

/// Entity positions of the demo scene
#[derive(Debug, Default)]
pub struct Scene {
    positions: HashMap<EntityId, Point3>,
}

impl Scene {
    /// Place an entity
    pub fn place(&mut self, entity: EntityId, position: Point3) {
        self.positions.insert(entity, position);
    }
}

impl TargetLocator for Scene {
    type Target = EntityId;

    fn world_position(&self, target: &EntityId) -> Option<Point3> {
        self.positions.get(target).copied()
    }
}
