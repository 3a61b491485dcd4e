//! Sound library configuration
//!
//! Serializable description of every sound group a host registers at startup.
//! Clip paths are turned into [`ClipHandle`]s by the caller, usually through a
//! [`ClipStore`], and the resulting [`SoundGroup`]s are handed to
//! [`SoundRegistry::build`](crate::audio::SoundRegistry::build).
//!
//! ```ron
//! (
//!     log_level: "info",
//!     clip_root: Some("assets/audio"),
//!     groups: [
//!         (
//!             tag: "UI",
//!             sounds: [
//!                 (clip_name: "click", clip: "click.wav", play_mode: PlayOneShot, volume: 0.8),
//!             ],
//!         ),
//!     ],
//! )
//! ```

use crate::audio::clip::{ClipHandle, ClipStore};
use crate::audio::group::SoundGroup;
use crate::audio::record::{PlayMode, SoundRecord};
use crate::audio::AudioError;
use crate::config::{Config, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Sound library loaded at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundLibraryConfig {
    /// Default log filter for hosts that initialise logging from this file
    pub log_level: String,
    /// Directory clip paths are relative to
    pub clip_root: Option<String>,
    /// Group definitions in registration order
    pub groups: Vec<SoundGroupConfig>,
}

impl Default for SoundLibraryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            clip_root: None,
            groups: Vec::new(),
        }
    }
}

impl Config for SoundLibraryConfig {}

/// One group definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundGroupConfig {
    /// Unique group tag
    pub tag: String,
    /// Records in authoring order
    #[serde(default)]
    pub sounds: Vec<SoundRecordConfig>,
}

/// One record definition
///
/// Values outside their ranges are accepted here and clamped when the record is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundRecordConfig {
    /// Name unique within the group
    pub clip_name: String,
    /// Path of the audio file
    pub clip: String,
    /// Trigger mode
    #[serde(default)]
    pub play_mode: PlayMode,
    /// Loop flag
    #[serde(default, rename = "loop")]
    pub looping: bool,
    /// Volume (0.0 to 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,
    /// Pitch (-3.0 to 3.0)
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    /// Spatial blend (0.0 to 1.0)
    #[serde(default)]
    pub spatial_blend: f32,
    /// Delay for [`PlayMode::PlayDelayed`] (0 to 100 seconds)
    #[serde(default)]
    pub delay_seconds: f32,
    /// Trigger when first bound to a component
    #[serde(default)]
    pub play_on_create: bool,
}

const fn default_volume() -> f32 {
    1.0
}

const fn default_pitch() -> f32 {
    1.0
}

impl SoundRecordConfig {
    /// Build the clamped record for an already resolved clip
    pub fn to_record(&self, clip: ClipHandle) -> SoundRecord {
        SoundRecord::new(self.clip_name.clone(), clip)
            .with_play_mode(self.play_mode)
            .with_looping(self.looping)
            .with_volume(self.volume)
            .with_pitch(self.pitch)
            .with_spatial_blend(self.spatial_blend)
            .with_delay_seconds(self.delay_seconds)
            .with_play_on_create(self.play_on_create)
    }
}

impl SoundLibraryConfig {
    /// Reject duplicate group tags and duplicate clip names before any clip is loaded
    ///
    /// # Errors
    /// `InvalidLibrary` naming the first duplicate tag or clip name found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut tags = HashSet::new();
        for group in &self.groups {
            if !tags.insert(group.tag.as_str()) {
                return Err(ConfigError::InvalidLibrary(format!(
                    "duplicate group tag '{}'",
                    group.tag
                )));
            }

            let mut names = HashSet::new();
            for sound in &group.sounds {
                if !names.insert(sound.clip_name.as_str()) {
                    return Err(ConfigError::InvalidLibrary(format!(
                        "duplicate clip name '{}' in group '{}'",
                        sound.clip_name, group.tag
                    )));
                }
            }
        }
        Ok(())
    }

    /// Turn the definitions into groups, resolving clip paths with `resolve_clip`
    ///
    /// # Errors
    /// The first error `resolve_clip` returns; later clips are not resolved.
    pub fn build_groups<F, E>(&self, mut resolve_clip: F) -> Result<Vec<SoundGroup>, E>
    where
        F: FnMut(&str) -> Result<ClipHandle, E>,
    {
        self.groups
            .iter()
            .map(|group| -> Result<SoundGroup, E> {
                let records = group
                    .sounds
                    .iter()
                    .map(|sound| resolve_clip(&sound.clip).map(|clip| sound.to_record(clip)))
                    .collect::<Result<Vec<_>, E>>()?;
                Ok(SoundGroup::with_records(group.tag.clone(), records))
            })
            .collect()
    }

    /// Load every referenced clip into `store` and build the groups
    ///
    /// # Errors
    /// - `Io` if a clip file cannot be read
    /// - `InvalidClip` if a clip file is empty or in an unknown format
    pub fn load_groups(&self, store: &mut ClipStore) -> Result<Vec<SoundGroup>, AudioError> {
        let groups = self.build_groups(|path| store.load(path))?;
        log::info!(
            "Loaded sound library: {} group(s), {} clip file(s)",
            groups.len(),
            store.len()
        );
        Ok(groups)
    }

    /// Clip store for a library loaded from `library_path`
    ///
    /// `clip_root` is relative to the directory holding the library file, and
    /// clips are looked up there directly when no root is set.
    pub fn clip_store_relative_to(&self, library_path: impl AsRef<Path>) -> ClipStore {
        let base = library_path
            .as_ref()
            .parent()
            .unwrap_or_else(|| Path::new(""));
        match &self.clip_root {
            Some(root) => ClipStore::with_root(base.join(root)),
            None => ClipStore::with_root(base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"(
        log_level: "debug",
        groups: [
            (
                tag: "UI",
                sounds: [
                    (clip_name: "click", clip: "click.wav", play_mode: PlayOneShot, volume: 0.8),
                    (clip_name: "hover", clip: "hover.wav", volume: 4.0, pitch: -7.0),
                ],
            ),
            (
                tag: "Ambience",
                sounds: [
                    (clip_name: "wind", clip: "wind.ogg", loop: true, spatial_blend: 1.0),
                    (clip_name: "door", clip: "door.wav", play_mode: PlayDelayed, delay_seconds: 2.0),
                ],
            ),
        ],
    )"#;

    #[test]
    fn test_parse_ron_library() {
        let config = SoundLibraryConfig::from_ron_str(LIBRARY).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.clip_root, None);
        assert_eq!(config.groups.len(), 2);

        let click = &config.groups[0].sounds[0];
        assert_eq!(click.play_mode, PlayMode::PlayOneShot);
        assert_eq!(click.volume, 0.8);
        assert_eq!(click.pitch, 1.0);

        let wind = &config.groups[1].sounds[0];
        assert!(wind.looping);
        assert_eq!(wind.play_mode, PlayMode::Play);
        assert_eq!(wind.volume, 1.0);
    }

    #[test]
    fn test_parse_toml_library() {
        let toml = r#"
            log_level = "warn"
            clip_root = "assets"

            [[groups]]
            tag = "SFX"

            [[groups.sounds]]
            clip_name = "boom"
            clip = "boom.wav"
            play_mode = "PlayDelayed"
            delay_seconds = 0.5
        "#;

        let config = SoundLibraryConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.clip_root.as_deref(), Some("assets"));
        assert_eq!(config.groups[0].sounds[0].play_mode, PlayMode::PlayDelayed);
        assert_eq!(config.groups[0].sounds[0].delay_seconds, 0.5);
    }

    #[test]
    fn test_build_groups_clamps_and_keeps_order() {
        let config = SoundLibraryConfig::from_ron_str(LIBRARY).unwrap();
        let mut store = ClipStore::new();

        let groups = config
            .build_groups(|_| store.insert_bytes(b"RIFF....WAVE"))
            .unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].tag(), "UI");
        let names: Vec<_> = groups[0].records().iter().map(SoundRecord::clip_name).collect();
        assert_eq!(names, vec!["click", "hover"]);

        let hover = &groups[0].records()[1];
        assert_eq!(hover.volume(), 1.0);
        assert_eq!(hover.pitch(), -3.0);

        let door = &groups[1].records()[1];
        assert_eq!(door.play_mode(), PlayMode::PlayDelayed);
        assert_eq!(door.delay_seconds(), 2.0);
    }

    #[test]
    fn test_build_groups_stops_on_resolve_error() {
        let config = SoundLibraryConfig::from_ron_str(LIBRARY).unwrap();
        let mut calls = 0;

        let result: Result<Vec<SoundGroup>, String> = config.build_groups(|path| {
            calls += 1;
            Err(format!("cannot load {path}"))
        });

        assert_eq!(result.unwrap_err(), "cannot load click.wav");
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let mut config = SoundLibraryConfig::from_ron_str(LIBRARY).unwrap();
        assert!(config.validate().is_ok());

        config.groups[1].tag = "UI".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLibrary(_))));

        let mut config = SoundLibraryConfig::from_ron_str(LIBRARY).unwrap();
        config.groups[0].sounds[1].clip_name = "click".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidLibrary(_))));
    }

    #[test]
    fn test_load_groups_missing_files() {
        let mut config = SoundLibraryConfig::from_ron_str(LIBRARY).unwrap();
        config.clip_root = Some("definitely/not/here".to_string());
        let mut store = config.clip_store_relative_to("sounds.ron");

        assert!(matches!(config.load_groups(&mut store), Err(AudioError::Io(_))));
    }

    #[test]
    fn test_clip_root_relative_to_library_file() {
        let dir = tempfile::tempdir().unwrap();
        let audio = dir.path().join("audio");
        std::fs::create_dir(&audio).unwrap();
        for name in ["click.wav", "hover.wav", "wind.ogg", "door.wav"] {
            std::fs::write(audio.join(name), b"RIFF....WAVE").unwrap();
        }

        let mut config = SoundLibraryConfig::from_ron_str(LIBRARY).unwrap();
        config.clip_root = Some("audio".to_string());
        let library_path = dir.path().join("sounds.ron");
        config.save_to_file(&library_path).unwrap();

        let mut store = config.clip_store_relative_to(&library_path);
        let groups = config.load_groups(&mut store).unwrap();

        assert_eq!(store.len(), 4);
        let click = groups[0].records()[0].clip();
        assert_eq!(store.handle_for("click.wav"), Some(click));
        assert_eq!(store.get(click).unwrap().source(), Some(audio.join("click.wav").as_path()));
    }

    #[test]
    fn test_ron_round_trip_file() {
        let config = SoundLibraryConfig::from_ron_str(LIBRARY).unwrap();
        let file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();

        config.save_to_file(file.path()).unwrap();
        let loaded = SoundLibraryConfig::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }
}
