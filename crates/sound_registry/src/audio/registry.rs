//! Sound registry
//!
//! Two-level index from group tag to clip name to [`SoundRecord`], built once
//! at startup and read-only afterwards. Lookups are two hash probes and never
//! mutate the registry, so a built registry can be shared freely between readers.

use crate::audio::group::SoundGroup;
use crate::audio::record::SoundRecord;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Errors raised while building a registry
///
/// Any of these aborts the build; no partially indexed registry is kept.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Two groups share a tag
    #[error("Duplicate sound group tag: {0}")]
    DuplicateGroupTag(String),

    /// Two records in one group share a clip name
    #[error("Duplicate clip name '{clip}' in sound group '{group}'")]
    DuplicateClipName {
        /// Tag of the offending group
        group: String,
        /// Repeated clip name
        clip: String,
    },

    /// `build` called on a registry that already holds an index
    #[error("Sound registry has already been built")]
    AlreadyBuilt,
}

/// Typed absence returned by [`SoundRegistry::resolve`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No group with this tag
    #[error("Sound group '{0}' not found")]
    GroupNotFound(String),

    /// Group exists but has no clip with this name
    #[error("Sound clip '{clip}' not found in group '{group}'")]
    ClipNotFound {
        /// Tag of the group that was searched
        group: String,
        /// Missing clip name
        clip: String,
    },
}

impl LookupError {
    /// Report the absence on the log channel
    pub fn log(&self) {
        match self {
            Self::GroupNotFound(group) => log::error!("Sound group not found: '{}'", group),
            Self::ClipNotFound { group, clip } => {
                log::error!("Sound clip not found: '{}' (group '{}')", clip, group);
            }
        }
    }
}

/// Index of sound groups by tag and clip name
#[derive(Debug, Default)]
pub struct SoundRegistry {
    groups: HashMap<String, HashMap<String, SoundRecord>>,
    built: bool,
}

impl SoundRegistry {
    /// Create an unbuilt registry; every lookup reports `GroupNotFound` until built
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and build a registry in one step
    pub fn from_groups<'a, I>(groups: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = &'a SoundGroup>,
    {
        let mut registry = Self::new();
        registry.build(groups)?;
        Ok(registry)
    }

    /// Index `groups`
    ///
    /// Runs once per registry. A failed build leaves the registry unbuilt and empty.
    ///
    /// # Errors
    /// - `AlreadyBuilt` if a previous build succeeded
    /// - `DuplicateGroupTag` if two groups share a tag
    /// - `DuplicateClipName` if two records in one group share a name
    pub fn build<'a, I>(&mut self, groups: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = &'a SoundGroup>,
    {
        if self.built {
            log::error!("Refusing to rebuild sound registry");
            return Err(RegistryError::AlreadyBuilt);
        }

        let index = Self::index(groups).map_err(|e| {
            log::error!("Sound registry build failed: {}", e);
            e
        })?;

        let record_count: usize = index.values().map(HashMap::len).sum();
        log::info!(
            "Sound registry built: {} group(s), {} record(s)",
            index.len(),
            record_count
        );

        self.groups = index;
        self.built = true;
        Ok(())
    }

    fn index<'a, I>(groups: I) -> Result<HashMap<String, HashMap<String, SoundRecord>>, RegistryError>
    where
        I: IntoIterator<Item = &'a SoundGroup>,
    {
        let mut index = HashMap::new();

        for group in groups {
            let slot = match index.entry(group.tag().to_owned()) {
                Entry::Occupied(_) => {
                    return Err(RegistryError::DuplicateGroupTag(group.tag().to_owned()));
                }
                Entry::Vacant(slot) => slot,
            };

            let mut clips = HashMap::with_capacity(group.len());
            for record in group.records() {
                match clips.entry(record.clip_name().to_owned()) {
                    Entry::Occupied(_) => {
                        return Err(RegistryError::DuplicateClipName {
                            group: group.tag().to_owned(),
                            clip: record.clip_name().to_owned(),
                        });
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(record.clone());
                    }
                }
            }

            log::debug!("Indexed sound group '{}' ({} clip(s))", group.tag(), clips.len());
            slot.insert(clips);
        }

        Ok(index)
    }

    /// Look up the record for `(group_tag, clip_name)`
    ///
    /// Keys match exactly: no case folding, no trimming.
    pub fn resolve(&self, group_tag: &str, clip_name: &str) -> Result<&SoundRecord, LookupError> {
        let clips = self
            .groups
            .get(group_tag)
            .ok_or_else(|| LookupError::GroupNotFound(group_tag.to_owned()))?;

        clips.get(clip_name).ok_or_else(|| LookupError::ClipNotFound {
            group: group_tag.to_owned(),
            clip: clip_name.to_owned(),
        })
    }

    /// Look up a record, reporting a miss on the log channel
    pub fn sound_data(&self, group_tag: &str, clip_name: &str) -> Option<&SoundRecord> {
        match self.resolve(group_tag, clip_name) {
            Ok(record) => Some(record),
            Err(err) => {
                err.log();
                None
            }
        }
    }

    /// Whether `(group_tag, clip_name)` resolves
    pub fn contains(&self, group_tag: &str, clip_name: &str) -> bool {
        self.resolve(group_tag, clip_name).is_ok()
    }

    /// Records of one group, in no particular order
    pub fn group(&self, group_tag: &str) -> Option<impl Iterator<Item = &SoundRecord>> {
        self.groups.get(group_tag).map(HashMap::values)
    }

    /// Tags of all indexed groups
    pub fn group_tags(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Whether `build` has succeeded
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Number of indexed groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Number of indexed records across all groups
    pub fn record_count(&self) -> usize {
        self.groups.values().map(HashMap::len).sum()
    }
}
