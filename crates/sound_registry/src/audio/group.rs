//! Sound groups

use crate::audio::record::SoundRecord;

/// Named, ordered bundle of sound records
///
/// Clip names must be unique within a group; the registry rejects duplicates at
/// build time instead of letting the later record win.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SoundGroup {
    tag: String,
    records: Vec<SoundRecord>,
}

impl SoundGroup {
    /// Create an empty group
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            records: Vec::new(),
        }
    }

    /// Create a group from existing records, keeping their order
    pub fn with_records(tag: impl Into<String>, records: Vec<SoundRecord>) -> Self {
        Self {
            tag: tag.into(),
            records,
        }
    }

    /// Append a record
    pub fn with_record(mut self, record: SoundRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Group tag, unique within a registry
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Records in authoring order
    pub fn records(&self) -> &[SoundRecord] {
        &self.records
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the group has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
