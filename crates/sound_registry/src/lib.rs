//! # Sound Registry
//!
//! Named sound groups, constant-time clip lookup and playback dispatch for game hosts.
//!
//! ## Features
//!
//! - **Sound Library Config**: Groups of clips described in RON or TOML
//! - **Registry**: Build-once `(group tag, clip name)` index with typed lookup misses
//! - **Dispatch**: Play, one-shot and delayed triggers on host-provided components
//! - **Point Playback**: Fire-and-forget sounds at a world position
//! - **Rodio Host**: Optional ready-made backend (`rodio` feature)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sound_registry::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let path = "assets/sounds.ron";
//!     let config = SoundLibraryConfig::load_from_file(path)?;
//!     logging::init_with_level(&config.log_level);
//!
//!     let mut clips = config.clip_store_relative_to(path);
//!     let groups = config.load_groups(&mut clips)?;
//!     let registry = SoundRegistry::from_groups(&groups)?;
//!
//!     let dispatcher = SoundDispatcher::new(&registry);
//!     // dispatcher.play_named_on_target("UI", "click", Some(&entity), &mut host)?;
//!     # let _ = dispatcher;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod foundation;
pub mod config;
pub mod audio;

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        audio::{
            AudioError, ClipHandle, ClipStore, LookupError, PlayMode, RegistryError,
            SoundDispatcher, SoundGroup, SoundRecord, SoundRegistry,
            backend::{PlaybackComponent, PlaybackComponentProvider, PointPlayback, TargetLocator},
            dispatcher::{play_at_location, play_on_target, prepare_on_target},
            library::SoundLibraryConfig,
        },
        config::{Config, ConfigError},
        foundation::{
            logging,
            math::{Point3, Vec3},
        },
    };
}
