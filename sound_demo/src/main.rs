//! Sound registry demo
//!
//! Loads a sound library, builds the registry and dispatches a scripted
//! sequence of sounds. By default the host only logs what it is asked to play;
//! build with `--features rodio` to hear it on the default output device.
//!
//! Usage: `sound_demo [path/to/library.ron]`

mod logging_host;

use logging_host::{EntityId, Scene};
use sound_registry::prelude::*;
use std::path::PathBuf;

const DEFAULT_LIBRARY: &str = "sound_demo/assets/sounds.ron";

const PLAYER: EntityId = 1;
const CAMPFIRE: EntityId = 2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_LIBRARY), PathBuf::from);

    let config = SoundLibraryConfig::load_from_file(&path)?;
    logging::init_with_level(&config.log_level);
    log::info!("Starting sound demo with library {}", path.display());

    config.validate()?;
    let mut clips = config.clip_store_relative_to(&path);
    let groups = config.load_groups(&mut clips)?;
    // Duplicates abort startup; a half-built registry is never used
    let registry = SoundRegistry::from_groups(&groups)?;
    let dispatcher = SoundDispatcher::new(&registry);

    let mut scene = Scene::default();
    scene.place(PLAYER, Point3::origin());
    scene.place(CAMPFIRE, Point3::new(4.0, 0.0, -3.0));

    run(&dispatcher, &scene, clips)?;

    log::info!("Sound demo finished");
    Ok(())
}

#[cfg(not(feature = "rodio"))]
fn run(dispatcher: &SoundDispatcher<'_>, scene: &Scene, clips: ClipStore) -> Result<(), AudioError> {
    let mut host = logging_host::LoggingHost::new(&clips);
    play_script(dispatcher, scene, &mut host)
}

#[cfg(feature = "rodio")]
fn run(dispatcher: &SoundDispatcher<'_>, scene: &Scene, clips: ClipStore) -> Result<(), AudioError> {
    use sound_registry::audio::backend::rodio_backend::{RodioHost, RodioHostConfig};
    use std::sync::Arc;
    use std::time::Duration;

    let mut host = RodioHost::<EntityId>::new(Arc::new(clips), RodioHostConfig::default())?;
    play_script(dispatcher, scene, &mut host)?;

    // Let the scheduled and looping sounds run for a moment
    for _ in 0..30 {
        std::thread::sleep(Duration::from_millis(100));
        host.update();
    }
    host.stop_all();
    Ok(())
}

fn play_script<H>(dispatcher: &SoundDispatcher<'_>, scene: &Scene, host: &mut H) -> Result<(), AudioError>
where
    H: PlaybackComponentProvider<Target = EntityId> + PointPlayback,
{
    // Ambience binds to the campfire and starts itself
    dispatcher.prepare_named_on_target("Ambience", "wind", Some(&CAMPFIRE), host)?;

    // Overlapping one-shots on the same entity
    dispatcher.play_named_on_target("UI", "click", Some(&PLAYER), host)?;
    dispatcher.play_named_on_target("UI", "click", Some(&PLAYER), host)?;

    dispatcher.play_named_on_target("SFX", "door", Some(&PLAYER), host)?;

    // Nothing to play on
    dispatcher.play_named_on_target("UI", "click", None, host)?;

    dispatcher.play_named_at_target("SFX", "explosion", Some(&CAMPFIRE), scene, host);
    dispatcher.play_named_at_location("SFX", "explosion", Point3::new(-6.0, 1.0, 2.0), host);

    // Misses are reported by the registry and skipped
    dispatcher.play_named_on_target("UI", "does_not_exist", Some(&PLAYER), host)?;
    dispatcher.play_named_on_target("Voice", "greeting", Some(&PLAYER), host)?;

    Ok(())
}
