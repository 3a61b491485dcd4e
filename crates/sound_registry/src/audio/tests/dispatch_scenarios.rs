//! End-to-end dispatch scenarios: registry lookup through to host calls

use super::mock_host::{Call, RecordingHost};
use crate::audio::clip::{ClipHandle, ClipStore};
use crate::audio::dispatcher::{play_at_location, play_on_target, prepare_on_target};
use crate::audio::{PlayMode, SoundDispatcher, SoundGroup, SoundRecord, SoundRegistry};
use crate::foundation::math::Point3;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Fixture {
        registry: SoundRegistry,
        click: ClipHandle,
        music: ClipHandle,
        door: ClipHandle,
    }

    fn fixture() -> Fixture {
        let mut store = ClipStore::new();
        let click = store.insert_bytes(b"RIFF....WAVE").unwrap();
        let music = store.insert_bytes(b"OggS....").unwrap();
        let door = store.insert_bytes(b"fLaC....").unwrap();

        let groups = vec![
            SoundGroup::new("UI").with_record(
                SoundRecord::new("click", click)
                    .with_play_mode(PlayMode::PlayOneShot)
                    .with_volume(0.8),
            ),
            SoundGroup::new("Ambience")
                .with_record(
                    SoundRecord::new("music", music)
                        .with_looping(true)
                        .with_volume(0.5)
                        .with_pitch(1.25)
                        .with_spatial_blend(0.75),
                )
                .with_record(
                    SoundRecord::new("door", door)
                        .with_play_mode(PlayMode::PlayDelayed)
                        .with_delay_seconds(2.0)
                        .with_play_on_create(true),
                ),
        ];

        Fixture {
            registry: SoundRegistry::from_groups(&groups).unwrap(),
            click,
            music,
            door,
        }
    }

    #[test]
    fn test_absent_target_is_noop() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let record = fx.registry.resolve("UI", "click").unwrap();

        assert!(play_on_target(record, None, &mut host).is_ok());
        assert_eq!(host.attach_count, 0);
        assert!(host.components.is_empty());
    }

    #[test]
    fn test_play_configures_then_starts() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let record = fx.registry.resolve("Ambience", "music").unwrap();

        play_on_target(record, Some(&1), &mut host).unwrap();

        assert_eq!(
            host.component(1).calls,
            vec![
                Call::SetLooping(true),
                Call::SetClip(fx.music),
                Call::SetVolume(0.5),
                Call::SetPitch(1.25),
                Call::SetSpatialBlend(0.75),
                Call::Play,
            ]
        );
    }

    #[test]
    fn test_delayed_schedules_once_per_call() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let record = fx.registry.resolve("Ambience", "door").unwrap();

        play_on_target(record, Some(&4), &mut host).unwrap();
        let component = host.component(4);
        assert_eq!(component.triggers(), vec![&Call::PlayDelayed(2.0)]);
        assert_eq!(component.count(&Call::Play), 0);

        play_on_target(record, Some(&4), &mut host).unwrap();
        let component = host.component(4);
        assert_eq!(component.count(&Call::PlayDelayed(2.0)), 2);
        assert_eq!(component.count(&Call::Play), 0);
    }

    #[test]
    fn test_one_shots_do_not_cancel_each_other() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let dispatcher = SoundDispatcher::new(&fx.registry);

        dispatcher.play_named_on_target("UI", "click", Some(&9), &mut host).unwrap();
        dispatcher.play_named_on_target("UI", "click", Some(&9), &mut host).unwrap();

        let component = host.component(9);
        assert_eq!(
            component.triggers(),
            vec![&Call::PlayOneShot(fx.click), &Call::PlayOneShot(fx.click)]
        );
        assert_eq!(host.attach_count, 1);
    }

    #[test]
    fn test_one_shot_leaves_running_loop_alone() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let dispatcher = SoundDispatcher::new(&fx.registry);

        dispatcher.play_named_on_target("Ambience", "music", Some(&2), &mut host).unwrap();
        dispatcher.play_named_on_target("UI", "click", Some(&2), &mut host).unwrap();

        let component = host.component(2);
        assert_eq!(component.triggers(), vec![&Call::Play, &Call::PlayOneShot(fx.click)]);
        assert_eq!(component.count(&Call::Play), 1);
    }

    #[test]
    fn test_existing_component_reused() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let record = fx.registry.resolve("Ambience", "music").unwrap();

        play_on_target(record, Some(&1), &mut host).unwrap();
        play_on_target(record, Some(&1), &mut host).unwrap();
        play_on_target(record, Some(&2), &mut host).unwrap();

        assert_eq!(host.attach_count, 2);
        assert_eq!(host.component(1).count(&Call::Play), 2);
    }

    #[test]
    fn test_named_miss_is_noop() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let dispatcher = SoundDispatcher::new(&fx.registry);

        assert!(dispatcher.play_named_on_target("UI", "missing", Some(&1), &mut host).is_ok());
        assert!(dispatcher.play_named_on_target("SFX", "click", Some(&1), &mut host).is_ok());
        assert_eq!(host.attach_count, 0);
    }

    #[test]
    fn test_component_failure_propagates() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        host.insert_failing_component(5);
        let record = fx.registry.resolve("Ambience", "music").unwrap();

        let result = play_on_target(record, Some(&5), &mut host);
        assert!(result.is_err());
        // Settings were still applied before the trigger failed
        assert_eq!(host.component(5).count(&Call::SetClip(fx.music)), 1);
        assert!(host.component(5).triggers().is_empty());
    }

    #[test]
    fn test_play_at_location_bypasses_registry() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let location = Point3::new(3.0, 0.0, -4.0);

        play_at_location(fx.door, location, &mut host);

        assert_eq!(host.point_plays, vec![(fx.door, location)]);
        assert!(host.components.is_empty());
    }

    #[test]
    fn test_named_at_location() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let dispatcher = SoundDispatcher::new(&fx.registry);
        let location = Point3::new(1.0, 2.0, 3.0);

        dispatcher.play_named_at_location("UI", "click", location, &mut host);
        dispatcher.play_named_at_location("UI", "missing", location, &mut host);
        dispatcher.play_named_at_location("SFX", "click", location, &mut host);

        assert_eq!(host.point_plays.len(), 1);
        assert_eq!(host.point_plays[0].0, fx.click);
        assert_relative_eq!(host.point_plays[0].1.coords, location.coords);
    }

    #[test]
    fn test_point_failure_is_swallowed() {
        let fx = fixture();
        let mut host = RecordingHost {
            fail_points: true,
            ..RecordingHost::default()
        };
        let dispatcher = SoundDispatcher::new(&fx.registry);

        dispatcher.play_at_location(fx.click, Point3::origin(), &mut host);
        assert!(host.point_plays.is_empty());
    }

    #[test]
    fn test_named_at_target_uses_position() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let position = Point3::new(-2.0, 0.5, 8.0);
        host.positions.insert(6, position);
        let dispatcher = SoundDispatcher::new(&fx.registry);

        let locator = RecordingHost {
            positions: host.positions.clone(),
            ..RecordingHost::default()
        };
        dispatcher.play_named_at_target("UI", "click", Some(&6), &locator, &mut host);
        dispatcher.play_named_at_target("UI", "click", Some(&7), &locator, &mut host);
        dispatcher.play_named_at_target("UI", "click", None, &locator, &mut host);

        assert_eq!(host.point_plays, vec![(fx.click, position)]);
    }

    #[test]
    fn test_prepare_binds_without_triggering() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let music = fx.registry.resolve("Ambience", "music").unwrap();

        prepare_on_target(music, Some(&1), &mut host).unwrap();

        let component = host.component(1);
        assert!(component.triggers().is_empty());
        assert_eq!(component.count(&Call::SetClip(fx.music)), 1);
    }

    #[test]
    fn test_prepare_plays_on_create() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let dispatcher = SoundDispatcher::new(&fx.registry);

        dispatcher.prepare_named_on_target("Ambience", "door", Some(&3), &mut host).unwrap();
        dispatcher.prepare_named_on_target("Ambience", "door", None, &mut host).unwrap();

        assert_eq!(host.component(3).triggers(), vec![&Call::PlayDelayed(2.0)]);
        assert_eq!(host.attach_count, 1);
    }

    #[test]
    fn test_dispatch_does_not_touch_registry() {
        let fx = fixture();
        let mut host = RecordingHost::default();
        let before = fx.registry.resolve("UI", "click").unwrap().clone();

        let dispatcher = SoundDispatcher::new(&fx.registry);
        dispatcher.play_named_on_target("UI", "click", Some(&1), &mut host).unwrap();

        assert_eq!(fx.registry.resolve("UI", "click").unwrap(), &before);
        assert_eq!(fx.registry.record_count(), 3);
    }
}
