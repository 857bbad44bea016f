//! Headless scripted flight: runs the scene against a recording backend, no window.

use input::{SceneInput, VerticalDirection};
use renderer::{DrawRecorder, Primitive};

use crate::config::SceneConfig;
use crate::scene::SceneController;

/// Final state of a scripted run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightSummary {
    pub frames: u64,
    pub altitude: f32,
    pub yaw: f32,
    pub boxes_dropped: u32,
    pub live_boxes: usize,
    pub draws_last_frame: usize,
}

/// Inputs fired at given frames over a run of `frames`.
///
/// Climbs for the first sixth, flies forward, drops a box every second,
/// swings the orbit camera at one third and switches to both chase views
/// in the second half.
pub fn script(frames: u32, rate_hz: f64) -> Vec<(u32, SceneInput)> {
    let climb_end = frames / 6;
    let drop_every = (rate_hz.round() as u32).max(1);

    let mut steps = vec![
        (
            0,
            SceneInput::Vertical {
                direction: VerticalDirection::Up,
                pressed: true,
            },
        ),
        (
            climb_end,
            SceneInput::Vertical {
                direction: VerticalDirection::Up,
                pressed: false,
            },
        ),
        (climb_end, SceneInput::Forward { pressed: true }),
        (
            frames / 3,
            SceneInput::SetAngles {
                yaw: 30.0,
                pitch: 20.0,
            },
        ),
        (frames / 2, SceneInput::ProjectionPreset(5)),
        (frames * 3 / 4, SceneInput::ProjectionPreset(6)),
    ];
    steps.extend(
        (climb_end..frames)
            .step_by(drop_every as usize)
            .skip(1)
            .map(|frame| (frame, SceneInput::Drop)),
    );
    steps.sort_by_key(|(frame, _)| *frame);
    steps
}

/// Run the scripted flight for `config.headless_frames` frames.
pub fn fly(config: &SceneConfig) -> FlightSummary {
    let frames = config.headless_frames;
    let rate = if config.headless_rate_hz > 0.0 {
        config.headless_rate_hz
    } else {
        60.0
    };

    let mut scene = SceneController::new(config);
    let mut recorder = DrawRecorder::new();
    let steps = script(frames, rate);
    let mut next = 0;
    let mut boxes_dropped = 0;

    for frame in 0..frames {
        while let Some((at, command)) = steps.get(next).copied() {
            if at > frame {
                break;
            }
            if command == SceneInput::Drop {
                boxes_dropped += 1;
            }
            scene.handle(command);
            next += 1;
        }

        let report = scene.on_frame(frame as f64 / rate, &mut recorder);
        if config.stats_every > 0 && report.frame % config.stats_every == 0 {
            log::info!(
                "frame {} ({:.0} fps): altitude {:.1}, yaw {:.1}, {} boxes, camera {:?}",
                report.frame,
                report.fps,
                report.altitude,
                scene.vehicle().yaw,
                report.live_projectiles,
                scene.state().camera.mode
            );
        }
    }

    let summary = FlightSummary {
        frames: recorder.frames(),
        altitude: scene.vehicle().altitude(),
        yaw: scene.vehicle().yaw,
        boxes_dropped,
        live_boxes: scene.vehicle().projectiles().len(),
        draws_last_frame: recorder.calls().len(),
    };
    log::info!(
        "Flight over district {} finished: {} frames in {:.1}s, {} cubes in last frame ({} instance bytes), {:?}",
        scene.district().seed(),
        summary.frames,
        scene.state().clock.elapsed_seconds(),
        recorder.count(Primitive::Cube),
        recorder.instance_bytes(),
        summary
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_is_ordered_and_in_range() {
        let steps = script(600, 60.0);
        assert!(steps.windows(2).all(|w| w[0].0 <= w[1].0));
        assert!(steps.iter().all(|(frame, _)| *frame < 600));
        let drops = steps.iter().filter(|(_, c)| *c == SceneInput::Drop).count();
        assert_eq!(drops, 8);
        assert!(steps
            .iter()
            .any(|(frame, c)| *frame == 200 && matches!(c, SceneInput::SetAngles { .. })));
    }

    #[test]
    fn scripted_flight_takes_off_and_circles() {
        let config = SceneConfig {
            headless_frames: 600,
            stats_every: 0,
            ..Default::default()
        };
        let summary = fly(&config);
        assert_eq!(summary.frames, 600);
        assert!(summary.altitude > 1.0);
        assert!(summary.yaw > 0.0);
        assert_eq!(summary.boxes_dropped, 8);
        assert!(summary.live_boxes <= 6);
        assert!(summary.draws_last_frame >= 18 + 847 + summary.live_boxes);
    }

    #[test]
    fn zero_frames_runs_nothing() {
        let config = SceneConfig::default();
        let summary = fly(&config);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.draws_last_frame, 0);
    }
}
