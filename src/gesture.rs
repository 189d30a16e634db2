use crate::config::SwipeConfig;
use crate::deck::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Per-gesture state. Lives only between drag start and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub origin: Point,
    pub dx: f64,
    pub dy: f64,
}

impl DragState {
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            dx: 0.0,
            dy: 0.0,
        }
    }

    pub fn move_to(&mut self, point: Point) {
        self.dx = point.x - self.origin.x;
        self.dy = point.y - self.origin.y;
    }

    pub fn set_offset(&mut self, dx: f64, dy: f64) {
        self.dx = dx;
        self.dy = dy;
    }
}

/// What a card under the pointer should look like right now.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragVisual {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation_deg: f64,
    pub like_opacity: f64,
    pub dislike_opacity: f64,
}

impl DragVisual {
    pub const REST: DragVisual = DragVisual {
        translate_x: 0.0,
        translate_y: 0.0,
        rotation_deg: 0.0,
        like_opacity: 0.0,
        dislike_opacity: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitTrajectory {
    pub exit_x: f64,
    pub exit_y: f64,
    pub exit_rotation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    Commit {
        decision: Decision,
        exit: ExitTrajectory,
    },
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureClassifier {
    commit_threshold: f64,
    rotation_divisor: f64,
    opacity_divisor: f64,
    exit_rotation_deg: f64,
}

impl GestureClassifier {
    pub fn new(config: &SwipeConfig) -> Self {
        Self {
            commit_threshold: config.commit_threshold,
            rotation_divisor: config.rotation_divisor,
            opacity_divisor: config.opacity_divisor,
            exit_rotation_deg: config.exit_rotation_deg,
        }
    }

    pub fn feedback(&self, dx: f64, dy: f64) -> DragVisual {
        if !dx.is_finite() || !dy.is_finite() {
            return DragVisual::REST;
        }
        DragVisual {
            translate_x: dx,
            translate_y: dy,
            rotation_deg: dx / self.rotation_divisor,
            like_opacity: if dx > 0.0 {
                (dx / self.opacity_divisor).clamp(0.0, 1.0)
            } else {
                0.0
            },
            dislike_opacity: if dx < 0.0 {
                (-dx / self.opacity_divisor).clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    /// Decides a release at offset `(dx, dy)`. Only a strict excess over the
    /// threshold commits.
    pub fn release(&self, dx: f64, dy: f64, viewport_width: f64) -> Release {
        if !dx.is_finite() || dx.abs() <= self.commit_threshold {
            return Release::Cancel;
        }
        let decision = if dx > 0.0 {
            Decision::Like
        } else {
            Decision::Dislike
        };
        let exit_y = if dy.is_finite() { dy } else { 0.0 };
        Release::Commit {
            decision,
            exit: self.exit_for(decision, exit_y, viewport_width),
        }
    }

    /// Off-screen resting place for a card leaving in `decision`'s direction.
    pub fn exit_for(&self, decision: Decision, exit_y: f64, viewport_width: f64) -> ExitTrajectory {
        let sign = decision.sign();
        ExitTrajectory {
            exit_x: sign * viewport_width.abs(),
            exit_y,
            exit_rotation: sign * self.exit_rotation_deg,
        }
    }

    /// Folds a complete trajectory of `(dx, dy)` samples; the last sample is
    /// where the pointer was released. An empty trajectory cancels.
    pub fn classify<I>(&self, samples: I, viewport_width: f64) -> Release
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        match samples.into_iter().last() {
            Some((dx, dy)) => self.release(dx, dy, viewport_width),
            None => Release::Cancel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(&SwipeConfig::upgraded())
    }

    #[test]
    fn feedback_rotates_and_fades_in_like_label() {
        let visual = classifier().feedback(60.0, -12.0);
        assert_eq!(visual.translate_x, 60.0);
        assert_eq!(visual.translate_y, -12.0);
        assert!((visual.rotation_deg - 60.0 / 18.0).abs() < 1e-9);
        assert!((visual.like_opacity - 0.5).abs() < 1e-9);
        assert_eq!(visual.dislike_opacity, 0.0);
    }

    #[test]
    fn feedback_clamps_dislike_label() {
        let visual = classifier().feedback(-500.0, 0.0);
        assert_eq!(visual.dislike_opacity, 1.0);
        assert_eq!(visual.like_opacity, 0.0);
        assert!(visual.rotation_deg < 0.0);
    }

    #[test]
    fn release_at_threshold_cancels() {
        let c = classifier();
        assert_eq!(c.release(110.0, 40.0, 800.0), Release::Cancel);
        assert_eq!(c.release(-110.0, 0.0, 800.0), Release::Cancel);
        assert_eq!(c.release(0.0, 300.0, 800.0), Release::Cancel);
    }

    #[test]
    fn release_past_threshold_commits_with_exit() {
        let c = classifier();
        assert_eq!(
            c.release(111.0, 25.0, 800.0),
            Release::Commit {
                decision: Decision::Like,
                exit: ExitTrajectory {
                    exit_x: 800.0,
                    exit_y: 25.0,
                    exit_rotation: 30.0,
                },
            }
        );
        assert_eq!(
            c.release(-200.0, -5.0, 640.0),
            Release::Commit {
                decision: Decision::Dislike,
                exit: ExitTrajectory {
                    exit_x: -640.0,
                    exit_y: -5.0,
                    exit_rotation: -30.0,
                },
            }
        );
    }

    #[test]
    fn basic_preset_commits_earlier() {
        let c = GestureClassifier::new(&SwipeConfig::basic());
        assert!(matches!(
            c.release(105.0, 0.0, 800.0),
            Release::Commit {
                decision: Decision::Like,
                ..
            }
        ));
        assert_eq!(c.release(100.0, 0.0, 800.0), Release::Cancel);
        assert_eq!(classifier().release(105.0, 0.0, 800.0), Release::Cancel);
    }

    #[test]
    fn classify_uses_release_sample() {
        let c = classifier();
        let outward_then_back = [(50.0, 0.0), (150.0, 0.0), (20.0, 0.0)];
        assert_eq!(c.classify(outward_then_back, 800.0), Release::Cancel);

        let fling = [(10.0, 0.0), (-60.0, 3.0), (-130.0, 4.0)];
        assert!(matches!(
            c.classify(fling, 800.0),
            Release::Commit {
                decision: Decision::Dislike,
                ..
            }
        ));
    }

    #[test]
    fn empty_or_broken_trajectory_cancels() {
        let c = classifier();
        assert_eq!(c.classify(Vec::new(), 800.0), Release::Cancel);
        assert_eq!(c.release(f64::NAN, 0.0, 800.0), Release::Cancel);
        assert_eq!(c.feedback(f64::INFINITY, 0.0), DragVisual::REST);
    }

    #[test]
    fn drag_state_tracks_delta_from_origin() {
        let mut drag = DragState::new(Point::new(100.0, 200.0));
        drag.move_to(Point::new(40.0, 230.0));
        assert_eq!((drag.dx, drag.dy), (-60.0, 30.0));
    }
}
