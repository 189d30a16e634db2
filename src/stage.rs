use crate::deck::{Item, Progress};
use crate::gesture::{DragVisual, ExitTrajectory};

const EASING: &str = "cubic-bezier(.22,.9,.3,1)";

/// Receives everything the controller wants drawn. Implementations never
/// reach back into the controller.
pub trait PresentationSink {
    /// Full redraw of the pending stack, top card first.
    fn render_deck(&mut self, pending: &[Item]);
    fn update_drag_visual(&mut self, item: &Item, visual: DragVisual);
    fn settle_card(&mut self, item: &Item, exit: ExitTrajectory, duration_ms: u32);
    fn reset_card(&mut self, item: &Item);
    fn update_progress(&mut self, progress: Progress);
    fn show_summary(&mut self, liked: &[Item]);
    fn hide_summary(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardMotion {
    Rest,
    Dragging(DragVisual),
    Returning { duration_ms: u32 },
    Leaving {
        exit: ExitTrajectory,
        duration_ms: u32,
    },
}

/// Retained view model the yew component renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct CardStage {
    cards: Vec<Item>,
    motion: CardMotion,
    return_duration_ms: u32,
    progress: Progress,
    summary: Option<Vec<Item>>,
}

impl CardStage {
    pub fn new(return_duration_ms: u32) -> Self {
        Self {
            cards: Vec::new(),
            motion: CardMotion::Rest,
            return_duration_ms,
            progress: Progress::default(),
            summary: None,
        }
    }

    pub fn cards(&self) -> &[Item] {
        &self.cards
    }

    pub fn motion(&self) -> CardMotion {
        self.motion
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn summary(&self) -> Option<&[Item]> {
        self.summary.as_deref()
    }

    /// Inline style for the card at `index` (0 is the top card).
    pub fn card_style(&self, index: usize) -> String {
        let depth = format!("z-index: {};", self.cards.len().saturating_sub(index));
        if index != 0 {
            return depth;
        }
        let (x, y, rotation, transition) = match self.motion {
            CardMotion::Rest => (0.0, 0.0, 0.0, "none".to_string()),
            CardMotion::Dragging(visual) => (
                visual.translate_x,
                visual.translate_y,
                visual.rotation_deg,
                "none".to_string(),
            ),
            CardMotion::Returning { duration_ms } => {
                (0.0, 0.0, 0.0, format!("transform {duration_ms}ms {EASING}"))
            }
            CardMotion::Leaving { exit, duration_ms } => (
                exit.exit_x,
                exit.exit_y,
                exit.exit_rotation,
                format!("transform {duration_ms}ms {EASING}"),
            ),
        };
        format!(
            "{depth} transform: translate({x:.1}px, {y:.1}px) rotate({rotation:.2}deg); transition: {transition};"
        )
    }

    /// `(like, nope)` label opacities for the card at `index`.
    pub fn label_opacity(&self, index: usize) -> (f64, f64) {
        match (index, self.motion) {
            (0, CardMotion::Dragging(visual)) => (visual.like_opacity, visual.dislike_opacity),
            (0, CardMotion::Leaving { exit, .. }) if exit.exit_x > 0.0 => (1.0, 0.0),
            (0, CardMotion::Leaving { exit, .. }) if exit.exit_x < 0.0 => (0.0, 1.0),
            _ => (0.0, 0.0),
        }
    }
}

impl PresentationSink for CardStage {
    fn render_deck(&mut self, pending: &[Item]) {
        self.cards = pending.to_vec();
        self.motion = CardMotion::Rest;
    }

    fn update_drag_visual(&mut self, _item: &Item, visual: DragVisual) {
        self.motion = CardMotion::Dragging(visual);
    }

    fn settle_card(&mut self, _item: &Item, exit: ExitTrajectory, duration_ms: u32) {
        self.motion = CardMotion::Leaving { exit, duration_ms };
    }

    fn reset_card(&mut self, _item: &Item) {
        self.motion = CardMotion::Returning {
            duration_ms: self.return_duration_ms,
        };
    }

    fn update_progress(&mut self, progress: Progress) {
        self.progress = progress;
    }

    fn show_summary(&mut self, liked: &[Item]) {
        self.summary = Some(liked.to_vec());
    }

    fn hide_summary(&mut self) {
        self.summary = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_with(ids: &[&str]) -> CardStage {
        let mut stage = CardStage::new(260);
        let items: Vec<Item> = ids.iter().map(|id| Item::from(*id)).collect();
        stage.render_deck(&items);
        stage
    }

    #[test]
    fn dragging_top_card_follows_pointer_without_transition() {
        let mut stage = stage_with(&["a", "b"]);
        stage.update_drag_visual(
            &Item::from("a"),
            DragVisual {
                translate_x: 36.0,
                translate_y: 4.0,
                rotation_deg: 2.0,
                like_opacity: 0.3,
                dislike_opacity: 0.0,
            },
        );
        assert_eq!(
            stage.card_style(0),
            "z-index: 2; transform: translate(36.0px, 4.0px) rotate(2.00deg); transition: none;"
        );
        assert_eq!(stage.card_style(1), "z-index: 1;");
        assert_eq!(stage.label_opacity(0), (0.3, 0.0));
        assert_eq!(stage.label_opacity(1), (0.0, 0.0));
    }

    #[test]
    fn reset_animates_back_to_rest() {
        let mut stage = stage_with(&["a"]);
        stage.reset_card(&Item::from("a"));
        assert_eq!(stage.motion(), CardMotion::Returning { duration_ms: 260 });
        assert!(stage
            .card_style(0)
            .contains("translate(0.0px, 0.0px) rotate(0.00deg); transition: transform 260ms"));
        assert_eq!(stage.label_opacity(0), (0.0, 0.0));
    }

    #[test]
    fn leaving_card_shows_its_label() {
        let mut stage = stage_with(&["a"]);
        stage.settle_card(
            &Item::from("a"),
            ExitTrajectory {
                exit_x: -500.0,
                exit_y: 0.0,
                exit_rotation: -30.0,
            },
            260,
        );
        assert_eq!(stage.label_opacity(0), (0.0, 1.0));
        assert!(stage.card_style(0).contains("translate(-500.0px, 0.0px)"));
    }

    #[test]
    fn summary_toggles() {
        let mut stage = stage_with(&[]);
        stage.show_summary(&[Item::from("a")]);
        assert_eq!(stage.summary(), Some(&[Item::from("a")][..]));
        stage.hide_summary();
        assert_eq!(stage.summary(), None);
    }
}
