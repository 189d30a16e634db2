use log::{debug, info};
use std::mem;

use crate::config::SwipeConfig;
use crate::deck::{Decision, Deck, History, Item, Progress};
use crate::gesture::{DragState, DragVisual, ExitTrajectory, GestureClassifier, Point, Release};
use crate::images::ImageSource;
use crate::stage::PresentationSink;

/// Hands a committed swipe back to the controller once the exit animation
/// has played. Tickets from before an undo or restart are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeState {
    Idle,
    Dragging,
    Settling,
    Exhausted,
}

#[derive(Debug, Clone)]
struct PendingCommit {
    item: Item,
    decision: Decision,
    ticket: SettleTicket,
}

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Dragging { item: Item, drag: DragState },
    Settling(PendingCommit),
    Exhausted,
}

pub struct SwipeController<S, P> {
    config: SwipeConfig,
    classifier: GestureClassifier,
    deck: Deck,
    history: History,
    phase: Phase,
    next_ticket: u64,
    sink: S,
    source: P,
}

impl<S: PresentationSink, P: ImageSource> SwipeController<S, P> {
    pub fn new(config: SwipeConfig, sink: S, source: P) -> Self {
        let classifier = GestureClassifier::new(&config);
        let mut controller = Self {
            config,
            classifier,
            deck: Deck::default(),
            history: History::default(),
            phase: Phase::Idle,
            next_ticket: 0,
            sink,
            source,
        };
        controller.load_deck();
        controller
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn state(&self) -> SwipeState {
        match self.phase {
            Phase::Idle => SwipeState::Idle,
            Phase::Dragging { .. } => SwipeState::Dragging,
            Phase::Settling(_) => SwipeState::Settling,
            Phase::Exhausted => SwipeState::Exhausted,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn drag(&self) -> Option<&DragState> {
        match &self.phase {
            Phase::Dragging { drag, .. } => Some(drag),
            _ => None,
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            decided: self.history.len(),
            total: self.deck.total(),
        }
    }

    /// Whether `undo` would change anything right now.
    pub fn can_undo(&self) -> bool {
        self.config.features.undo
            && (!self.history.is_empty() || matches!(self.phase, Phase::Settling(_)))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn start_drag(&mut self, item: &Item, origin: Point) -> bool {
        if !matches!(self.phase, Phase::Idle) {
            debug!("ignoring drag start while {:?}", self.state());
            return false;
        }
        match self.deck.top() {
            Some(top) if top == item => {
                self.phase = Phase::Dragging {
                    item: item.clone(),
                    drag: DragState::new(origin),
                };
                true
            }
            _ => {
                debug!("ignoring drag start on {item}: not the top card");
                false
            }
        }
    }

    /// Moves the active drag to an absolute pointer position.
    pub fn drag_to(&mut self, point: Point) -> Option<DragVisual> {
        let Phase::Dragging { drag, .. } = &mut self.phase else {
            return None;
        };
        drag.move_to(point);
        self.emit_drag_visual()
    }

    /// Sets the active drag's offset from its origin directly.
    pub fn drag_offset(&mut self, dx: f64, dy: f64) -> Option<DragVisual> {
        let Phase::Dragging { drag, .. } = &mut self.phase else {
            return None;
        };
        drag.set_offset(dx, dy);
        self.emit_drag_visual()
    }

    fn emit_drag_visual(&mut self) -> Option<DragVisual> {
        let Phase::Dragging { item, drag } = &self.phase else {
            return None;
        };
        let visual = self.classifier.feedback(drag.dx, drag.dy);
        self.sink.update_drag_visual(item, visual);
        Some(visual)
    }

    /// Ends the active drag. A commit returns the ticket to hand back through
    /// `complete_settle` after `settle_duration_ms`.
    pub fn release(&mut self, viewport_width: f64) -> Option<SettleTicket> {
        if !matches!(self.phase, Phase::Dragging { .. }) {
            return None;
        }
        let Phase::Dragging { item, drag } = mem::replace(&mut self.phase, Phase::Idle) else {
            return None;
        };
        match self.classifier.release(drag.dx, drag.dy, viewport_width) {
            Release::Commit { decision, exit } => Some(self.begin_commit(item, decision, exit)),
            Release::Cancel => {
                debug!("drag on {item} cancelled at dx={:.1}", drag.dx);
                self.sink.reset_card(&item);
                None
            }
        }
    }

    /// Abandons the active drag without classifying it.
    pub fn cancel_drag(&mut self) -> bool {
        if !matches!(self.phase, Phase::Dragging { .. }) {
            return false;
        }
        if let Phase::Dragging { item, .. } = mem::replace(&mut self.phase, Phase::Idle) {
            self.sink.reset_card(&item);
        }
        true
    }

    /// Commits the top card without a gesture, as the like/dislike buttons do.
    pub fn swipe(&mut self, decision: Decision, viewport_width: f64) -> Option<SettleTicket> {
        if !matches!(self.phase, Phase::Idle) {
            debug!("ignoring {decision:?} button while {:?}", self.state());
            return None;
        }
        let item = self.deck.top()?.clone();
        let exit = self.classifier.exit_for(decision, 0.0, viewport_width);
        Some(self.begin_commit(item, decision, exit))
    }

    fn begin_commit(&mut self, item: Item, decision: Decision, exit: ExitTrajectory) -> SettleTicket {
        self.next_ticket += 1;
        let ticket = SettleTicket(self.next_ticket);
        debug!("committing {decision:?} on {item}");
        self.sink
            .settle_card(&item, exit, self.config.settle_duration_ms);
        self.phase = Phase::Settling(PendingCommit {
            item,
            decision,
            ticket,
        });
        ticket
    }

    /// Applies a committed swipe to the deck once its exit animation is over.
    pub fn complete_settle(&mut self, ticket: SettleTicket) -> bool {
        match &self.phase {
            Phase::Settling(pending) if pending.ticket == ticket => {}
            _ => {
                debug!("ignoring stale settle {ticket:?}");
                return false;
            }
        }
        if let Phase::Settling(pending) = mem::replace(&mut self.phase, Phase::Idle) {
            self.finish_commit(pending);
        }
        true
    }

    fn finish_commit(&mut self, pending: PendingCommit) {
        let Some(item) = self.deck.decide_top(pending.decision) else {
            return;
        };
        debug_assert_eq!(item, pending.item);
        self.history.push(item, pending.decision);
        self.sink.render_deck(&self.deck.pending());
        let progress = self.progress();
        self.sink.update_progress(progress);

        if self.deck.is_exhausted() {
            self.phase = Phase::Exhausted;
            self.sink.show_summary(self.deck.liked());
        } else {
            self.phase = Phase::Idle;
        }
    }

    /// Reverts the most recent decision. A swipe still settling has not
    /// touched the deck yet, so undoing it only brings the card back.
    pub fn undo(&mut self) -> bool {
        if !self.config.features.undo {
            return false;
        }
        if matches!(self.phase, Phase::Settling(_)) {
            if let Phase::Settling(pending) = mem::replace(&mut self.phase, Phase::Idle) {
                debug!("withdrawing {:?} on {}", pending.decision, pending.item);
                self.next_ticket += 1;
                self.sink.reset_card(&pending.item);
            }
            return true;
        }
        let Some(entry) = self.history.pop() else {
            debug!("nothing to undo");
            return false;
        };

        debug!("undoing {:?} on {}", entry.decision, entry.item);
        self.deck.restore(entry.item, entry.decision);
        self.phase = Phase::Idle;
        self.sink.hide_summary();
        self.sink.render_deck(&self.deck.pending());
        let progress = self.progress();
        self.sink.update_progress(progress);
        true
    }

    /// Throws away all decisions and deals a fresh deck.
    pub fn restart(&mut self) -> bool {
        if !self.config.features.restart {
            return false;
        }
        self.load_deck();
        true
    }

    fn load_deck(&mut self) {
        let items = self.source.provide_items(self.config.deck_size);
        info!("dealing {} cards", items.len());
        self.deck = Deck::new(items);
        self.history.clear();
        // Any settle still scheduled refers to the previous deck.
        self.next_ticket += 1;

        self.sink.hide_summary();
        self.sink.render_deck(&self.deck.pending());
        let progress = self.progress();
        self.sink.update_progress(progress);
        if self.deck.is_exhausted() {
            self.phase = Phase::Exhausted;
            self.sink.show_summary(self.deck.liked());
        } else {
            self.phase = Phase::Idle;
        }
    }
}
