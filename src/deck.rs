use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Opaque handle to one image. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Item(Rc<str>);

impl Item {
    pub fn new(handle: impl AsRef<str>) -> Self {
        Self(Rc::from(handle.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Item {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Item {
    fn from(value: String) -> Self {
        Self(Rc::from(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Like,
    Dislike,
}

impl Decision {
    /// +1.0 for likes, -1.0 for dislikes. Used to orient exit animations.
    pub fn sign(self) -> f64 {
        match self {
            Decision::Like => 1.0,
            Decision::Dislike => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub item: Item,
    pub decision: Decision,
}

/// Undo stack of past decisions, most recent last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn push(&mut self, item: Item, decision: Decision) {
        self.entries.push(HistoryEntry { item, decision });
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

/// Decided/total counts. Never stored, always derived from the deck and history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub decided: usize,
    pub total: usize,
}

impl Progress {
    /// One-based position of the card currently on top, capped at `total`.
    pub fn display_position(&self) -> usize {
        (self.decided + 1).min(self.total)
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.decided as f64 / self.total as f64 * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    pending: VecDeque<Item>,
    liked: Vec<Item>,
    total: usize,
}

impl Deck {
    pub fn new(items: Vec<Item>) -> Self {
        let total = items.len();
        Self {
            pending: items.into(),
            liked: Vec::new(),
            total,
        }
    }

    pub fn top(&self) -> Option<&Item> {
        self.pending.front()
    }

    pub fn pending(&self) -> Vec<Item> {
        self.pending.iter().cloned().collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn liked(&self) -> &[Item] {
        &self.liked
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Removes the top item and records it as liked when asked to.
    /// Returns the removed item, or `None` when nothing is pending.
    pub fn decide_top(&mut self, decision: Decision) -> Option<Item> {
        let item = self.pending.pop_front()?;
        if decision == Decision::Like {
            self.liked.push(item.clone());
        }
        Some(item)
    }

    /// Reverses `decide_top`: the item becomes the new top and, if it had been
    /// liked, its most recent occurrence leaves the liked list.
    pub fn restore(&mut self, item: Item, decision: Decision) {
        if decision == Decision::Like {
            if let Some(index) = self.liked.iter().rposition(|liked| liked == &item) {
                self.liked.remove(index);
            }
        }
        self.pending.push_front(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deck(ids: &[&str]) -> Deck {
        Deck::new(ids.iter().map(|id| Item::from(*id)).collect())
    }

    #[test]
    fn decide_top_moves_likes_only() {
        let mut deck = deck(&["a", "b", "c"]);
        assert_eq!(deck.decide_top(Decision::Like), Some(Item::from("a")));
        assert_eq!(deck.decide_top(Decision::Dislike), Some(Item::from("b")));
        assert_eq!(deck.liked(), &[Item::from("a")]);
        assert_eq!(deck.pending(), vec![Item::from("c")]);
        assert_eq!(deck.total(), 3);
    }

    #[test]
    fn decide_top_on_empty_deck_is_none() {
        let mut deck = deck(&[]);
        assert_eq!(deck.decide_top(Decision::Like), None);
        assert!(deck.liked().is_empty());
    }

    #[test]
    fn restore_removes_latest_duplicate() {
        let mut deck = deck(&["x", "y", "x"]);
        deck.decide_top(Decision::Like);
        deck.decide_top(Decision::Like);
        let last = deck.decide_top(Decision::Like).unwrap();
        assert_eq!(
            deck.liked(),
            &[Item::from("x"), Item::from("y"), Item::from("x")]
        );

        deck.restore(last, Decision::Like);
        assert_eq!(deck.liked(), &[Item::from("x"), Item::from("y")]);
        assert_eq!(deck.top(), Some(&Item::from("x")));
    }

    #[test]
    fn restore_dislike_leaves_liked_untouched() {
        let mut deck = deck(&["a", "b"]);
        deck.decide_top(Decision::Like);
        let b = deck.decide_top(Decision::Dislike).unwrap();
        deck.restore(b, Decision::Dislike);
        assert_eq!(deck.liked(), &[Item::from("a")]);
        assert_eq!(deck.pending(), vec![Item::from("b")]);
    }

    #[test]
    fn progress_position_and_percent() {
        let progress = Progress { decided: 3, total: 12 };
        assert_eq!(progress.display_position(), 4);
        assert!((progress.percent() - 25.0).abs() < 1e-9);

        let done = Progress { decided: 12, total: 12 };
        assert_eq!(done.display_position(), 12);
        assert!((done.percent() - 100.0).abs() < 1e-9);

        assert_eq!(Progress::default().percent(), 0.0);
    }
}
