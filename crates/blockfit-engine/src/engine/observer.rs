use std::fmt;

use crate::core::{BlockId, Shape};

/// Notifications emitted by the [`RoundController`](super::RoundController).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// A clear event finished; `lines` counts full rows plus full columns.
    LinesCleared { lines: usize },
    ScoreChanged { score: usize },
    BlockSpawned { block: BlockId, shape: Shape },
    GameOver,
}

/// Receiver of [`GameEvent`]s.
///
/// Implemented for every `FnMut(&GameEvent)` closure.
pub trait GameObserver {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameObserver for F
where
    F: FnMut(&GameEvent),
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event);
    }
}

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Entry {
    subscription: Subscription,
    owner: Option<BlockId>,
    observer: Box<dyn GameObserver>,
}

/// Observer list owned by the emitting component.
///
/// Subscriptions can be tied to a block. Those are revoked automatically
/// when the block is released, so a subscriber never outlives the block it
/// was watching.
#[derive(Default)]
pub struct Observers {
    next: u64,
    entries: Vec<Entry>,
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscriptions", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl Observers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, owner: Option<BlockId>, observer: Box<dyn GameObserver>) -> Subscription {
        let subscription = Subscription(self.next);
        self.next += 1;
        self.entries.push(Entry {
            subscription,
            owner,
            observer,
        });
        subscription
    }

    /// Subscribes for the lifetime of the session.
    pub fn subscribe<O>(&mut self, observer: O) -> Subscription
    where
        O: GameObserver + 'static,
    {
        self.push(None, Box::new(observer))
    }

    /// Subscribes until `block` is released.
    pub fn subscribe_for_block<O>(&mut self, block: BlockId, observer: O) -> Subscription
    where
        O: GameObserver + 'static,
    {
        self.push(Some(block), Box::new(observer))
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.subscription != subscription);
        self.entries.len() != before
    }

    /// Drops every subscription owned by `block`.
    pub fn revoke_block(&mut self, block: BlockId) {
        self.entries.retain(|e| e.owner != Some(block));
    }

    /// Drops every block-owned subscription, keeping session-wide ones.
    pub fn revoke_all_blocks(&mut self) {
        self.entries.retain(|e| e.owner.is_none());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `event` to every subscriber in subscription order.
    pub fn emit(&mut self, event: &GameEvent) {
        for entry in &mut self.entries {
            entry.observer.on_event(event);
        }
    }
}
