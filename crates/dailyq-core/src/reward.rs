//! Reward bridge
//!
//! A reward provider (rewarded ad, purchase, promo code) publishes events on
//! a `RewardHub`. A screen that wants to react subscribes for as long as it
//! is alive; dropping the `RewardSubscription` deregisters it, so events are
//! never delivered to a listener that has gone away.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardEvent {
    /// The user earned the reward for this author
    Earned { author: String },
    /// The reward provider has nothing to show yet; the caller decides
    /// whether and when to retry
    NotReady,
}

/// What the session did with a reward event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewardOutcome {
    Unlocked { author: String, newly: bool },
    NotReady,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    senders: HashMap<u64, UnboundedSender<RewardEvent>>,
}

/// Fan-out point for reward events. Clones share the same listeners.
#[derive(Clone, Default)]
pub struct RewardHub {
    listeners: Arc<Mutex<Listeners>>,
}

impl RewardHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener that lives until the subscription is dropped
    pub fn subscribe(&self) -> RewardSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut listeners = self.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.senders.insert(id, tx);
        debug!("Reward listener {} registered", id);

        RewardSubscription {
            id,
            hub: self.clone(),
            rx,
        }
    }

    /// Deliver an event to every live listener. Returns how many received it.
    pub fn publish(&self, event: RewardEvent) -> usize {
        let mut listeners = self.lock();
        listeners
            .senders
            .retain(|_, tx| tx.send(event.clone()).is_ok());
        listeners.senders.len()
    }

    pub fn listener_count(&self) -> usize {
        self.lock().senders.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// A registered listener. Deregisters itself on drop.
pub struct RewardSubscription {
    id: u64,
    hub: RewardHub,
    rx: UnboundedReceiver<RewardEvent>,
}

impl RewardSubscription {
    /// Wait for the next event
    pub async fn recv(&mut self) -> Option<RewardEvent> {
        self.rx.recv().await
    }

    /// Take the next event if one is already queued
    pub fn try_recv(&mut self) -> Option<RewardEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for RewardSubscription {
    fn drop(&mut self) {
        self.hub.lock().senders.remove(&self.id);
        debug!("Reward listener {} deregistered", self.id);
    }
}
