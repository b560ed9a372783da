//! Submit behavior and the save-once guard.
//!
//! `DirectSubmit` is the plain behavior: every complete submit goes to the
//! address backend. `SaveGuard` wraps any submitter and remembers, per member,
//! that an address was already committed.
//!
//! # State machine
//!
//! ```text
//!   Unsaved ──submit ok──▶ Saved
//!      ▲  │                  │
//!      └──┘ submit failed    └── submit ▶ AlreadySaved (no request)
//! ```
//!
//! `Saved` is terminal; the durable marker is never cleared here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::storage::KeyValueStore;
use crate::traits::BaseAddressRepository;
use crate::types::Address;

pub const SAVED_MARKER_PREFIX: &str = "endereco_salvo_";
pub const SAVED_MARKER_VALUE: &str = "true";

/// Storage key of the saved marker for `identity`.
pub fn marker_key(identity: &str) -> String {
    format!("{}{}", SAVED_MARKER_PREFIX, identity)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Unsaved,
    Saved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Backend accepted the address
    Saved,
    /// Guard already saw a save for this member; nothing was sent
    AlreadySaved,
    /// A required field is empty; nothing was sent
    Incomplete,
    /// Backend or network failure; safe to retry
    Failed(String),
}

#[async_trait]
pub trait Submitter: Send + Sync {
    /// State a freshly verified member starts in.
    fn initial_state(&self, identity: &str) -> SaveState;

    /// State the form moves to once the backend accepts a save.
    fn state_after_save(&self) -> SaveState;

    async fn submit(&self, identity: &str, state: SaveState, address: &Address) -> SubmitOutcome;
}

// =============================================================================
// Direct submit
// =============================================================================

pub struct DirectSubmit {
    repository: Arc<dyn BaseAddressRepository>,
}

impl DirectSubmit {
    pub fn new(repository: Arc<dyn BaseAddressRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl Submitter for DirectSubmit {
    fn initial_state(&self, _identity: &str) -> SaveState {
        SaveState::Unsaved
    }

    fn state_after_save(&self) -> SaveState {
        SaveState::Unsaved
    }

    async fn submit(&self, identity: &str, _state: SaveState, address: &Address) -> SubmitOutcome {
        if !address.is_complete() {
            return SubmitOutcome::Incomplete;
        }

        match self.repository.save(identity, address).await {
            Ok(()) => {
                info!(matricula = identity, "Address saved");
                SubmitOutcome::Saved
            }
            Err(e) => {
                warn!(matricula = identity, error = %e, "Address save failed");
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }
}

// =============================================================================
// Save-once guard
// =============================================================================

pub struct SaveGuard<S> {
    inner: S,
    store: Arc<dyn KeyValueStore>,
}

impl<S: Submitter> SaveGuard<S> {
    pub fn new(inner: S, store: Arc<dyn KeyValueStore>) -> Self {
        Self { inner, store }
    }

    /// Whether the durable marker for `identity` is set.
    ///
    /// An unreadable store counts as "not saved" so the member is not locked out.
    pub fn is_marked(&self, identity: &str) -> bool {
        match self.store.get(&marker_key(identity)) {
            Ok(value) => value.as_deref() == Some(SAVED_MARKER_VALUE),
            Err(e) => {
                warn!(matricula = identity, error = %e, "Could not read saved marker");
                false
            }
        }
    }
}

#[async_trait]
impl<S: Submitter> Submitter for SaveGuard<S> {
    fn initial_state(&self, identity: &str) -> SaveState {
        if self.is_marked(identity) {
            SaveState::Saved
        } else {
            SaveState::Unsaved
        }
    }

    fn state_after_save(&self) -> SaveState {
        SaveState::Saved
    }

    async fn submit(&self, identity: &str, state: SaveState, address: &Address) -> SubmitOutcome {
        if state == SaveState::Saved || self.is_marked(identity) {
            info!(matricula = identity, "Address already saved, skipping submit");
            return SubmitOutcome::AlreadySaved;
        }

        let outcome = self.inner.submit(identity, state, address).await;
        if outcome == SubmitOutcome::Saved {
            if let Err(e) = self.store.set(&marker_key(identity), SAVED_MARKER_VALUE) {
                // Saved on the backend; only the lock across sessions is lost
                warn!(matricula = identity, error = %e, "Could not persist saved marker");
            }
        }
        outcome
    }
}
