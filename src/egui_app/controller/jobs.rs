//! Background job bookkeeping for store requests.
//!
//! Every request runs on a worker thread and reports back over a channel.
//! Each job carries a token stamped when it was issued; a completion whose
//! token no longer matches the bookkeeping is stale and must be discarded.

use std::collections::BTreeMap;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};
use std::thread;

use crate::speakers::{SpeakerId, api};

/// Completion messages posted by worker threads.
pub(crate) enum JobMessage {
    /// A snapshot fetch finished.
    SpeakersLoaded(LoadOutcome),
    /// A save request finished.
    NameSaved(SaveOutcome),
    /// A single-entry delete finished.
    NameRemoved(RemoveOutcome),
    /// A delete-all request finished.
    StoreCleared(ClearOutcome),
}

pub(crate) struct LoadOutcome {
    pub(crate) token: u64,
    pub(crate) result: Result<BTreeMap<SpeakerId, String>, api::SpeakerStoreError>,
}

pub(crate) struct SaveOutcome {
    pub(crate) id: SpeakerId,
    pub(crate) token: u64,
    pub(crate) name: String,
    pub(crate) result: Result<(), api::SpeakerStoreError>,
}

pub(crate) struct RemoveOutcome {
    pub(crate) id: SpeakerId,
    pub(crate) token: u64,
    pub(crate) result: Result<(), api::SpeakerStoreError>,
}

pub(crate) struct ClearOutcome {
    pub(crate) token: u64,
    pub(crate) result: Result<(), api::SpeakerStoreError>,
}

/// Tracks in-flight store requests and owns the completion channel.
pub(crate) struct ControllerJobs {
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    next_token: u64,
    load_token: Option<u64>,
    clear_token: Option<u64>,
    mutation_tokens: BTreeMap<SpeakerId, u64>,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (message_tx, message_rx) = channel();
        Self {
            message_tx,
            message_rx,
            next_token: 0,
            load_token: None,
            clear_token: None,
            mutation_tokens: BTreeMap::new(),
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    fn issue_token(&mut self) -> u64 {
        self.next_token = self.next_token.wrapping_add(1);
        self.next_token
    }

    pub(super) fn mutation_in_flight(&self, id: SpeakerId) -> bool {
        self.mutation_tokens.contains_key(&id)
    }

    pub(super) fn any_in_flight(&self) -> bool {
        self.load_token.is_some() || self.clear_token.is_some() || !self.mutation_tokens.is_empty()
    }

    /// Start a snapshot fetch unless one is already running.
    pub(super) fn begin_load(&mut self, base_url: String) -> bool {
        if self.load_token.is_some() {
            return false;
        }
        let token = self.issue_token();
        self.load_token = Some(token);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api::fetch_all(&base_url);
            let _ = tx.send(JobMessage::SpeakersLoaded(LoadOutcome { token, result }));
        });
        true
    }

    /// Claim a load completion. Returns false for stale tokens.
    pub(super) fn accept_load(&mut self, token: u64) -> bool {
        if self.load_token == Some(token) {
            self.load_token = None;
            true
        } else {
            false
        }
    }

    /// Start a save for `id`. At most one mutation per identifier may be in
    /// flight; a second request is refused, not queued.
    pub(super) fn begin_save(&mut self, base_url: String, id: SpeakerId, name: String) -> bool {
        if self.mutation_tokens.contains_key(&id) {
            return false;
        }
        let token = self.issue_token();
        self.mutation_tokens.insert(id, token);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api::store_name(&base_url, id, &name);
            let _ = tx.send(JobMessage::NameSaved(SaveOutcome {
                id,
                token,
                name,
                result,
            }));
        });
        true
    }

    /// Start a single-entry delete for `id`, under the same per-identifier
    /// limit as [`begin_save`](Self::begin_save).
    pub(super) fn begin_remove(&mut self, base_url: String, id: SpeakerId) -> bool {
        if self.mutation_tokens.contains_key(&id) {
            return false;
        }
        let token = self.issue_token();
        self.mutation_tokens.insert(id, token);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api::remove_name(&base_url, id);
            let _ = tx.send(JobMessage::NameRemoved(RemoveOutcome { id, token, result }));
        });
        true
    }

    /// Claim a mutation completion for `id`. Returns false when the token is
    /// stale, e.g. after [`invalidate_mutations`](Self::invalidate_mutations).
    pub(super) fn accept_mutation(&mut self, id: SpeakerId, token: u64) -> bool {
        match self.mutation_tokens.get(&id) {
            Some(current) if *current == token => {
                self.mutation_tokens.remove(&id);
                true
            }
            _ => false,
        }
    }

    /// Start a delete-all unless one is already running.
    pub(super) fn begin_clear(&mut self, base_url: String) -> bool {
        if self.clear_token.is_some() {
            return false;
        }
        let token = self.issue_token();
        self.clear_token = Some(token);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api::clear_names(&base_url);
            let _ = tx.send(JobMessage::StoreCleared(ClearOutcome { token, result }));
        });
        true
    }

    /// Claim a clear completion. Returns false for stale tokens.
    pub(super) fn accept_clear(&mut self, token: u64) -> bool {
        if self.clear_token == Some(token) {
            self.clear_token = None;
            true
        } else {
            false
        }
    }

    /// Forget every outstanding per-identifier mutation so its completion
    /// gets discarded on arrival.
    pub(super) fn invalidate_mutations(&mut self) {
        self.mutation_tokens.clear();
    }
}
