//! Optimistic Save Tracking
//!
//! The displayed state changes as soon as an edit is made; the confirmed state
//! only changes when the server accepts a save. Every save carries a
//! monotonically increasing sequence number. A success for an older ticket
//! still advances the confirmed state (the server applied it) but leaves the
//! displayed state alone; a failure for an older ticket is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveTicket {
    pub id: Uuid,
    pub sequence: u64,
    pub issued_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Server state adopted as the new confirmed state.
    Confirmed,
    /// Displayed state reverted to the last confirmed state.
    RolledBack,
    /// A newer save is in flight; confirmed state advanced, display kept.
    Superseded,
    /// Older than the last confirmed save, or a failure superseded by a newer save; ignored.
    Stale,
}

#[derive(Debug, Clone)]
pub struct Optimistic<T: Clone> {
    confirmed: T,
    displayed: T,
    latest: Option<SaveTicket>,
    next_sequence: u64,
    confirmed_sequence: u64,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(confirmed: T) -> Self {
        Self {
            displayed: confirmed.clone(),
            confirmed,
            latest: None,
            next_sequence: 1,
            confirmed_sequence: 0,
        }
    }

    pub fn displayed(&self) -> &T {
        &self.displayed
    }

    pub fn confirmed(&self) -> &T {
        &self.confirmed
    }

    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Show `next` immediately and issue a ticket for its save request.
    pub fn begin(&mut self, next: T) -> SaveTicket {
        let ticket = SaveTicket {
            id: Uuid::new_v4(),
            sequence: self.next_sequence,
            issued_at: Utc::now(),
        };
        self.next_sequence += 1;
        self.displayed = next;
        self.latest = Some(ticket.clone());
        ticket
    }

    /// Server accepted the save and returned its state.
    pub fn confirm(&mut self, ticket: &SaveTicket, server_state: T) -> Outcome {
        if ticket.sequence <= self.confirmed_sequence || ticket.sequence >= self.next_sequence {
            debug!(sequence = ticket.sequence, "discarding stale save confirmation");
            return Outcome::Stale;
        }
        self.confirmed_sequence = ticket.sequence;
        if self.is_stale(ticket) {
            debug!(sequence = ticket.sequence, "older save confirmed while a newer one is in flight");
            self.confirmed = server_state;
            return Outcome::Superseded;
        }
        self.confirmed = server_state.clone();
        self.displayed = server_state;
        self.latest = None;
        Outcome::Confirmed
    }

    /// Server rejected the save or the request failed.
    pub fn reject(&mut self, ticket: &SaveTicket) -> Outcome {
        if self.is_stale(ticket) {
            debug!(sequence = ticket.sequence, "discarding stale save failure");
            return Outcome::Stale;
        }
        warn!(sequence = ticket.sequence, ticket = %ticket.id, "save failed, reverting to confirmed state");
        self.displayed = self.confirmed.clone();
        self.latest = None;
        Outcome::RolledBack
    }

    fn is_stale(&self, ticket: &SaveTicket) -> bool {
        self.latest
            .as_ref()
            .map_or(true, |latest| latest.sequence != ticket.sequence)
    }
}
