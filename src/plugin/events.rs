//! Plugin event stack
//!
//! Outgoing events wait here until the host polls them with `get-events`.
//! Answers come back through `event-return` and are accepted only for events
//! this stack issued, once per event. At most `MAX_AWAITING` issued events
//! are remembered; older ones are forgotten along with any unread answer.

use std::collections::VecDeque;
use log::{debug, warn};
use parking_lot::Mutex;
use serde_json::Value;
use uuid::Uuid;
use super::action::{PluginEvent, PluginEventKind, PluginEventReturn};

/// Issued events whose answer is still wanted
pub const MAX_AWAITING: usize = 64;

#[derive(Debug)]
struct Awaiting {
    event_id: Uuid,
    answer: Option<Value>,
}

#[derive(Debug, Default)]
pub struct PluginEventStack {
    outgoing: Mutex<VecDeque<PluginEvent>>,
    awaiting: Mutex<VecDeque<Awaiting>>,
}

impl PluginEventStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event and return its id
    pub fn push_event(&self, kind: PluginEventKind) -> Uuid {
        let event = PluginEvent::new(kind);
        let id = event.id;
        self.outgoing.lock().push_back(event);

        let mut awaiting = self.awaiting.lock();
        if awaiting.len() == MAX_AWAITING {
            if let Some(dropped) = awaiting.pop_front() {
                debug!("Event {} no longer awaits an answer", dropped.event_id);
            }
        }
        awaiting.push_back(Awaiting { event_id: id, answer: None });
        id
    }

    /// Oldest pending event
    pub fn pop_event(&self) -> Option<PluginEvent> {
        self.outgoing.lock().pop_front()
    }

    pub fn pending(&self) -> usize {
        self.outgoing.lock().len()
    }

    /// Number of issued events still remembered, answered or not
    pub fn awaiting(&self) -> usize {
        self.awaiting.lock().len()
    }

    /// Store the host's answer. Returns `false` for events this stack did
    /// not issue, has forgotten, or already holds an answer for.
    pub fn push_event_return(&self, ret: PluginEventReturn) -> bool {
        let mut awaiting = self.awaiting.lock();
        match awaiting.iter_mut().find(|a| a.event_id == ret.source_event_id) {
            Some(entry) if entry.answer.is_none() => {
                debug!("Event return for {}", ret.source_event_id);
                entry.answer = Some(ret.value);
                true
            }
            Some(_) => {
                warn!("Event {} already answered, ignoring second answer", ret.source_event_id);
                false
            }
            None => {
                warn!("Event return for unknown event {}", ret.source_event_id);
                false
            }
        }
    }

    /// Take the answer to an event; each answer is handed out once
    pub fn take_event_return(&self, source_event_id: &Uuid) -> Option<Value> {
        let mut awaiting = self.awaiting.lock();
        let index = awaiting
            .iter()
            .position(|a| a.event_id == *source_event_id && a.answer.is_some())?;
        awaiting.remove(index).and_then(|a| a.answer)
    }
}
