//! Participant movement state and storage.

use rustc_hash::FxHashMap;

use hs_core::{NodeId, ParticipantId, Step};

use crate::{SimError, SimResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParticipantStatus {
    /// Stationary and still heading somewhere.
    Active,
    /// Crossing an edge toward `next_node`.
    InTransit,
    /// Reached its destination.
    Arrived,
    /// No route to the destination remains.
    Stranded,
}

/// Movement state for one participant.
///
/// Hops are teleport-at-arrival: the participant stays at `position` until
/// `arrival_step`, then appears at `next_node`.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantState {
    pub name:           String,
    pub status:         ParticipantStatus,
    /// Current node, or the node being left while in transit.
    pub position:       NodeId,
    pub destination:    NodeId,
    /// Node being entered; equals `position` unless in transit.
    pub next_node:      NodeId,
    pub departure_step: Step,
    pub arrival_step:   Step,
    pub traced:         bool,
}

impl ParticipantState {
    fn new(name: String, start: NodeId, destination: NodeId) -> Self {
        let status = if start == destination {
            ParticipantStatus::Arrived
        } else {
            ParticipantStatus::Active
        };
        Self {
            name,
            status,
            position:       start,
            destination,
            next_node:      start,
            departure_step: Step::ZERO,
            arrival_step:   Step::ZERO,
            traced:         false,
        }
    }

    #[inline]
    pub fn in_transit(&self) -> bool {
        self.status == ParticipantStatus::InTransit
    }

    /// `true` while the participant is moving or could still move.
    #[inline]
    pub fn is_live(&self) -> bool {
        matches!(self.status, ParticipantStatus::Active | ParticipantStatus::InTransit)
    }
}

/// All participants, indexed by `ParticipantId`, plus a name index.
#[derive(Default)]
pub struct ParticipantStore {
    pub states: Vec<ParticipantState>,
    index:      FxHashMap<String, ParticipantId>,
}

impl ParticipantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<ParticipantId> {
        self.index.get(name).copied()
    }

    pub fn state(&self, id: ParticipantId) -> &ParticipantState {
        &self.states[id.index()]
    }

    pub fn add(
        &mut self,
        name:        impl Into<String>,
        start:       NodeId,
        destination: NodeId,
    ) -> SimResult<ParticipantId> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(SimError::DuplicateParticipant(name));
        }
        let id = ParticipantId::from_index(self.states.len())?;
        self.index.insert(name.clone(), id);
        self.states.push(ParticipantState::new(name, start, destination));
        Ok(id)
    }

    pub fn set_traced(&mut self, name: &str, traced: bool) -> SimResult<()> {
        let id = self
            .get(name)
            .ok_or_else(|| SimError::UnknownParticipant(name.to_owned()))?;
        self.states[id.index()].traced = traced;
        Ok(())
    }

    /// Start a hop from the current position to `next`, arriving at
    /// `now + steps` (at least one step later).
    pub fn begin_hop(&mut self, id: ParticipantId, next: NodeId, now: Step, steps: u64) {
        let state = &mut self.states[id.index()];
        state.status         = ParticipantStatus::InTransit;
        state.next_node      = next;
        state.departure_step = now;
        state.arrival_step   = now + steps.max(1);
    }

    /// Complete the current hop; returns `(from, to)`.
    pub fn arrive(&mut self, id: ParticipantId, now: Step) -> (NodeId, NodeId) {
        let state = &mut self.states[id.index()];
        let from = state.position;
        let to   = state.next_node;
        state.position     = to;
        state.arrival_step = now;
        state.status = if to == state.destination {
            ParticipantStatus::Arrived
        } else {
            ParticipantStatus::Active
        };
        (from, to)
    }

    pub fn mark_stranded(&mut self, id: ParticipantId) {
        self.states[id.index()].status = ParticipantStatus::Stranded;
    }

    /// Participants whose hop ends at or before `now`, in id order.
    pub fn arriving(&self, now: Step) -> Vec<ParticipantId> {
        self.ids_where(|s| s.in_transit() && s.arrival_step <= now)
    }

    /// Stationary participants that still have somewhere to go, in id order.
    pub fn departing(&self) -> Vec<ParticipantId> {
        self.ids_where(|s| s.status == ParticipantStatus::Active)
    }

    pub fn count(&self, status: ParticipantStatus) -> usize {
        self.states.iter().filter(|s| s.status == status).count()
    }

    pub fn any_live(&self) -> bool {
        self.states.iter().any(ParticipantState::is_live)
    }

    fn ids_where(&self, pred: impl Fn(&ParticipantState) -> bool) -> Vec<ParticipantId> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| pred(s))
            .map(|(i, _)| ParticipantId(i as u32))
            .collect()
    }
}
