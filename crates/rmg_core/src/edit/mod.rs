use crate::domain::{Category, Incident, Principal, Priority, Status};
use crate::error::{codes, AppError};
use crate::normalize::timestamps::canonical_reported_at;
use crate::repo::IncidentRepository;
use crate::store::IncidentListStore;
use crate::validate;

/// In-progress local copy of an incident being edited, not yet committed.
///
/// Built by deep-copying the selected record with `reported_at` brought to
/// canonical RFC3339 UTC, so the edit/save round-trip cannot corrupt the
/// server's timestamp. Mutation is field-level and local only; there is no
/// setter for the reporter name, and the status locks the moment the draft
/// observes `Closed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentDraft {
    record: Incident,
}

impl IncidentDraft {
    fn from_incident(incident: &Incident) -> Self {
        let mut record = incident.clone();
        record.reported_at = record
            .reported_at
            .map(|raw| canonical_reported_at(&raw).unwrap_or(raw));
        Self { record }
    }

    pub fn record(&self) -> &Incident {
        &self.record
    }

    pub fn set_category(&mut self, category: Category) {
        self.record.category = category;
    }

    pub fn set_details(&mut self, details: impl Into<String>) {
        self.record.details = details.into();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.record.priority = priority;
    }

    /// Closed is terminal: once the draft's status reads `Closed`, no
    /// further transition is accepted. Closed incidents should never reach a
    /// draft at all (see [`EditSessionController::open`]); this guard backs
    /// that up inside the draft itself.
    pub fn set_status(&mut self, status: Status) -> Result<(), AppError> {
        if self.record.status.is_closed() {
            return Err(AppError::new(
                codes::INCIDENT_CLOSED,
                "Closed incidents cannot change status",
            ));
        }
        self.record.status = status;
        Ok(())
    }
}

/// The edit-modal lifecycle: `Idle`, or `Editing` exactly one draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Idle,
    Editing(IncidentDraft),
}

/// Drives the exactly-one-at-a-time modal editing lifecycle: open, mutate
/// draft, then commit or discard.
#[derive(Debug)]
pub struct EditSessionController {
    state: EditState,
}

impl EditSessionController {
    pub fn new() -> Self {
        Self {
            state: EditState::Idle,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    pub fn draft(&self) -> Option<&IncidentDraft> {
        match &self.state {
            EditState::Editing(draft) => Some(draft),
            EditState::Idle => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut IncidentDraft> {
        match &mut self.state {
            EditState::Editing(draft) => Some(draft),
            EditState::Idle => None,
        }
    }

    /// `Idle -> Editing`. A closed incident is never offered for editing,
    /// and at most one draft exists at a time — a second open while one is
    /// in flight is rejected rather than silently discarding work.
    pub fn open(&mut self, incident: &Incident) -> Result<(), AppError> {
        if self.is_editing() {
            return Err(AppError::new(
                codes::EDIT_IN_PROGRESS,
                "Another incident is already being edited",
            ));
        }
        if incident.status.is_closed() {
            return Err(AppError::new(
                codes::INCIDENT_CLOSED,
                "Closed incidents cannot be edited",
            )
            .with_details(format!("incidentId={}", incident.incident_id)));
        }
        self.state = EditState::Editing(IncidentDraft::from_incident(incident));
        Ok(())
    }

    /// `Editing -> Idle` without a network call or store mutation.
    pub fn discard(&mut self) {
        self.state = EditState::Idle;
    }

    /// Commit the draft through the store as a whole-record replace. The
    /// session closes only when the server confirms; on failure it stays
    /// `Editing` with the unsaved changes intact so the user can retry.
    pub fn commit(
        &mut self,
        store: &mut IncidentListStore,
        repo: &dyn IncidentRepository,
        principal: &Principal,
    ) -> Result<Incident, AppError> {
        let EditState::Editing(draft) = &self.state else {
            return Err(AppError::new(codes::EDIT_NOT_OPEN, "No edit session is open"));
        };
        validate::validate_commit(draft.record())?;
        let updated = store.update(repo, draft.record(), principal)?;
        self.state = EditState::Idle;
        Ok(updated)
    }
}

impl Default for EditSessionController {
    fn default() -> Self {
        Self::new()
    }
}
