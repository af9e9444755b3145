use crate::domain::{CreateDraft, Incident, IncidentId, Principal};
use crate::error::{codes, AppError};
use crate::idgen;
use crate::repo::IncidentRepository;
use crate::validate;

/// Ordered working copy of the incident list for the active principal; the
/// single state the rendering layer observes.
///
/// Nothing here is optimistic. Every mutating operation round-trips through
/// the repository first and the server's response is applied to the sequence
/// as one append, replace, or remove — so out-of-order responses from
/// independent operations cannot interleave partial mutations, and a failed
/// call leaves the sequence untouched.
#[derive(Debug, Default)]
pub struct IncidentListStore {
    incidents: Vec<Incident>,
}

impl IncidentListStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Replace the working copy with the server's list for `principal`,
    /// discarding any prior state. Runs at session start and every time the
    /// search filter is cleared.
    pub fn load_all(
        &mut self,
        repo: &dyn IncidentRepository,
        principal: &Principal,
    ) -> Result<&[Incident], AppError> {
        let fetched = repo.list_by_owner(principal.id)?;
        self.incidents = fetched;
        Ok(&self.incidents)
    }

    /// Submit a new incident and append the server-confirmed record.
    ///
    /// The identifier is generated immediately before submission, once per
    /// attempt. If the service rejects it as a duplicate, exactly one retry
    /// with a regenerated identifier is made before the error surfaces.
    pub fn create(
        &mut self,
        repo: &dyn IncidentRepository,
        principal: &Principal,
        draft: &CreateDraft,
    ) -> Result<Incident, AppError> {
        validate::validate_create(draft)?;
        let category = draft.category.ok_or_else(|| {
            AppError::new(codes::VALIDATION_FAILED, "A reporting category is required")
        })?;

        let mut pending = Incident {
            id: None,
            incident_id: idgen::generate(),
            reporter_name: principal.username.clone(),
            category,
            details: draft.details.clone(),
            priority: draft.priority,
            status: draft.status,
            reported_at: None,
            owner: None,
        };

        let created = match repo.create(principal.id, &pending) {
            Ok(created) => created,
            Err(err) if err.is(codes::DUPLICATE_INCIDENT_ID) => {
                pending.incident_id = idgen::generate();
                repo.create(principal.id, &pending)?
            }
            Err(err) => return Err(err),
        };

        self.incidents.push(created.clone());
        Ok(created)
    }

    /// Remove by identifier. Allowed unconditionally, independent of status.
    pub fn delete(
        &mut self,
        repo: &dyn IncidentRepository,
        incident_id: &IncidentId,
    ) -> Result<(), AppError> {
        repo.delete(incident_id)?;
        self.incidents.retain(|i| &i.incident_id != incident_id);
        Ok(())
    }

    /// Whole-record replace. The payload carries the full current field set,
    /// the server `id`, and the owner reference stamped from `principal`.
    /// On success the local entry whose `id` matches the response is
    /// replaced; on failure the sequence is untouched so an open edit
    /// session can retry.
    pub fn update(
        &mut self,
        repo: &dyn IncidentRepository,
        record: &Incident,
        principal: &Principal,
    ) -> Result<Incident, AppError> {
        if record.id.is_none() {
            return Err(AppError::new(
                codes::VALIDATION_FAILED,
                "Incident has not been created yet",
            )
            .with_details("field=id"));
        }

        let mut payload = record.clone();
        payload.owner = Some(principal.owner_ref());

        let updated = repo.update(&payload)?;
        if let Some(slot) = self.incidents.iter_mut().find(|i| i.id == updated.id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }
}
