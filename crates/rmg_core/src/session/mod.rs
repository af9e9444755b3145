use crate::domain::{AuthUser, CreateDraft, Incident, IncidentId, Principal};
use crate::edit::{EditSessionController, IncidentDraft};
use crate::error::{codes, AppError};
use crate::repo::IncidentRepository;
use crate::search::SearchController;
use crate::store::IncidentListStore;

/// One logged-in user's incident workflow, minus the markup.
///
/// Owns the principal, the create-form draft, the working list, the search
/// filter, and the edit-modal state, and wires them together the way the
/// rendering layer drives them. The principal is threaded explicitly into
/// every owner-scoped operation; there is no ambient user state.
#[derive(Debug)]
pub struct IncidentSession {
    principal: Principal,
    draft: CreateDraft,
    store: IncidentListStore,
    search: SearchController,
    edit: EditSessionController,
}

impl IncidentSession {
    /// Start a session for the authenticated user and materialize their
    /// incident list. Fails with `IDENTITY_MISSING` — before any remote call
    /// — when the auth collaborator handed over an incomplete identity.
    pub fn begin(auth: AuthUser, repo: &dyn IncidentRepository) -> Result<Self, AppError> {
        let principal = Principal::from_auth(auth)?;
        let mut session = Self {
            principal,
            draft: CreateDraft::default(),
            store: IncidentListStore::new(),
            search: SearchController::new(),
            edit: EditSessionController::new(),
        };
        session.store.load_all(repo, &session.principal)?;
        Ok(session)
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Reporter name shown (read-only) on both the create form and the edit
    /// modal.
    pub fn reporter_name(&self) -> &str {
        &self.principal.username
    }

    pub fn draft(&self) -> &CreateDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CreateDraft {
        &mut self.draft
    }

    pub fn store(&self) -> &IncidentListStore {
        &self.store
    }

    /// What the list renders right now: the search overlay when a filter is
    /// active, otherwise the full working copy.
    pub fn visible(&self) -> &[Incident] {
        self.search.visible(&self.store)
    }

    /// Create from the current form draft. On success the form resets to its
    /// defaults; the reporter name lives on the principal and is untouched.
    /// On failure the draft keeps the user's input.
    pub fn submit_draft(&mut self, repo: &dyn IncidentRepository) -> Result<Incident, AppError> {
        let created = self.store.create(repo, &self.principal, &self.draft)?;
        self.draft.reset();
        Ok(created)
    }

    pub fn delete(
        &mut self,
        repo: &dyn IncidentRepository,
        incident_id: &IncidentId,
    ) -> Result<(), AppError> {
        self.store.delete(repo, incident_id)
    }

    pub fn query(&self) -> &str {
        self.search.query()
    }

    /// Mirror of the screen's query binding: emptying the box while a filter
    /// is active lifts the filter immediately (with a fresh fetch); anything
    /// else just records the text and waits for an explicit search.
    pub fn set_query(
        &mut self,
        repo: &dyn IncidentRepository,
        query: impl Into<String>,
    ) -> Result<(), AppError> {
        let query = query.into();
        let lifts_filter = query.trim().is_empty() && self.search.is_filtered();
        self.search.set_query(query);
        if lifts_filter {
            self.search.clear(&mut self.store, repo, &self.principal)?;
        }
        Ok(())
    }

    pub fn submit_search(&mut self, repo: &dyn IncidentRepository) -> Result<(), AppError> {
        self.search.submit(&mut self.store, repo, &self.principal)
    }

    pub fn clear_search(&mut self, repo: &dyn IncidentRepository) -> Result<(), AppError> {
        self.search.clear(&mut self.store, repo, &self.principal)
    }

    /// Open the edit modal for an incident in the visible set.
    pub fn open_edit(&mut self, incident_id: &IncidentId) -> Result<(), AppError> {
        let incident = self
            .visible()
            .iter()
            .find(|i| &i.incident_id == incident_id)
            .cloned()
            .ok_or_else(|| {
                AppError::new(codes::NOT_FOUND, "Incident is not in the visible list")
                    .with_details(format!("incidentId={incident_id}"))
            })?;
        self.edit.open(&incident)
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_editing()
    }

    pub fn edit_draft(&self) -> Option<&IncidentDraft> {
        self.edit.draft()
    }

    pub fn edit_draft_mut(&mut self) -> Option<&mut IncidentDraft> {
        self.edit.draft_mut()
    }

    pub fn discard_edit(&mut self) {
        self.edit.discard();
    }

    pub fn commit_edit(&mut self, repo: &dyn IncidentRepository) -> Result<Incident, AppError> {
        self.edit.commit(&mut self.store, repo, &self.principal)
    }
}
