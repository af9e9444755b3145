use crate::domain::{Incident, IncidentId, Principal};
use crate::error::AppError;
use crate::repo::IncidentRepository;
use crate::store::IncidentListStore;

/// Identifier search over the incident list.
///
/// The query is matched server-side (`find_by_id`), never as a local
/// substring filter. Results live in an overlay on top of the store: a
/// lookup miss shows an empty list without destroying the store's last full
/// fetch, and lifting the filter re-fetches rather than reusing a stale
/// cached list.
#[derive(Debug, Default)]
pub struct SearchController {
    query: String,
    results: Option<Vec<Incident>>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn is_filtered(&self) -> bool {
        self.results.is_some()
    }

    /// The set the rendering layer shows: the filtered overlay when a search
    /// is active, otherwise the store's full sequence.
    pub fn visible<'a>(&'a self, store: &'a IncidentListStore) -> &'a [Incident] {
        match &self.results {
            Some(results) => results,
            None => store.incidents(),
        }
    }

    /// Run the search. An empty query is equivalent to clearing the filter —
    /// it falls back to a full re-fetch, not a no-op and not an error. A
    /// miss installs an empty overlay and reports success. A remote failure
    /// leaves both the overlay and the store untouched.
    pub fn submit(
        &mut self,
        store: &mut IncidentListStore,
        repo: &dyn IncidentRepository,
        principal: &Principal,
    ) -> Result<(), AppError> {
        let query = self.query.trim();
        if query.is_empty() {
            return self.clear(store, repo, principal);
        }

        let target = IncidentId::new(query);
        let found = repo.find_by_id(&target)?;
        self.results = Some(found.into_iter().collect());
        Ok(())
    }

    /// Lift the filter and re-fetch the full list, so deletions and edits
    /// performed while filtered are reflected. The overlay is dropped only
    /// once the fresh fetch succeeds.
    pub fn clear(
        &mut self,
        store: &mut IncidentListStore,
        repo: &dyn IncidentRepository,
        principal: &Principal,
    ) -> Result<(), AppError> {
        store.load_all(repo, principal)?;
        self.results = None;
        self.query.clear();
        Ok(())
    }
}
