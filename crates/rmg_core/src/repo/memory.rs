use std::collections::VecDeque;
use std::sync::Mutex;

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::IncidentRepository;
use crate::domain::{Incident, IncidentId, OwnerRef};
use crate::error::{codes, AppError};

/// In-memory repository used by tests and demos.
///
/// Mirrors the remote service's observable behavior: assigns surrogate ids
/// and report timestamps, enforces incident-identifier uniqueness, and can be
/// primed to fail upcoming calls so error paths get real coverage. The
/// `Mutex` exists only because trait methods take `&self`; the core runs
/// single-threaded.
pub struct MemoryRepository {
    inner: Mutex<Inner>,
}

struct Inner {
    incidents: Vec<Incident>,
    next_id: i64,
    fail_queue: VecDeque<AppError>,
    calls: u64,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                incidents: Vec::new(),
                next_id: 1,
                fail_queue: VecDeque::new(),
                calls: 0,
            }),
        }
    }

    /// Install server-side records directly, bypassing the create path.
    /// Records without an `id` get one assigned.
    pub fn seed(&self, incidents: Vec<Incident>) {
        let mut inner = self.inner.lock().unwrap();
        for mut incident in incidents {
            match incident.id {
                Some(id) => inner.next_id = inner.next_id.max(id + 1),
                None => {
                    incident.id = Some(inner.next_id);
                    inner.next_id += 1;
                }
            }
            inner.incidents.push(incident);
        }
    }

    /// Queue an error; each queued error fails exactly one upcoming call, in
    /// order.
    pub fn fail_next(&self, err: AppError) {
        self.inner.lock().unwrap().fail_queue.push_back(err);
    }

    /// Number of calls that reached the repository (including injected
    /// failures). Lets tests assert that local guards never issued a call.
    pub fn call_count(&self) -> u64 {
        self.inner.lock().unwrap().calls
    }

    /// Server-side view of the stored records, for assertions.
    pub fn snapshot(&self) -> Vec<Incident> {
        self.inner.lock().unwrap().incidents.clone()
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn begin(inner: &mut Inner) -> Result<(), AppError> {
    inner.calls += 1;
    match inner.fail_queue.pop_front() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn now_rfc3339_utc() -> Result<String, AppError> {
    let now = OffsetDateTime::now_utc();
    // Whole-second stamps, like the service: they survive canonicalization
    // byte-for-byte.
    let now = now.replace_nanosecond(0).unwrap_or(now);
    now.format(&Rfc3339).map_err(|e| {
        AppError::new(codes::REMOTE_REJECTED, "Failed to stamp report time")
            .with_details(e.to_string())
    })
}

impl IncidentRepository for MemoryRepository {
    fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Incident>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        begin(&mut inner)?;
        Ok(inner
            .incidents
            .iter()
            .filter(|i| i.owner.map(|o| o.id) == Some(owner_id))
            .cloned()
            .collect())
    }

    fn create(&self, owner_id: i64, incident: &Incident) -> Result<Incident, AppError> {
        let mut inner = self.inner.lock().unwrap();
        begin(&mut inner)?;
        if inner
            .incidents
            .iter()
            .any(|i| i.incident_id == incident.incident_id)
        {
            return Err(AppError::new(
                codes::DUPLICATE_INCIDENT_ID,
                "Incident identifier already exists",
            )
            .with_details(format!("incidentId={}", incident.incident_id)));
        }

        let mut created = incident.clone();
        created.id = Some(inner.next_id);
        inner.next_id += 1;
        created.owner = Some(OwnerRef { id: owner_id });
        created.reported_at = Some(now_rfc3339_utc()?);
        inner.incidents.push(created.clone());
        Ok(created)
    }

    fn update(&self, incident: &Incident) -> Result<Incident, AppError> {
        let mut inner = self.inner.lock().unwrap();
        begin(&mut inner)?;
        let Some(id) = incident.id else {
            return Err(AppError::new(codes::NOT_FOUND, "Incident has no server id"));
        };
        match inner.incidents.iter_mut().find(|i| i.id == Some(id)) {
            Some(slot) => {
                *slot = incident.clone();
                Ok(incident.clone())
            }
            None => Err(AppError::new(codes::NOT_FOUND, "Incident not found")
                .with_details(format!("id={id}"))),
        }
    }

    fn delete(&self, incident_id: &IncidentId) -> Result<(), AppError> {
        let mut inner = self.inner.lock().unwrap();
        begin(&mut inner)?;
        let before = inner.incidents.len();
        inner.incidents.retain(|i| &i.incident_id != incident_id);
        if inner.incidents.len() == before {
            return Err(AppError::new(codes::NOT_FOUND, "Incident not found")
                .with_details(format!("incidentId={incident_id}")));
        }
        Ok(())
    }

    fn find_by_id(&self, incident_id: &IncidentId) -> Result<Option<Incident>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        begin(&mut inner)?;
        Ok(inner
            .incidents
            .iter()
            .find(|i| &i.incident_id == incident_id)
            .cloned())
    }
}
