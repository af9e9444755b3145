use crate::domain::{Incident, IncidentId};
use crate::error::AppError;

pub mod memory;

/// Remote CRUD contract for incident records.
///
/// This is the seam to the external service. Implementations live behind it
/// (HTTP in `rmg_client`, an in-process fake in [`memory`]) and every failure
/// comes back as a coded [`AppError`]; the store applies results to its local
/// sequence only on success.
pub trait IncidentRepository {
    fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Incident>, AppError>;

    /// Returns the server-confirmed record: surrogate `id` and `reported_at`
    /// assigned, owner reference attached. Rejects an already-taken
    /// identifier with `DUPLICATE_INCIDENT_ID`.
    fn create(&self, owner_id: i64, incident: &Incident) -> Result<Incident, AppError>;

    /// Whole-record replace keyed by the server `id`.
    fn update(&self, incident: &Incident) -> Result<Incident, AppError>;

    fn delete(&self, incident_id: &IncidentId) -> Result<(), AppError>;

    /// `Ok(None)` is a lookup miss, not an error.
    fn find_by_id(&self, incident_id: &IncidentId) -> Result<Option<Incident>, AppError>;
}
