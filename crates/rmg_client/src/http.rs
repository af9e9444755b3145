use rmg_core::domain::{Incident, IncidentId};
use rmg_core::error::{codes, AppError};
use rmg_core::repo::IncidentRepository;

/// Synchronous HTTP client for the incident service.
///
/// Speaks the service's REST surface:
/// - `GET    {base}/api/incidents/{ownerId}`
/// - `POST   {base}/api/incidents/addIncident?userId={ownerId}`
/// - `PUT    {base}/api/incidents/update`
/// - `DELETE {base}/api/incidents/delete/{incidentId}`
/// - `GET    {base}/api/incidents/search?incidentId={id}`
///
/// No timeouts and no automatic retries: every failure maps to a coded
/// [`AppError`] and the caller decides what to re-trigger. A 404 on the
/// search route is a lookup miss (`Ok(None)`), not an error.
#[derive(Debug, Clone)]
pub struct IncidentApiClient {
    base_url: String,
}

impl IncidentApiClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::new(
                "CLIENT_BAD_BASE_URL",
                "Incident service base URL must be http(s)",
            )
            .with_details(format!("base_url={base_url}")));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn map_remote_error(op: &str, err: ureq::Error) -> AppError {
    match err {
        ureq::Error::Status(404, _) => {
            AppError::new(codes::NOT_FOUND, format!("{op}: target not found on the service"))
                .with_details("status=404")
        }
        ureq::Error::Status(409, _) => AppError::new(
            codes::DUPLICATE_INCIDENT_ID,
            format!("{op}: incident identifier already exists"),
        )
        .with_details("status=409"),
        ureq::Error::Status(status, _) => AppError::new(
            codes::REMOTE_REJECTED,
            format!("{op}: service rejected the request"),
        )
        .with_details(format!("status={status}")),
        other => AppError::new(
            codes::REMOTE_UNAVAILABLE,
            format!("{op}: service unreachable"),
        )
        .with_details(other.to_string())
        .with_retryable(true),
    }
}

fn log_and_map(op: &str, err: ureq::Error) -> AppError {
    let mapped = map_remote_error(op, err);
    tracing::warn!(code = %mapped.code, op, "incident service call failed");
    mapped
}

fn decode_error(op: &str, err: std::io::Error) -> AppError {
    AppError::new(
        codes::REMOTE_DECODE_FAILED,
        format!("{op}: could not decode service response"),
    )
    .with_details(err.to_string())
}

impl IncidentRepository for IncidentApiClient {
    fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Incident>, AppError> {
        let url = format!("{}/api/incidents/{owner_id}", self.base_url);
        tracing::debug!(owner_id, "listing incidents");
        match ureq::get(&url).call() {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| decode_error("list incidents", e)),
            Err(err) => Err(log_and_map("list incidents", err)),
        }
    }

    fn create(&self, owner_id: i64, incident: &Incident) -> Result<Incident, AppError> {
        let url = format!(
            "{}/api/incidents/addIncident?userId={owner_id}",
            self.base_url
        );
        tracing::debug!(incident_id = %incident.incident_id, "creating incident");
        match ureq::post(&url).send_json(incident) {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| decode_error("create incident", e)),
            Err(err) => Err(log_and_map("create incident", err)),
        }
    }

    fn update(&self, incident: &Incident) -> Result<Incident, AppError> {
        let url = format!("{}/api/incidents/update", self.base_url);
        tracing::debug!(incident_id = %incident.incident_id, "updating incident");
        match ureq::put(&url).send_json(incident) {
            Ok(resp) => resp
                .into_json()
                .map_err(|e| decode_error("update incident", e)),
            Err(err) => Err(log_and_map("update incident", err)),
        }
    }

    fn delete(&self, incident_id: &IncidentId) -> Result<(), AppError> {
        let url = format!(
            "{}/api/incidents/delete/{}",
            self.base_url,
            incident_id.as_str()
        );
        tracing::debug!(%incident_id, "deleting incident");
        match ureq::delete(&url).call() {
            Ok(_resp) => Ok(()),
            Err(err) => Err(log_and_map("delete incident", err)),
        }
    }

    fn find_by_id(&self, incident_id: &IncidentId) -> Result<Option<Incident>, AppError> {
        let url = format!("{}/api/incidents/search", self.base_url);
        tracing::debug!(%incident_id, "searching incident");
        match ureq::get(&url)
            .query("incidentId", incident_id.as_str())
            .call()
        {
            Ok(resp) => resp
                .into_json()
                .map(Some)
                .map_err(|e| decode_error("search incident", e)),
            Err(ureq::Error::Status(404, _)) => Ok(None),
            Err(err) => Err(log_and_map("search incident", err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn status_error(status: u16) -> ureq::Error {
        let resp = ureq::Response::new(status, "err", "").expect("synthetic response");
        ureq::Error::Status(status, resp)
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = IncidentApiClient::new("http://localhost:8081/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8081");
    }

    #[test]
    fn status_codes_map_to_the_error_taxonomy() {
        let err = map_remote_error("update incident", status_error(404));
        assert!(err.is(codes::NOT_FOUND));
        assert!(!err.retryable);

        let err = map_remote_error("create incident", status_error(409));
        assert!(err.is(codes::DUPLICATE_INCIDENT_ID));

        let err = map_remote_error("create incident", status_error(500));
        assert!(err.is(codes::REMOTE_REJECTED));
        assert_eq!(err.details.as_deref(), Some("status=500"));
    }
}
