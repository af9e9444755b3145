use crate::domain::{CreateDraft, Incident};
use crate::error::{codes, AppError};

/// Reject an unsubmittable create draft before any network call is issued.
///
/// The surface should already have disabled submission via
/// [`CreateDraft::can_submit`]; this is the hard gate behind it.
pub fn validate_create(draft: &CreateDraft) -> Result<(), AppError> {
    if draft.category.is_none() {
        return Err(
            AppError::new(codes::VALIDATION_FAILED, "A reporting category is required")
                .with_details("field=enterpriseOrGovernment"),
        );
    }
    if draft.details.trim().is_empty() {
        return Err(
            AppError::new(codes::VALIDATION_FAILED, "Incident details are required")
                .with_details("field=incidentDetails"),
        );
    }
    Ok(())
}

/// Reject an uncommittable edit draft before any network call is issued.
pub fn validate_commit(record: &Incident) -> Result<(), AppError> {
    if record.details.trim().is_empty() {
        return Err(
            AppError::new(codes::VALIDATION_FAILED, "Incident details are required")
                .with_details("field=incidentDetails"),
        );
    }
    Ok(())
}
