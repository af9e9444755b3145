use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{codes, AppError};

/// Client-generated human-readable incident identifier.
///
/// Shape: `RMG` + five random decimal digits + four-digit calendar year,
/// e.g. `RMG4827192024`. Assigned exactly once, immediately before the create
/// call is issued, and immutable afterwards. Used as the display key and as
/// the argument to delete and search.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncidentId(String);

impl IncidentId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shape check only. Uniqueness is the server's call.
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == 12
            && self.0.starts_with("RMG")
            && self.0.as_bytes()[3..].iter().all(u8::is_ascii_digit)
    }
}

impl fmt::Debug for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IncidentId({:?})", self.0)
    }
}

impl fmt::Display for IncidentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reporting category. Required at creation, editable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Enterprise,
    Government,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Enterprise => "Enterprise",
            Category::Government => "Government",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status. The wire label for `InProgress` is the service's
/// historical `"In progress"` spelling. Once `Closed`, both the status field
/// and the incident's edit affordance are locked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    Open,
    #[serde(rename = "In progress")]
    InProgress,
    Closed,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::InProgress => "In progress",
            Status::Closed => "Closed",
        }
    }

    pub fn is_closed(self) -> bool {
        matches!(self, Status::Closed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner reference carried on update payloads (`"user": {"id": ...}` on the
/// wire).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub id: i64,
}

/// The sole domain entity. Serializes to the remote service's JSON shape.
///
/// `id` and `reported_at` are server-assigned on the first successful create
/// and absent before it; `reported_at` is canonical RFC3339 UTC once it has
/// passed through an edit draft.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub incident_id: IncidentId,
    pub reporter_name: String,
    #[serde(rename = "enterpriseOrGovernment")]
    pub category: Category,
    #[serde(rename = "incidentDetails")]
    pub details: String,
    pub priority: Priority,
    pub status: Status,
    #[serde(
        rename = "incidentReportedDateTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reported_at: Option<String>,
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerRef>,
}

/// Wire shape handed over by the authentication collaborator. Both fields
/// can be absent; [`Principal::from_auth`] is the single conversion point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct AuthUser {
    pub id: Option<i64>,
    pub username: Option<String>,
}

/// Authenticated user on whose behalf every operation runs.
///
/// Constructed once per session. Owning a value is proof the identity check
/// already passed, so owner-scoped operations take `&Principal` and never
/// re-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: i64,
    pub username: String,
}

impl Principal {
    pub fn from_auth(auth: AuthUser) -> Result<Self, AppError> {
        let id = auth.id.ok_or_else(|| {
            AppError::new(codes::IDENTITY_MISSING, "No authenticated user id available")
        })?;
        let username = match auth.username {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                return Err(AppError::new(
                    codes::IDENTITY_MISSING,
                    "No authenticated username available",
                ))
            }
        };
        Ok(Self { id, username })
    }

    pub fn owner_ref(&self) -> OwnerRef {
        OwnerRef { id: self.id }
    }
}

/// Create-form state. Defaults model the empty form: no category chosen,
/// empty details, priority `Low`, status `Open`. The reporter name is not
/// part of the draft; it lives on the [`Principal`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateDraft {
    pub category: Option<Category>,
    pub details: String,
    pub priority: Priority,
    pub status: Status,
}

impl CreateDraft {
    /// Submission-enable predicate: the calling surface disables the create
    /// action while this is false, so `VALIDATION_FAILED` never reaches the
    /// network.
    pub fn can_submit(&self) -> bool {
        self.category.is_some() && !self.details.trim().is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
