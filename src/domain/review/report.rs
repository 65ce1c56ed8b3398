//! Moderation reports filed against reviews.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReportId, ReviewId, Timestamp, UserId, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Resolved,
    Rejected,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Resolved => "resolved",
            ReportStatus::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(ReportStatus::Pending),
            "resolved" => Some(ReportStatus::Resolved),
            "rejected" => Some(ReportStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReport {
    pub id: ReportId,
    pub review_id: ReviewId,
    pub user_id: UserId,
    pub reason: String,
    pub details: Option<String>,
    pub status: ReportStatus,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
    pub moderator_notes: Option<String>,
}

impl ReviewReport {
    /// Moves the report to `status`. Leaving `pending` stamps the resolution
    /// time; returning to it clears the stamp.
    pub fn moderate(&mut self, status: ReportStatus, notes: Option<String>, now: Timestamp) {
        self.status = status;
        self.resolved_at = match status {
            ReportStatus::Pending => None,
            _ => Some(now),
        };
        if notes.is_some() {
            self.moderator_notes = notes;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub reason: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl NewReport {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.reason.trim().is_empty() {
            return Err(ValidationError::empty_field("reason"));
        }
        Ok(())
    }

    pub fn into_report(self, id: ReportId, review_id: ReviewId, reporter: UserId, now: Timestamp) -> ReviewReport {
        ReviewReport {
            id,
            review_id,
            user_id: reporter,
            reason: self.reason,
            details: self.details,
            status: ReportStatus::Pending,
            created_at: now,
            resolved_at: None,
            moderator_notes: None,
        }
    }
}
