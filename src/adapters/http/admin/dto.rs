use serde::Deserialize;

use crate::adapters::http::error::ApiError;
use crate::domain::review::ReportStatus;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportsParams {
    pub status: Option<String>,
}

impl ReportsParams {
    /// Empty or missing means every status.
    pub fn status(&self) -> Result<Option<ReportStatus>, ApiError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => ReportStatus::parse(raw)
                .map(Some)
                .ok_or_else(|| ApiError::bad_request("Stato non valido")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(status: Option<&str>) -> ReportsParams {
        ReportsParams {
            status: status.map(String::from),
        }
    }

    #[test]
    fn status_filter_parses() {
        assert_eq!(params(None).status().unwrap(), None);
        assert_eq!(params(Some("")).status().unwrap(), None);
        assert_eq!(
            params(Some("resolved")).status().unwrap(),
            Some(ReportStatus::Resolved)
        );
        assert!(params(Some("archived")).status().is_err());
    }
}
