use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classifier::CategoryAssessment;
use crate::device::ImageHandle;
use crate::pipeline::{DetectedData, UNDETERMINED_ADDRESS};

/// Processing status of a report. Only ever moves forward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    Pending,
    Processing,
    Completed,
}

impl ReportStatus {
    /// Display label used by the report history.
    pub fn label(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Received",
            ReportStatus::Processing => "In progress",
            ReportStatus::Completed => "Resolved",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn non_blank_address(address: String) -> String {
    if address.trim().is_empty() {
        UNDETERMINED_ADDRESS.to_string()
    } else {
        address
    }
}

/// A submitted incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    id: String,
    image: ImageHandle,
    category: CategoryAssessment,
    address: String,
    description: String,
    status: ReportStatus,
    created_at: DateTime<Utc>,
}

impl Report {
    /// Builds a pending report from the detection of a finished run.
    pub fn from_detected(
        image: ImageHandle,
        detected: DetectedData,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            image,
            category: detected.category,
            address: non_blank_address(detected.address),
            description: description.into(),
            status: ReportStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Rebuilds a previously stored report, e.g. when seeding the history.
    /// A blank address is stored as [`UNDETERMINED_ADDRESS`].
    pub fn restore(
        id: impl Into<String>,
        image: ImageHandle,
        category: CategoryAssessment,
        address: impl Into<String>,
        description: impl Into<String>,
        status: ReportStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            image,
            category,
            address: non_blank_address(address.into()),
            description: description.into(),
            status,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn image(&self) -> &ImageHandle {
        &self.image
    }

    pub fn category(&self) -> &CategoryAssessment {
        &self.category
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> ReportStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_status(&mut self, status: ReportStatus) {
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::IncidentCategory;

    fn detected(address: &str) -> DetectedData {
        DetectedData {
            category: CategoryAssessment::new(IncidentCategory::find("trash").unwrap(), 0.91),
            address: address.to_string(),
        }
    }

    #[test]
    fn test_new_report_is_pending() {
        let report = Report::from_detected(
            ImageHandle::new("img"),
            detected("1 Le Loi, District 1"),
            "Overflowing bins",
        );

        assert_eq!(report.status(), ReportStatus::Pending);
        assert_eq!(report.category().id, "trash");
        assert_eq!(report.address(), "1 Le Loi, District 1");
        assert_eq!(report.description(), "Overflowing bins");
        assert!(!report.id().is_empty());
    }

    #[test]
    fn test_blank_address_is_replaced() {
        let report = Report::from_detected(ImageHandle::new("img"), detected("  "), "");
        assert_eq!(report.address(), UNDETERMINED_ADDRESS);
    }

    #[test]
    fn test_restored_blank_address_is_replaced() {
        let report = Report::restore(
            "seed",
            ImageHandle::new("img"),
            CategoryAssessment::new(IncidentCategory::find("tree").unwrap(), 0.9),
            " ",
            "",
            ReportStatus::Pending,
            Utc::now(),
        );
        assert_eq!(report.address(), UNDETERMINED_ADDRESS);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Report::from_detected(ImageHandle::new("a"), detected("x"), "");
        let b = Report::from_detected(ImageHandle::new("b"), detected("x"), "");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_status_order_and_labels() {
        assert!(ReportStatus::Pending < ReportStatus::Processing);
        assert!(ReportStatus::Processing < ReportStatus::Completed);
        assert_eq!(ReportStatus::Pending.to_string(), "Received");
        assert_eq!(ReportStatus::Processing.to_string(), "In progress");
        assert_eq!(ReportStatus::Completed.to_string(), "Resolved");
    }

    #[test]
    fn test_serializes_camel_case() {
        let report = Report::from_detected(ImageHandle::new("img"), detected("x"), "d");
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "pending");
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["category"]["id"], "trash");
    }
}
