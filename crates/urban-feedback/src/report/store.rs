//! In-memory report history, newest first.

use std::collections::VecDeque;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::error::ReportError;

use super::model::{Report, ReportStatus};

// ─── StatusCounts ───────────────────────────────────────────────────────────

/// Number of reports per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.processing + self.completed
    }
}

// ─── ReportStore ────────────────────────────────────────────────────────────

/// Ordered collection of submitted reports.
///
/// New reports are inserted at the front, so `list()` always returns the most
/// recent submission first.
pub struct ReportStore {
    reports: RwLock<VecDeque<Report>>,
}

impl ReportStore {
    pub fn new() -> Self {
        Self {
            reports: RwLock::new(VecDeque::new()),
        }
    }

    /// Creates a store seeded with existing reports, ordered newest first.
    pub fn with_reports(reports: impl IntoIterator<Item = Report>) -> Self {
        let mut reports: Vec<Report> = reports.into_iter().collect();
        reports.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        Self {
            reports: RwLock::new(reports.into()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, VecDeque<Report>> {
        match self.reports.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Report store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, VecDeque<Report>> {
        match self.reports.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                log::warn!("Report store lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Prepends `report`.
    pub fn append(&self, report: Report) {
        log::debug!("Storing report {}", report.id());
        self.write().push_front(report);
    }

    /// Snapshot of all reports, newest first.
    pub fn list(&self) -> Vec<Report> {
        self.read().iter().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<Report> {
        self.read().iter().find(|r| r.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn counts(&self) -> StatusCounts {
        self.read()
            .iter()
            .fold(StatusCounts::default(), |mut counts, report| {
                match report.status() {
                    ReportStatus::Pending => counts.pending += 1,
                    ReportStatus::Processing => counts.processing += 1,
                    ReportStatus::Completed => counts.completed += 1,
                }
                counts
            })
    }

    /// Moves a report forward to `to`. Setting the current status again is a no-op.
    pub fn advance_status(&self, id: &str, to: ReportStatus) -> Result<Report, ReportError> {
        let mut reports = self.write();
        let report = reports
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| ReportError::NotFound(id.to_string()))?;

        let from = report.status();
        if to < from {
            return Err(ReportError::StatusRegression {
                id: id.to_string(),
                from,
                to,
            });
        }
        if to != from {
            log::info!("Report {} status {} -> {}", id, from, to);
            report.set_status(to);
        }
        Ok(report.clone())
    }
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}
