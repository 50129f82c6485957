//! Pipeline progress broadcaster for real-time status streaming.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::ProgressConfig;
use crate::pipeline::Notice;

/// Phase of a report-creation run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    Uploading,
    Analyzing,
    Locating,
    ResolvingAddress,
    Completed,
    Degraded,
    Aborted,
    Submitted,
    Reset,
}

impl PipelinePhase {
    /// Progress label shown while the phase is active.
    pub fn label(&self) -> &'static str {
        match self {
            PipelinePhase::Uploading => "Uploading photo...",
            PipelinePhase::Analyzing => "Analyzing incident...",
            PipelinePhase::Locating => "Locating via GPS...",
            PipelinePhase::ResolvingAddress => "Verifying address...",
            PipelinePhase::Completed => "Analysis complete",
            PipelinePhase::Degraded => "Analysis complete with defaults",
            PipelinePhase::Aborted => "Analysis stopped",
            PipelinePhase::Submitted => "Report submitted",
            PipelinePhase::Reset => "Ready",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PipelinePhase::Completed | PipelinePhase::Degraded | PipelinePhase::Aborted
        )
    }
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelinePhase::Uploading => write!(f, "Uploading"),
            PipelinePhase::Analyzing => write!(f, "Analyzing"),
            PipelinePhase::Locating => write!(f, "Locating"),
            PipelinePhase::ResolvingAddress => write!(f, "Resolving address"),
            PipelinePhase::Completed => write!(f, "Completed"),
            PipelinePhase::Degraded => write!(f, "Degraded"),
            PipelinePhase::Aborted => write!(f, "Aborted"),
            PipelinePhase::Submitted => write!(f, "Submitted"),
            PipelinePhase::Reset => write!(f, "Reset"),
        }
    }
}

/// Progress event for a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineProgressEvent {
    /// Run this event belongs to.
    pub run_id: u64,
    /// Current phase.
    pub phase: PipelinePhase,
    /// Human-readable message describing current activity.
    pub message: String,
    /// Timestamp of this event.
    pub timestamp: DateTime<Utc>,
    /// User-facing notice, if the run raised one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
    /// Detected category id (set when analysis finishes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Resolved address (set when analysis finishes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Stored report id (set on submission).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<String>,
}

impl PipelineProgressEvent {
    pub fn new(run_id: u64, phase: PipelinePhase) -> Self {
        Self {
            run_id,
            phase,
            message: phase.label().to_string(),
            timestamp: Utc::now(),
            notice: None,
            category: None,
            address: None,
            report_id: None,
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.message = notice.message().to_string();
        self.notice = Some(notice);
        self
    }

    pub fn with_detection(mut self, category: &str, address: &str) -> Self {
        self.category = Some(category.to_string());
        self.address = Some(address.to_string());
        self
    }

    pub fn with_report(mut self, report_id: &str) -> Self {
        self.report_id = Some(report_id.to_string());
        self
    }
}

/// Broadcasts pipeline progress events for streaming.
#[derive(Clone)]
pub struct ProgressBroadcaster {
    sender: Arc<broadcast::Sender<PipelineProgressEvent>>,
}

impl ProgressBroadcaster {
    /// Creates a new broadcaster with the specified channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn from_config(config: &ProgressConfig) -> Self {
        Self::new(config.channel_capacity)
    }

    /// Sends a progress event to all subscribers.
    pub fn send(&self, event: PipelineProgressEvent) {
        // No active receivers is fine
        let _ = self.sender.send(event);
    }

    /// Creates a new subscriber for progress events.
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineProgressEvent> {
        self.sender.subscribe()
    }
}

impl Default for ProgressBroadcaster {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcaster_send_receive() {
        let broadcaster = ProgressBroadcaster::new(10);
        let mut rx = broadcaster.subscribe();

        broadcaster.send(PipelineProgressEvent::new(7, PipelinePhase::Analyzing));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.run_id, 7);
        assert_eq!(received.phase, PipelinePhase::Analyzing);
        assert_eq!(received.message, "Analyzing incident...");
    }

    #[test]
    fn test_from_config_uses_capacity() {
        let broadcaster = ProgressBroadcaster::from_config(&ProgressConfig {
            channel_capacity: 1,
        });
        let mut rx = broadcaster.subscribe();

        broadcaster.send(PipelineProgressEvent::new(1, PipelinePhase::Uploading));
        broadcaster.send(PipelineProgressEvent::new(1, PipelinePhase::Analyzing));

        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Lagged(1))
        ));
        assert_eq!(rx.try_recv().unwrap().phase, PipelinePhase::Analyzing);
    }

    #[test]
    fn test_send_without_subscribers_is_silent() {
        let broadcaster = ProgressBroadcaster::default();
        broadcaster.send(PipelineProgressEvent::new(1, PipelinePhase::Uploading));
    }

    #[test]
    fn test_notice_replaces_message() {
        let event = PipelineProgressEvent::new(2, PipelinePhase::Aborted)
            .with_notice(Notice::PermissionRequired);
        assert_eq!(event.notice, Some(Notice::PermissionRequired));
        assert_eq!(event.message, Notice::PermissionRequired.message());
    }

    #[test]
    fn test_event_serializes_camel_case_and_skips_empty() {
        let event = PipelineProgressEvent::new(3, PipelinePhase::Completed)
            .with_detection("trash", "5 Le Loi, District 1, HCMC");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["runId"], 3);
        assert_eq!(json["phase"], "completed");
        assert_eq!(json["category"], "trash");
        assert!(json.get("reportId").is_none());
        assert!(json.get("notice").is_none());
    }

    #[test]
    fn test_terminal_phases() {
        assert!(PipelinePhase::Degraded.is_terminal());
        assert!(!PipelinePhase::Locating.is_terminal());
        assert!(!PipelinePhase::Submitted.is_terminal());
    }
}
