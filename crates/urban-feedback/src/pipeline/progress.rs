use crate::broadcast::{PipelinePhase, PipelineProgressEvent, ProgressBroadcaster};

use super::state::{DetectedData, Notice};

/// Events emitted by the pipeline and the finalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Phase {
        run: u64,
        phase: PipelinePhase,
    },
    Notice {
        run: u64,
        notice: Notice,
    },
    Finished {
        run: u64,
        phase: PipelinePhase,
        detected: Option<DetectedData>,
    },
    Submitted {
        run: u64,
        report_id: String,
    },
    Reset {
        run: u64,
    },
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

/// No-op reporter for unit tests.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Bridges pipeline events to the broadcast channel.
pub struct BroadcastProgress {
    broadcaster: ProgressBroadcaster,
}

impl BroadcastProgress {
    pub fn new(broadcaster: ProgressBroadcaster) -> Self {
        Self { broadcaster }
    }
}

impl ProgressReporter for BroadcastProgress {
    fn report(&self, event: ProgressEvent) {
        let event = match event {
            ProgressEvent::Phase { run, phase } => PipelineProgressEvent::new(run, phase),
            ProgressEvent::Notice { run, notice } => {
                let phase = match notice {
                    Notice::PermissionRequired => PipelinePhase::Aborted,
                    Notice::LocationUnavailable => PipelinePhase::Degraded,
                };
                PipelineProgressEvent::new(run, phase).with_notice(notice)
            }
            ProgressEvent::Finished {
                run,
                phase,
                detected,
            } => {
                let event = PipelineProgressEvent::new(run, phase);
                match detected {
                    Some(d) => event.with_detection(&d.category.id, &d.address),
                    None => event,
                }
            }
            ProgressEvent::Submitted { run, report_id } => {
                PipelineProgressEvent::new(run, PipelinePhase::Submitted).with_report(&report_id)
            }
            ProgressEvent::Reset { run } => PipelineProgressEvent::new(run, PipelinePhase::Reset),
        };
        self.broadcaster.send(event);
    }
}
