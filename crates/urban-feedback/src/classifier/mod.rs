//! Incident classification.
//!
//! The pipeline only depends on the [`Classifier`] trait. [`SimulatedClassifier`]
//! stands in until a real model is wired up.

pub mod simulated;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::device::ImageHandle;

pub use simulated::SimulatedClassifier;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Classification failed: {0}")]
    Failed(String),
}

/// Entry of the closed incident catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncidentCategory {
    pub id: &'static str,
    pub label: &'static str,
}

const CATALOG: &[IncidentCategory] = &[
    IncidentCategory {
        id: "pothole",
        label: "Road damage (pothole)",
    },
    IncidentCategory {
        id: "trash",
        label: "Littering",
    },
    IncidentCategory {
        id: "light",
        label: "Street lighting fault",
    },
    IncidentCategory {
        id: "tree",
        label: "Fallen tree",
    },
];

impl IncidentCategory {
    pub fn catalog() -> &'static [IncidentCategory] {
        CATALOG
    }

    pub fn find(id: &str) -> Option<IncidentCategory> {
        CATALOG.iter().copied().find(|c| c.id == id)
    }
}

/// Output of a classifier: a catalog category and how sure the model is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub category: IncidentCategory,
    pub confidence: f32,
}

impl Classification {
    pub fn into_assessment(self) -> CategoryAssessment {
        CategoryAssessment::new(self.category, self.confidence)
    }
}

/// Category as stored on detected data and reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAssessment {
    pub id: String,
    pub label: String,
    /// Always within [0, 1].
    pub confidence: f32,
}

impl CategoryAssessment {
    pub fn new(category: IncidentCategory, confidence: f32) -> Self {
        Self {
            id: category.id.to_string(),
            label: category.label.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Category used when a run degrades. Carries no classification evidence.
    pub fn fallback(category: IncidentCategory) -> Self {
        Self::new(category, 0.0)
    }
}

/// Replaceable classification capability.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, image: &ImageHandle) -> Result<Classification, ClassifyError>;
}
