//! Stand-in classifier: waits for the configured latency, then picks a random
//! catalog category with a confidence drawn from the configured band.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use crate::config::ClassifierConfig;
use crate::device::ImageHandle;

use super::{Classification, Classifier, ClassifyError, IncidentCategory};

pub struct SimulatedClassifier {
    latency: Duration,
    min_confidence: f32,
    max_confidence: f32,
}

impl SimulatedClassifier {
    pub fn new(latency: Duration, min_confidence: f32, max_confidence: f32) -> Self {
        let (min_confidence, max_confidence) = if min_confidence <= max_confidence {
            (min_confidence, max_confidence)
        } else {
            (max_confidence, min_confidence)
        };
        Self {
            latency,
            min_confidence,
            max_confidence,
        }
    }

    pub fn from_config(config: &ClassifierConfig) -> Self {
        Self::new(
            config.latency(),
            config.min_confidence,
            config.max_confidence,
        )
    }

    fn draw(&self) -> Classification {
        let mut rng = rand::rng();
        let catalog = IncidentCategory::catalog();
        let category = catalog[rng.random_range(0..catalog.len())];
        let confidence = rng.random_range(self.min_confidence..=self.max_confidence);
        Classification {
            category,
            confidence,
        }
    }
}

impl Default for SimulatedClassifier {
    fn default() -> Self {
        Self::from_config(&ClassifierConfig::default())
    }
}

#[async_trait]
impl Classifier for SimulatedClassifier {
    async fn classify(&self, image: &ImageHandle) -> Result<Classification, ClassifyError> {
        tokio::time::sleep(self.latency).await;
        let result = self.draw();
        debug!(
            image = %image,
            category = result.category.id,
            confidence = result.confidence,
            "Simulated classification"
        );
        Ok(result)
    }
}
