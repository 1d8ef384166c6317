//! Timed status messages shown between completion and the result screen.
//!
//! The sequence only reports progress text and never touches the session.

use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingStep {
    /// Offset from the start of the sequence.
    #[serde(with = "millis")]
    pub at: Duration,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadingSequence {
    pub steps: Vec<LoadingStep>,
    /// Pause after the final step before the result is shown.
    #[serde(with = "millis")]
    pub settle: Duration,
}

impl LoadingSequence {
    pub fn standard() -> Self {
        let step = |millis: u64, message: &str| LoadingStep {
            at: Duration::from_millis(millis),
            message: message.to_string(),
        };

        Self {
            steps: vec![
                step(0, "Analyzing your answers..."),
                step(500, "Cross-checking legal risk factors..."),
                step(1500, "Comparing with local market data..."),
                step(2500, "Diagnosis report ready"),
            ],
            settle: Duration::from_millis(800),
        }
    }

    /// No delays at all, for non-interactive callers.
    pub fn instant() -> Self {
        Self {
            steps: Vec::new(),
            settle: Duration::ZERO,
        }
    }

    pub fn total_duration(&self) -> Duration {
        self.steps
            .iter()
            .map(|step| step.at)
            .max()
            .unwrap_or(Duration::ZERO)
            + self.settle
    }

    /// Emit each message at its offset, then wait out the settle pause.
    pub async fn play<F>(&self, mut on_step: F)
    where
        F: FnMut(&LoadingStep),
    {
        let mut elapsed = Duration::ZERO;
        for step in &self.steps {
            if step.at > elapsed {
                tokio::time::sleep(step.at - elapsed).await;
                elapsed = step.at;
            }
            on_step(step);
        }
        if !self.settle.is_zero() {
            tokio::time::sleep(self.settle).await;
        }
    }
}

mod millis {
    use std::time::Duration;

    use serde::Serializer;

    pub(super) fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }
}
