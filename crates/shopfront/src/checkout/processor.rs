//! Order processing.
//!
//! There is no real payment gateway. [`SimulatedProcessor`] waits for a
//! configured delay and then approves or declines.

use crate::checkout::Order;
use crate::CommerceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backend that accepts or rejects a placed order.
#[async_trait]
pub trait OrderProcessor: Send + Sync {
    /// Process an order. An error means the order was not accepted.
    async fn process(&self, order: &Order) -> Result<(), CommerceError>;
}

/// Timing for order processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingSettings {
    /// Simulated processing delay in milliseconds.
    pub delay_ms: u64,
    /// Give up on the processor after this many milliseconds.
    pub timeout_ms: u64,
}

impl Default for ProcessingSettings {
    fn default() -> Self {
        Self {
            delay_ms: 2000,
            timeout_ms: 10_000,
        }
    }
}

impl ProcessingSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The timeout must be positive and longer than the simulated delay.
    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.timeout_ms == 0 {
            return Err(CommerceError::Validation(
                "timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.delay_ms >= self.timeout_ms {
            return Err(CommerceError::Validation(format!(
                "delay_ms ({}) must be less than timeout_ms ({})",
                self.delay_ms, self.timeout_ms
            )));
        }
        Ok(())
    }
}

/// What the simulated processor answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SimulatedOutcome {
    #[default]
    Approve,
    Decline,
}

/// Processor that sleeps, then answers with a fixed outcome.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProcessor {
    delay: Duration,
    outcome: SimulatedOutcome,
}

impl SimulatedProcessor {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            outcome: SimulatedOutcome::Approve,
        }
    }

    /// Approve without waiting.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn with_outcome(mut self, outcome: SimulatedOutcome) -> Self {
        self.outcome = outcome;
        self
    }
}

#[async_trait]
impl OrderProcessor for SimulatedProcessor {
    async fn process(&self, order: &Order) -> Result<(), CommerceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match self.outcome {
            SimulatedOutcome::Approve => Ok(()),
            SimulatedOutcome::Decline => Err(CommerceError::PaymentDeclined(format!(
                "card ending {} was declined",
                order.payment.card_last4
            ))),
        }
    }
}
