//! Configuration model for the shell and its simulations.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Fixed delays of the simulated asynchronous operations, in milliseconds.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SimulationConfig {
    pub upload_ms: u64,
    pub payment_ms: u64,
    pub chat_reply_ms: u64,
    pub expert_handoff_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            upload_ms: 3000,
            payment_ms: 3000,
            chat_reply_ms: 1500,
            expert_handoff_ms: 2000,
        }
    }
}

impl SimulationConfig {
    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_ms)
    }

    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_ms)
    }

    pub fn expert_handoff_delay(&self) -> Duration {
        Duration::from_millis(self.expert_handoff_ms)
    }
}

/// Thresholds used by the expert and vendor gates.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// The expert gate opens once the cart exceeds this share of the budget.
    pub expert_budget_ratio: f64,
    /// Placed items that open the vendor gate without a consultation.
    pub vendor_min_placed: u32,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            expert_budget_ratio: 0.8,
            vendor_min_placed: 3,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ShowroomConfig {
    pub simulation: SimulationConfig,
    pub gates: GateConfig,
}

/// Source of the showroom configuration.
#[async_trait]
pub trait ConfigRepository: Send + Sync {
    /// Loads the configuration, falling back to defaults when none is stored.
    async fn load(&self) -> Result<ShowroomConfig>;

    async fn save(&self, config: &ShowroomConfig) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShowroomConfig::default();
        assert_eq!(config.simulation.upload_delay(), Duration::from_secs(3));
        assert_eq!(config.simulation.chat_reply_delay(), Duration::from_millis(1500));
        assert_eq!(config.gates.vendor_min_placed, 3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ShowroomConfig = toml::from_str("[simulation]\npayment_ms = 10\n").unwrap();
        assert_eq!(config.simulation.payment_ms, 10);
        assert_eq!(config.simulation.upload_ms, 3000);
        assert_eq!(config.gates, GateConfig::default());
    }
}
