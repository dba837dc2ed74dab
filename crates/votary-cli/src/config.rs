//! CLI configuration management.
//!
//! Data directory, thresholds and the optional registry admin gate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use votary_governance::GovernanceConfig;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Data directory holding proposals.json and registry.json
    pub data_dir: PathBuf,
    /// Distinct For votes required to accept a proposal
    pub approval_threshold: usize,
    /// Distinct Against votes required to reject a proposal
    pub rejection_threshold: usize,
    /// Optional password gating registry changes; unset means ungated
    pub admin_password: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".votary"),
            approval_threshold: 3,
            rejection_threshold: 3,
            admin_password: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from file, writing the defaults on first run.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".votary").join("config.toml"))
    }

    /// Path of the proposals document.
    pub fn proposals_path(&self) -> PathBuf {
        self.data_dir.join("proposals.json")
    }

    /// Path of the enrollment registry document.
    pub fn registry_path(&self) -> PathBuf {
        self.data_dir.join("registry.json")
    }

    /// The governance thresholds configured here.
    pub fn governance_config(&self) -> GovernanceConfig {
        GovernanceConfig {
            approval_threshold: self.approval_threshold,
            rejection_threshold: self.rejection_threshold,
        }
    }
}
