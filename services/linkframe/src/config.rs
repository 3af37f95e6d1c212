//! Configuration handling for frame dissection.
//!
//! Settings are read from the `linkframe` section of a YAML file and applied
//! on top of the defaults; anything missing keeps its default value.

use std::path::Path;

use anyhow::{bail, Context, Result};
use linkframe_wire::{AckFrame, BufferPolicy};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{component_info, component_warn};

/// Largest 802.11 MPDU (VHT), in bytes
pub const DEFAULT_MAX_FRAME_SIZE: usize = 11454;

/// Linkframe configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkframeConfig {
    /// Largest frame, header plus payload, accepted or produced
    pub max_frame_size: usize,
    /// How recomputed headers treat oversized backing buffers
    pub buffer_policy: BufferPolicy,
    /// Log level used by `init_logging`
    pub log_level: String,
}

impl Default for LinkframeConfig {
    fn default() -> Self {
        Self {
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            buffer_policy: BufferPolicy::Reuse,
            log_level: "info".to_string(),
        }
    }
}

/// Root configuration structure (matches the YAML structure)
#[derive(Debug, Deserialize)]
struct RootConfig {
    linkframe: Option<SectionConfig>,
}

#[derive(Debug, Deserialize)]
struct SectionConfig {
    max_frame_size: Option<usize>,
    buffer_policy: Option<BufferPolicy>,
    log_level: Option<String>,
}

impl LinkframeConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file is missing or cannot be parsed
    pub fn load_from_file<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let mut config = Self::default();

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match serde_yaml::from_str::<RootConfig>(&content) {
                Ok(root_config) => {
                    config.apply_root_config(root_config);
                    info!("Loaded configuration from {:?}", config_path.as_ref());
                }
                Err(e) => {
                    component_warn!(
                        "config",
                        "Failed to parse config file {:?}, using defaults: {}",
                        config_path.as_ref(),
                        e
                    );
                }
            },
            Err(_) => {
                component_warn!(
                    "config",
                    "Config file {:?} not found, using defaults",
                    config_path.as_ref()
                );
            }
        }

        config.validate()?;

        component_info!(
            "config",
            "Final linkframe configuration: max_frame_size={}, buffer_policy={:?}, log_level={}",
            config.max_frame_size, config.buffer_policy, config.log_level
        );

        Ok(config)
    }

    /// Parse configuration from YAML text; parse errors are returned
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let root_config: RootConfig =
            serde_yaml::from_str(content).context("invalid linkframe configuration")?;

        let mut config = Self::default();
        config.apply_root_config(root_config);
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no frame could satisfy
    pub fn validate(&self) -> Result<()> {
        let smallest = AckFrame::FRAME_SIZE;
        if self.max_frame_size < smallest {
            bail!(
                "max_frame_size {} is smaller than the smallest frame header ({} bytes)",
                self.max_frame_size,
                smallest
            );
        }
        Ok(())
    }

    fn apply_root_config(&mut self, root_config: RootConfig) {
        let Some(section) = root_config.linkframe else {
            return;
        };

        if let Some(max_frame_size) = section.max_frame_size {
            self.max_frame_size = max_frame_size;
        }
        if let Some(buffer_policy) = section.buffer_policy {
            self.buffer_policy = buffer_policy;
        }
        if let Some(log_level) = section.log_level {
            self.log_level = log_level;
        }
    }
}
