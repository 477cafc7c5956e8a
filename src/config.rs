use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::constants::{
    FRAME_RATE, GHOST_STARTING_SPEED, MODE_SCHEDULE, PLAYER_STARTING_SPEED, TUNNEL_LEFT_COL,
    TILE_SIZE, TUNNEL_RIGHT_COL, TUNNEL_ROW, TUNNEL_WRAP_OFFSET,
};
use crate::types::GhostMode;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub key: u32,
    #[serde(rename = "atMs")]
    pub at_ms: u64,
    pub tag: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelConfig {
    pub row: i32,
    #[serde(rename = "leftCol")]
    pub left_col: i32,
    #[serde(rename = "rightCol")]
    pub right_col: i32,
    #[serde(rename = "wrapOffset")]
    pub wrap_offset: f64,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            row: TUNNEL_ROW,
            left_col: TUNNEL_LEFT_COL,
            right_col: TUNNEL_RIGHT_COL,
            wrap_offset: TUNNEL_WRAP_OFFSET,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    #[serde(rename = "frameRate")]
    pub frame_rate: u32,
    #[serde(rename = "playerSpeed")]
    pub player_speed: f64,
    #[serde(rename = "ghostSpeed")]
    pub ghost_speed: f64,
    pub tunnel: TunnelConfig,
    pub schedule: Vec<ScheduleEntry>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            player_speed: PLAYER_STARTING_SPEED,
            ghost_speed: GHOST_STARTING_SPEED,
            tunnel: TunnelConfig::default(),
            schedule: MODE_SCHEDULE
                .iter()
                .map(|(key, at_ms, tag)| ScheduleEntry {
                    key: *key,
                    at_ms: *at_ms,
                    tag: tag.to_string(),
                })
                .collect(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.frame_rate == 0 {
            bail!("frameRate must be positive");
        }
        for (name, speed) in [("playerSpeed", self.player_speed), ("ghostSpeed", self.ghost_speed)] {
            if !speed.is_finite() || speed < 0.0 {
                bail!("{name} must be a finite, non-negative number (got {speed})");
            }
            // Motion checks one tile boundary per frame.
            if speed / self.frame_rate as f64 >= TILE_SIZE as f64 {
                bail!(
                    "{name} of {speed} px/s covers a whole tile per frame at {} fps",
                    self.frame_rate
                );
            }
        }
        let mut keys = HashSet::new();
        for entry in &self.schedule {
            if !keys.insert(entry.key) {
                bail!("schedule key {} is used twice", entry.key);
            }
            if GhostMode::parse_tag(&entry.tag).is_none() {
                bail!("schedule key {} has unknown tag {:?}", entry.key, entry.tag);
            }
        }
        Ok(())
    }

    pub fn frame_ms(&self, frame: u64) -> u64 {
        frame.saturating_mul(1_000) / self.frame_rate as u64
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn default_config_is_valid_and_matches_reference_cadence() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.schedule.len(), 7);
        assert_eq!(config.schedule[0].at_ms, 7_000);
        assert_eq!(config.schedule[6].tag, "chase");
        assert_eq!(config.frame_ms(420), 7_000);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"ghostSpeed": 60.0}}"#).expect("write config");
        let config = EngineConfig::from_json_file(file.path()).expect("config should load");
        assert_eq!(config.ghost_speed, 60.0);
        assert_eq!(config.player_speed, PLAYER_STARTING_SPEED);
        assert_eq!(config.tunnel.row, TUNNEL_ROW);
    }

    #[test]
    fn duplicate_schedule_keys_are_rejected() {
        let mut config = EngineConfig::default();
        config.schedule[1].key = config.schedule[0].key;
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_speeds_and_tags_are_rejected() {
        let mut config = EngineConfig {
            frame_rate: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
        config.frame_rate = 60;
        config.ghost_speed = f64::NAN;
        assert!(config.validate().is_err());
        config.ghost_speed = 10.0;
        config.player_speed = 1_200.0;
        assert!(config.validate().is_err());
        config.player_speed = 480.0;
        assert!(config.validate().is_err());
        config.player_speed = 470.0;
        assert!(config.validate().is_ok());
        config.schedule[0].tag = "frightened".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = EngineConfig::from_json_file(Path::new("/nonexistent/maze.json"))
            .expect_err("missing file should fail");
        assert!(error.to_string().contains("/nonexistent/maze.json"));
    }
}
