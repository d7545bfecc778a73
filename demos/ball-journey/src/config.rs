use serde::{Deserialize, Serialize};

/// Tunables for the ball demos. Loaded from an optional JSON file at
/// startup; every field falls back to the classic demo constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Sweep start x.
    #[serde(default = "default_begin_x")]
    pub begin_x: f32,
    /// Sweep end x (inclusive).
    #[serde(default = "default_end_x")]
    pub end_x: f32,
    /// Sweep increment per frame.
    #[serde(default = "default_step_x")]
    pub step_x: f32,
    /// Wander travel speed, world units per second.
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Radius of the disc wander targets are drawn from.
    #[serde(default = "default_wander_radius")]
    pub wander_radius: f32,
    /// Pause between wander journeys, in seconds.
    #[serde(default = "default_pause_secs")]
    pub pause_secs: f32,
    /// Fixed delta time the driver ticks at.
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt: f32,
    /// Frame budget for demos that never finish on their own.
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,
    /// Seed for wander target selection.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_begin_x() -> f32 {
    -5.0
}

fn default_end_x() -> f32 {
    5.0
}

fn default_step_x() -> f32 {
    0.05
}

fn default_speed() -> f32 {
    6.0
}

fn default_wander_radius() -> f32 {
    3.0
}

fn default_pause_secs() -> f32 {
    2.0
}

fn default_fixed_dt() -> f32 {
    1.0 / 60.0
}

fn default_max_frames() -> u64 {
    1200
}

fn default_seed() -> u64 {
    42
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            begin_x: default_begin_x(),
            end_x: default_end_x(),
            step_x: default_step_x(),
            speed: default_speed(),
            wander_radius: default_wander_radius(),
            pause_secs: default_pause_secs(),
            fixed_dt: default_fixed_dt(),
            max_frames: default_max_frames(),
            seed: default_seed(),
        }
    }
}

impl DemoConfig {
    /// Parse a config from a JSON string. Missing fields keep defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "begin_x": -2.0,
            "end_x": 2.0,
            "step_x": 0.1,
            "speed": 3.0,
            "wander_radius": 1.5,
            "pause_secs": 0.5,
            "fixed_dt": 0.02,
            "max_frames": 600,
            "seed": 7
        }"#;
        let config = DemoConfig::from_json(json).unwrap();
        assert_eq!(config.begin_x, -2.0);
        assert_eq!(config.max_frames, 600);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let config = DemoConfig::from_json(r#"{ "speed": 12.0 }"#).unwrap();
        assert_eq!(config.speed, 12.0);
        assert_eq!(config.begin_x, -5.0);
        assert_eq!(config.end_x, 5.0);
        assert_eq!(config.step_x, 0.05);
        assert_eq!(config.max_frames, 1200);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(DemoConfig::from_json("not json").is_err());
    }
}
