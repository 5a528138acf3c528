use crate::emotion::EmotionState;
use crate::generator::GeneratorConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FureaiConfig {
    pub session: SessionConfig,
    pub haptics: HapticsConfig,
    pub generator: GeneratorConfig,
}

impl FureaiConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: FureaiConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({:#}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("FUREAI_GENDER") {
            self.session.gender = v;
        }
        if let Ok(v) = std::env::var("FUREAI_TICK_MS") {
            if let Ok(n) = v.parse() {
                self.haptics.tick_interval_ms = n;
            }
        }
        if let Ok(v) = std::env::var("FUREAI_HAPTICS") {
            match v.to_lowercase().as_str() {
                "0" | "false" | "off" => self.haptics.enabled = false,
                "1" | "true" | "on" => self.haptics.enabled = true,
                other => tracing::warn!("Ignoring FUREAI_HAPTICS={}", other),
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Voice gender reported to speech front-ends.
    pub gender: String,
    /// Emotion state every session starts from (and `reset` returns to).
    pub initial_emotion: EmotionState,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            gender: "女性".to_string(),
            initial_emotion: EmotionState::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HapticsConfig {
    pub enabled: bool,
    /// Player tick period. Anything from 10 to 50 ms keeps step edges tight.
    pub tick_interval_ms: u64,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tick_interval_ms: 20,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = FureaiConfig::default();
        assert_eq!(cfg.session.gender, "女性");
        assert_eq!(cfg.session.initial_emotion, EmotionState::default());
        assert!(cfg.haptics.enabled);
        assert_eq!(cfg.haptics.tick_interval_ms, 20);
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[session]
gender = "男性"
"#;
        let cfg: FureaiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.session.gender, "男性");
        // Defaults for unspecified fields
        assert_eq!(cfg.haptics.tick_interval_ms, 20);
        assert_eq!(cfg.generator, GeneratorConfig::default());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[session]
gender = "女性"
initial_emotion = { joy = 1.0, fun = 1.0, anger = 0.0, sad = 7.0 }

[haptics]
enabled = false
tick_interval_ms = 10

[generator.burst]
min_intensity = 0.6
max_intensity = 0.9
repeat_count = 2

[generator.fade]
min_duration_ms = 500
max_duration_ms = 1500
"#;
        let cfg: FureaiConfig = toml::from_str(toml_str).unwrap();
        // out-of-range levels are clamped on load
        assert_eq!(cfg.session.initial_emotion.sad, 5.0);
        assert!(!cfg.haptics.enabled);
        assert_eq!(cfg.haptics.tick_interval_ms, 10);
        assert!((cfg.generator.burst.min_intensity - 0.6).abs() < 1e-6);
        assert_eq!(cfg.generator.burst.repeat_count, 2);
        // partially specified bounds fall back field by field
        assert_eq!(cfg.generator.burst.min_duration_ms, 300);
        assert_eq!(cfg.generator.fade.max_duration_ms, 1500);
        assert_eq!(cfg.generator.pulse, GeneratorConfig::default().pulse);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            "[haptics]\nenabled = true\ntick_interval_ms = 40\n".as_bytes(),
        )
        .unwrap();

        let cfg: FureaiConfig =
            toml::from_str(&std::fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(cfg.haptics.tick_interval_ms, 40);

        std::io::Write::write_all(&mut file, b"not = [valid").unwrap();
        assert!(FureaiConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        // Part 1: env overrides
        std::env::set_var("FUREAI_GENDER", "男性");
        std::env::set_var("FUREAI_TICK_MS", "15");
        std::env::set_var("FUREAI_HAPTICS", "off");

        let mut cfg = FureaiConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.session.gender, "男性");
        assert_eq!(cfg.haptics.tick_interval_ms, 15);
        assert!(!cfg.haptics.enabled);

        // Clean up env vars before testing defaults
        std::env::remove_var("FUREAI_GENDER");
        std::env::remove_var("FUREAI_TICK_MS");
        std::env::remove_var("FUREAI_HAPTICS");

        // Part 2: nonexistent path returns defaults (no env interference)
        let cfg = FureaiConfig::load_or_default("/nonexistent/path.toml");
        assert_eq!(cfg.session.gender, "女性");
        assert!(cfg.haptics.enabled);
    }
}
