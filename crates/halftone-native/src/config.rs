use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;
use halftone_core::{CoreError, FieldParams, Pattern};
use serde::Deserialize;

/// `--config` file: field tuning plus an optional replacement pattern set.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub field: FieldParams,
    pub patterns: Option<Vec<Pattern>>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let config: Config = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse config JSON '{}'", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config '{}'", path.display()))?;
        log::info!(
            "[config] loaded '{}' ({} patterns)",
            path.display(),
            config.patterns.as_ref().map_or(0, Vec::len)
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        self.field.validate()?;
        if let Some(patterns) = &self.patterns {
            if patterns.is_empty() {
                return Err(CoreError::NoPatterns);
            }
            for p in patterns {
                p.validate()?;
            }
        }
        Ok(())
    }

    /// The configured patterns, or `builtin` when the file names none.
    pub fn patterns_or(&self, builtin: fn() -> Vec<Pattern>) -> Vec<Pattern> {
        self.patterns.clone().unwrap_or_else(builtin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halftone_core::{default_patterns, tuned_patterns, Ease};

    #[test]
    fn empty_object_means_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        config.validate().unwrap();
        assert_eq!(config.field, FieldParams::default());
        assert_eq!(config.patterns_or(default_patterns), default_patterns());
        assert_eq!(config.patterns_or(tuned_patterns), tuned_patterns());
    }

    #[test]
    fn partial_field_and_custom_patterns() {
        let json = r#"{
            "field": { "spawn_probability": 0.5 },
            "patterns": [
                { "name": "blink", "opacity": [1.0, 0.0, 1.0], "duration_sec": 0.5,
                  "delay_sec": 0.001, "ease": "power2.inOut" }
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        config.validate().unwrap();
        assert_eq!(config.field.spawn_probability, 0.5);
        let patterns = config.patterns_or(tuned_patterns);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].ease, Ease::Power2InOut);
    }

    #[test]
    fn transform_channels_are_kept_and_typos_rejected() {
        let json = r#"{ "patterns": [
            { "name": "turn", "opacity": [1.0, 0.5], "rotate": [0, 360],
              "duration_sec": 2.0, "delay_sec": 0.002 }
        ] }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        config.validate().unwrap();
        let patterns = config.patterns_or(default_patterns);
        assert!((patterns[0].style_at(0, 1.0).rotation_deg - 180.0).abs() < 1e-3);

        let typo = json.replace("rotate", "rotation");
        assert!(serde_json::from_str::<Config>(&typo).is_err());
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        assert!(serde_json::from_str::<Config>(r#"{ "fields": {} }"#).is_err());

        let config: Config = serde_json::from_str(r#"{ "patterns": [] }"#).unwrap();
        assert_eq!(config.validate(), Err(CoreError::NoPatterns));

        let config: Config =
            serde_json::from_str(r#"{ "field": { "spawn_probability": 1.5 } }"#).unwrap();
        assert!(matches!(config.validate(), Err(CoreError::InvalidParams(_))));
    }
}
