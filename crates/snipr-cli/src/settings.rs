use std::path::Path;

use serde::{Deserialize, Serialize};
use snipr_generate::GenerateOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("toml serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type SettingsResult<T> = std::result::Result<T, SettingsError>;

/// Contents of a `--config` file.
///
/// ```toml
/// [generation]
/// strategy = "randomized"
/// max_candidates = 500
/// separators = ["_", "."]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SniprConfig {
    pub generation: GenerateOptions,
}

pub fn load_config(path: &Path) -> SettingsResult<SniprConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: SniprConfig = toml::from_str(&content)?;
    Ok(config)
}

pub fn render_config(config: &SniprConfig) -> SettingsResult<String> {
    Ok(toml::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipr_generate::Strategy;

    #[test]
    fn missing_fields_keep_defaults() {
        let config: SniprConfig = toml::from_str(
            "[generation]\nstrategy = \"exhaustive\"\nmax_length = 12\n",
        )
        .expect("parse");
        assert_eq!(config.generation.strategy, Strategy::Exhaustive);
        assert_eq!(config.generation.max_length, Some(12));
        assert!(config.generation.use_leet);
        assert_eq!(config.generation.separators, vec!["_".to_string()]);
        assert_eq!(config.generation.specials, "!");
    }

    #[test]
    fn empty_file_is_default_config() {
        let config: SniprConfig = toml::from_str("").expect("parse");
        assert_eq!(config.generation.strategy, Strategy::Simple);
        assert_eq!(config.generation.max_words_per_combo, 3);
    }

    #[test]
    fn rendered_config_parses_back() {
        let mut config = SniprConfig::default();
        config.generation.strategy = Strategy::Randomized;
        config.generation.max_candidates = Some(500);
        config.generation.seed = Some(7);

        let rendered = render_config(&config).expect("render");
        assert!(rendered.contains("[generation]"));

        let parsed: SniprConfig = toml::from_str(&rendered).expect("parse");
        assert_eq!(parsed.generation.strategy, Strategy::Randomized);
        assert_eq!(parsed.generation.max_candidates, Some(500));
        assert_eq!(parsed.generation.seed, Some(7));
    }

    #[test]
    fn largest_seed_renders_and_parses_back() {
        let mut config = SniprConfig::default();
        config.generation.seed = Some(snipr_generate::MAX_SEED);

        let rendered = render_config(&config).expect("render");
        let parsed: SniprConfig = toml::from_str(&rendered).expect("parse");
        assert_eq!(parsed.generation.seed, Some(snipr_generate::MAX_SEED));
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let result = toml::from_str::<SniprConfig>("[generation]\nstrategy = \"brute\"\n");
        assert!(result.is_err());
    }
}
