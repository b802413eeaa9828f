//! CLI 設定ファイル
//!
//! ```toml
//! max_plies = 200
//!
//! [ai]
//! difficulty = "intermediate"
//! timeout_ms = 10000
//! min_thinking_ms = 0
//! seed = 7
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shogiban_core::{AiSettings, Difficulty};

/// 千日手判定がないので対局は手数で打ち切る
pub const DEFAULT_MAX_PLIES: u32 = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub ai: AiSettings,
    pub max_plies: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            ai: AiSettings {
                // CLI では待ち時間を入れない
                min_thinking_ms: Some(0),
                ..AiSettings::default()
            },
            max_plies: DEFAULT_MAX_PLIES,
        }
    }
}

impl CliConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// 設定ファイルの AI 設定にコマンドライン引数を上書きしたもの
    pub fn ai_settings(&self, difficulty: Option<Difficulty>, seed: Option<u64>) -> AiSettings {
        AiSettings {
            difficulty: difficulty.unwrap_or(self.ai.difficulty),
            seed: seed.or(self.ai.seed),
            ..self.ai.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shogiban_core::Color;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.ai.min_thinking_ms, Some(0));
    }

    #[test]
    fn test_partial_ai_section() {
        let config = CliConfig::parse(
            r#"
            max_plies = 120

            [ai]
            difficulty = "advanced"
            player_side = "second"
            seed = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.max_plies, 120);
        assert_eq!(config.ai.difficulty, Difficulty::Advanced);
        assert_eq!(config.ai.player_side, Color::White);
        assert_eq!(config.ai.seed, Some(3));
        // 指定のない項目は AiSettings の既定値
        assert_eq!(config.ai.timeout_ms, 30_000);
        assert_eq!(config.ai.min_thinking_ms, None);
    }

    #[test]
    fn test_flags_override_file() {
        let config = CliConfig::parse("[ai]\ndifficulty = \"intermediate\"\nseed = 1\n").unwrap();
        let settings = config.ai_settings(Some(Difficulty::Beginner), None);
        assert_eq!(settings.difficulty, Difficulty::Beginner);
        assert_eq!(settings.seed, Some(1));
        assert_eq!(config.ai_settings(None, Some(9)).seed, Some(9));
    }

    #[test]
    fn test_unknown_difficulty_is_rejected() {
        assert!(CliConfig::parse("[ai]\ndifficulty = \"grandmaster\"\n").is_err());
    }
}
