use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::models::score::MatchWeights;

const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every value has a default; `validate` must pass before the server starts.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_name: String,
    pub fallback_model_name: String,
    pub llm_base_url: String,
    pub model_cache_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub max_file_size: u64,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_file: PathBuf,
    pub weights: MatchWeights,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_name: "llama2:7b-chat".to_string(),
            fallback_model_name: "tinyllama".to_string(),
            llm_base_url: "http://localhost:11434".to_string(),
            model_cache_dir: PathBuf::from("models"),
            temp_dir: PathBuf::from("temp"),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            host: "0.0.0.0".to_string(),
            port: 8501,
            log_level: "info".to_string(),
            log_file: PathBuf::from("app.log"),
            weights: MatchWeights::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            model_name: env_or("MODEL_NAME", defaults.model_name),
            fallback_model_name: env_or("FALLBACK_MODEL_NAME", defaults.fallback_model_name),
            llm_base_url: env_or("LLM_BASE_URL", defaults.llm_base_url),
            model_cache_dir: env_or("MODEL_CACHE_DIR", defaults.model_cache_dir),
            temp_dir: env_or("TEMP_DIR", defaults.temp_dir),
            max_file_size: parse_env("MAX_FILE_SIZE", defaults.max_file_size)?,
            host: env_or("API_HOST", defaults.host),
            port: parse_env("API_PORT", defaults.port)?,
            log_level: env_or("LOG_LEVEL", defaults.log_level).to_lowercase(),
            log_file: env_or("LOG_FILE", defaults.log_file),
            weights: MatchWeights {
                skills: parse_env("MATCH_WEIGHT_SKILLS", defaults.weights.skills)?,
                experience: parse_env("MATCH_WEIGHT_EXPERIENCE", defaults.weights.experience)?,
                education: parse_env("MATCH_WEIGHT_EDUCATION", defaults.weights.education)?,
            },
        })
    }

    /// Creates the working directories and rejects inconsistent values.
    pub fn validate(&self) -> Result<()> {
        std::fs::create_dir_all(&self.model_cache_dir).with_context(|| {
            format!(
                "Failed to create model cache dir '{}'",
                self.model_cache_dir.display()
            )
        })?;
        std::fs::create_dir_all(&self.temp_dir)
            .with_context(|| format!("Failed to create temp dir '{}'", self.temp_dir.display()))?;

        if self.max_file_size == 0 {
            bail!("MAX_FILE_SIZE must be positive");
        }

        self.weights.validate()?;
        Ok(())
    }
}

fn env_or<T: From<String>>(key: &str, default: T) -> T {
    std::env::var(key).map(T::from).unwrap_or(default)
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_config(dir: &std::path::Path) -> Config {
        Config {
            model_cache_dir: dir.join("models"),
            temp_dir: dir.join("temp"),
            log_file: dir.join("app.log"),
            ..Config::default()
        }
    }

    #[test]
    fn test_default_config_validates_and_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let config = scratch_config(dir.path());

        config.validate().unwrap();

        assert!(config.model_cache_dir.is_dir());
        assert!(config.temp_dir.is_dir());
    }

    #[test]
    fn test_default_weights_are_fixed_split() {
        let config = Config::default();
        assert_eq!(config.weights.skills, 0.5);
        assert_eq!(config.weights.experience, 0.3);
        assert_eq!(config.weights.education, 0.2);
        assert_eq!(config.port, 8501);
    }

    #[test]
    fn test_zero_max_file_size_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            max_file_size: 0,
            ..scratch_config(dir.path())
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("MAX_FILE_SIZE"));
    }

    #[test]
    fn test_weights_not_summing_to_one_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            weights: MatchWeights {
                skills: 0.6,
                experience: 0.3,
                education: 0.2,
            },
            ..scratch_config(dir.path())
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_parse_env_missing_uses_default() {
        let port: u16 = parse_env("RECRUITER_TEST_UNSET_PORT_VAR", 1234).unwrap();
        assert_eq!(port, 1234);
    }
}
