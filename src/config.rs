use crate::error::{MedicalCardError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "MEDICAL_CARD_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    /// 未設定ならタイムアウトなし
    pub request_timeout_seconds: Option<u64>,
    /// PDF/JSONの出力先（未設定ならカレントディレクトリ）
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            request_timeout_seconds: None,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| MedicalCardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("medical-card").join("config.json"))
    }

    /// 実際に使うベースURL
    ///
    /// 優先順位: CLI引数 > 環境変数 > 設定ファイル
    pub fn resolve_api_base_url(&self, cli_override: Option<&str>) -> Result<String> {
        let env_value = std::env::var(API_URL_ENV).ok();
        let url = cli_override
            .or(env_value.as_deref())
            .unwrap_or(&self.api_base_url)
            .trim();

        validate_base_url(url)?;
        Ok(url.trim_end_matches('/').to_string())
    }

    pub fn set_api_base_url(&mut self, url: String) -> Result<()> {
        validate_base_url(&url)?;
        self.api_base_url = url;
        self.save()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

fn validate_base_url(url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(MedicalCardError::Config(format!(
            "APIのURLは http:// または https:// で始めてください: {}",
            url
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert!(config.request_timeout().is_none());
        assert_eq!(config.output_dir(), PathBuf::from("."));
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config::default();
        let url = config
            .resolve_api_base_url(Some("https://scan.example.org/"))
            .unwrap();
        assert_eq!(url, "https://scan.example.org");
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = Config::default();
        let err = config.resolve_api_base_url(Some("localhost:8000")).unwrap_err();
        assert!(matches!(err, MedicalCardError::Config(_)));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"request_timeout_seconds": 30}"#).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_base_url: "http://10.0.0.5:8000".into(),
            request_timeout_seconds: Some(5),
            output_dir: None,
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_base_url, "http://10.0.0.5:8000");
        assert_eq!(loaded.request_timeout_seconds, Some(5));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = Config::load_from(Path::new("/nonexistent/medical-card/config.json")).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
