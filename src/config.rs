//! Application configuration module / 应用配置模块
//!
//! Manages application configuration loaded from config.json
//! Creates default config file on first run / 首次运行时创建默认配置文件
//!
//! The active-corpus pointer lives in a second, data-dir-scoped config.json
//! so that swapping the corpus never touches the server configuration.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration / 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    pub server: ServerConfig,
    /// Storage configuration / 存储配置
    pub storage: StorageConfig,
    /// Admin account configuration / 管理员账户配置
    pub admin: AdminConfig,
    /// Search configuration / 搜索配置
    pub search: SearchConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Storage configuration / 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding corpus files / 语料文件目录
    pub data_dir: String,
    /// Maximum accepted upload size in megabytes / 上传大小上限（MB）
    pub max_upload_mb: u64,
}

/// Admin account configuration / 管理员账户配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Admin username / 管理员用户名
    pub username: String,
    /// bcrypt hash of the admin password / 管理员密码的bcrypt哈希
    pub password_hash: String,
    /// Secret for signing session tokens, generated on first run / 会话令牌签名密钥
    pub token_secret: String,
    /// Session lifetime in hours / 会话有效期（小时）
    pub session_hours: i64,
}

/// Search configuration / 搜索配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default result limit when the caller gives none / 默认返回结果数
    pub default_limit: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            admin: AdminConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8190,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            max_upload_mb: 10,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            // Default password "admin123", change after first login / 默认密码
            password_hash: "$2a$10$rOK9QzLQKN.W5rQRG/KhO.XqZYC6BQ9h.wZqBzxE.2J7g2K1m1O7C"
                .to_string(),
            token_secret: generate_token_secret(),
            session_hours: 24,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_limit: 50 }
    }
}

impl AppConfig {
    /// Get the full data directory path / 获取完整的数据目录路径
    pub fn get_data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }

    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Maximum upload size in bytes / 上传大小上限（字节）
    pub fn max_upload_bytes(&self) -> usize {
        (self.storage.max_upload_mb as usize) * 1024 * 1024
    }
}

/// Generate a random token-signing secret / 生成随机令牌签名密钥
fn generate_token_secret() -> String {
    rand::thread_rng()
        .sample_iter(&rand::distributions::Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("config.json")
}

/// Load configuration from file, or create default if not exists / 加载配置文件，不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, String> {
    let config_path = get_config_path();

    if config_path.exists() {
        // Load existing config / 加载现有配置
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        // Create default config / 创建默认配置
        let config = AppConfig::default();
        save_config(&config)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to file / 保存配置到文件
pub fn save_config(config: &AppConfig) -> Result<(), String> {
    let config_path = get_config_path();

    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(&config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

/// Active-corpus pointer, stored inside the data directory / 当前语料指针
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusConfig {
    /// Filename of the corpus end users browse and search / 当前生效的语料文件
    pub active_file: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            active_file: "praisesongs_data.json".to_string(),
        }
    }
}

/// Path of the corpus pointer file / 语料指针文件路径
fn corpus_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.json")
}

/// Load the corpus pointer, writing the default on first read / 加载语料指针
pub fn load_corpus_config(data_dir: &Path) -> Result<CorpusConfig, String> {
    let path = corpus_config_path(data_dir);

    if path.exists() {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read corpus config: {}", e))?;
        serde_json::from_str(&content).map_err(|e| format!("Failed to parse corpus config: {}", e))
    } else {
        let config = CorpusConfig::default();
        save_corpus_config(data_dir, &config)?;
        tracing::info!("Created default corpus config at {:?}", path);
        Ok(config)
    }
}

/// Persist the corpus pointer / 保存语料指针
pub fn save_corpus_config(data_dir: &Path, config: &CorpusConfig) -> Result<(), String> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize corpus config: {}", e))?;

    std::fs::write(corpus_config_path(data_dir), content)
        .map_err(|e| format!("Failed to write corpus config: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_config_round_trip() {
        let dir = tempfile::tempdir().unwrap();

        // 首次读取写入默认值
        let config = load_corpus_config(dir.path()).unwrap();
        assert_eq!(config.active_file, "praisesongs_data.json");
        assert!(dir.path().join("config.json").exists());

        let updated = CorpusConfig {
            active_file: "songs_2024.json".to_string(),
        };
        save_corpus_config(dir.path(), &updated).unwrap();

        let reloaded = load_corpus_config(dir.path()).unwrap();
        assert_eq!(reloaded.active_file, "songs_2024.json");
    }

    #[test]
    fn test_default_admin_secret_is_generated() {
        let a = AdminConfig::default();
        let b = AdminConfig::default();
        assert_eq!(a.token_secret.len(), 64);
        // 每次生成的密钥应当不同
        assert_ne!(a.token_secret, b.token_secret);
    }
}
