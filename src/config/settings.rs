// ==========================================
// 陈列活动奖励评估 - 运行配置
// ==========================================
// 来源: 环境变量 (启动时可从 .env 加载)
// 红线: 配置只在构造数据访问层时显式传入,引擎本身不读全局状态
// ==========================================

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

// ==========================================
// 配置键
// ==========================================
pub mod env_keys {
    pub const DB_PATH: &str = "DISPLAY_REWARD_DB_PATH";
    pub const BUSY_TIMEOUT_MS: &str = "DISPLAY_REWARD_BUSY_TIMEOUT_MS";
    pub const LOG_FILTER: &str = "DISPLAY_REWARD_LOG";
}

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 默认日志过滤器
pub const DEFAULT_LOG_FILTER: &str = "info";

const DB_FILE_NAME: &str = "display_reward.db";
const DATA_DIR_NAME: &str = "display-reward-eval";

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("配置值无效: {key}={value}")]
    InvalidValue { key: String, value: String },
}

// ==========================================
// EvaluationSettings - 顶层配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationSettings {
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

/// 数据库访问配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub db_path: String,
    pub busy_timeout_ms: u64,
}

/// 日志配置 (RUST_LOG 优先)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    pub default_filter: String,
}

impl DatabaseSettings {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            default_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl EvaluationSettings {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    /// - DISPLAY_REWARD_DB_PATH: 数据库路径 (默认: 用户数据目录)
    /// - DISPLAY_REWARD_BUSY_TIMEOUT_MS: busy_timeout 毫秒数 (默认: 5000)
    /// - DISPLAY_REWARD_LOG: RUST_LOG 未设置时的日志过滤器 (默认: info)
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = non_empty_var(env_keys::DB_PATH).unwrap_or_else(default_db_path);

        let busy_timeout_ms = match non_empty_var(env_keys::BUSY_TIMEOUT_MS) {
            Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: env_keys::BUSY_TIMEOUT_MS.to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_BUSY_TIMEOUT_MS,
        };

        let default_filter =
            non_empty_var(env_keys::LOG_FILTER).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            database: DatabaseSettings {
                db_path,
                busy_timeout_ms,
            },
            logging: LoggingSettings { default_filter },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 默认数据库路径: <data_dir>/display-reward-eval/display_reward.db
///
/// 无法获取用户数据目录时回退到当前目录
pub fn default_db_path() -> String {
    let path = match dirs::data_dir() {
        Some(data_dir) => data_dir.join(DATA_DIR_NAME).join(DB_FILE_NAME),
        None => PathBuf::from(".").join(DB_FILE_NAME),
    };
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, OnceLock};

    // 环境变量为进程级全局状态,测试间串行化
    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var(env_keys::DB_PATH);
        env::remove_var(env_keys::BUSY_TIMEOUT_MS);
        env::remove_var(env_keys::LOG_FILTER);
    }

    #[test]
    fn test_load_uses_defaults() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();

        let settings = EvaluationSettings::load().expect("defaults load");
        assert!(settings.database.db_path.ends_with(DB_FILE_NAME));
        assert_eq!(settings.database.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
        assert_eq!(settings.logging.default_filter, "info");
    }

    #[test]
    fn test_load_reads_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(env_keys::DB_PATH, " /tmp/reward.db ");
        env::set_var(env_keys::BUSY_TIMEOUT_MS, "250");
        env::set_var(env_keys::LOG_FILTER, "display_reward_eval=debug");

        let settings = EvaluationSettings::load().expect("overrides load");
        assert_eq!(settings.database.db_path, "/tmp/reward.db");
        assert_eq!(settings.database.busy_timeout(), Duration::from_millis(250));
        assert_eq!(settings.logging.default_filter, "display_reward_eval=debug");
        reset_env();
    }

    #[test]
    fn test_load_rejects_bad_timeout() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var(env_keys::BUSY_TIMEOUT_MS, "soon");

        let err = EvaluationSettings::load().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: env_keys::BUSY_TIMEOUT_MS.to_string(),
                value: "soon".to_string(),
            }
        );
        reset_env();
    }
}
