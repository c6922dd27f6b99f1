// ==========================================
// 陈列活动奖励评估 - 配置层
// ==========================================
// 职责: 运行配置加载 (数据库路径 / busy_timeout / 日志过滤器)
// ==========================================

pub mod settings;

// 重导出
pub use settings::{
    default_db_path, env_keys, ConfigError, DatabaseSettings, EvaluationSettings,
    LoggingSettings,
};
