// ==========================================
// 陈列活动奖励评估 - 核心库
// ==========================================
// 系统定位: 按月评估已登记客户能否领取陈列活动奖励
// 输入: 活动登记 / 考核条件 / 条件组 / 巡店测量 (只读)
// 输出: 每个 (期间, 客户, 活动) 一条评估结果, 不写库
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据源接口与实现
pub mod repository;

// 引擎层 - 评估规则
pub mod engine;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    AuditMeasurement, ConditionItem, CriteriaGroup, EvaluationOutcome, EvaluationResult,
    FailureReason, GroupOutcome, Period, RegistrationRecord,
};

pub use engine::{EvaluationEngine, EvaluationError, FeedKind};

pub use repository::{
    AuditFeed, CriteriaFeed, EvaluationSnapshot, RegistrationFeed, RepositoryError,
    SqliteRepositories,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "陈列活动奖励评估";
