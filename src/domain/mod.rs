// ==========================================
// 陈列活动奖励评估 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod audit;
pub mod criteria;
pub mod evaluation;
pub mod registration;
pub mod types;

// 重导出核心类型
pub use audit::{AuditMeasurement, MeasuredValue};
pub use criteria::{ConditionItem, CriteriaGroup};
pub use evaluation::{ConditionFailureKind, EvaluationResult, FailureReason, GroupOutcome};
pub use registration::RegistrationRecord;
pub use types::{EvaluationOutcome, EvaluationStage, Period, PeriodError};
