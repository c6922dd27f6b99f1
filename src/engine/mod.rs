// ==========================================
// 陈列活动奖励评估 - 引擎层
// ==========================================
// 职责: 实现评估规则,不拼 SQL
// 红线: Engine 不拼 SQL, 所有未达标条件必须输出 reason
// ==========================================

pub mod audit_lookup;
pub mod criteria_model;
pub mod error;
pub mod group_scorer;
pub mod orchestrator;
pub mod registration_check;

// 重导出核心引擎
pub use audit_lookup::{AuditLookup, AuditReading};
pub use criteria_model::{CriteriaModel, GroupCriteria};
pub use error::{EvaluationError, FeedKind};
pub use group_scorer::{GroupScore, GroupScorer};
pub use orchestrator::EvaluationEngine;
pub use registration_check::{RegistrationCheck, RegistrationStatus};
