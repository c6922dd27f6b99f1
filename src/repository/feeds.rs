// ==========================================
// 陈列活动奖励评估 - 评估数据源 Trait
// ==========================================
// 职责: 定义评估引擎消费的四个只读数据源接口 (不包含实现)
// 红线: 只读; 不包含业务规则
// 实现者: SQLite 仓储 / EvaluationSnapshot (内存快照)
// ==========================================

use crate::domain::{AuditMeasurement, ConditionItem, CriteriaGroup, Period, RegistrationRecord};
use crate::repository::error::RepositoryResult;
use std::sync::Arc;

// ==========================================
// RegistrationFeed - 活动登记数据源
// ==========================================
pub trait RegistrationFeed: Send + Sync {
    /// 查询客户在该期间的全部登记 (含已停用)
    fn get_registrations(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<RegistrationRecord>>;
}

// ==========================================
// CriteriaFeed - 考核条件数据源
// ==========================================
pub trait CriteriaFeed: Send + Sync {
    /// 查询活动在该期间的全部考核条件 (跨所有组)
    fn get_condition_items(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<ConditionItem>>;

    /// 查询活动在该期间的条件组定义 (含组达标分数线)
    fn get_condition_groups(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<CriteriaGroup>>;
}

// ==========================================
// AuditFeed - 巡店测量数据源
// ==========================================
pub trait AuditFeed: Send + Sync {
    /// 查询客户在该期间的全部测量记录
    fn get_audit_measurements(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<AuditMeasurement>>;
}

// ==========================================
// Arc 转发实现 (共享同一仓储实例)
// ==========================================

impl<T: RegistrationFeed + ?Sized> RegistrationFeed for Arc<T> {
    fn get_registrations(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<RegistrationRecord>> {
        (**self).get_registrations(period, customer_code)
    }
}

impl<T: CriteriaFeed + ?Sized> CriteriaFeed for Arc<T> {
    fn get_condition_items(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<ConditionItem>> {
        (**self).get_condition_items(period, program_code)
    }

    fn get_condition_groups(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<CriteriaGroup>> {
        (**self).get_condition_groups(period, program_code)
    }
}

impl<T: AuditFeed + ?Sized> AuditFeed for Arc<T> {
    fn get_audit_measurements(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<AuditMeasurement>> {
        (**self).get_audit_measurements(period, customer_code)
    }
}
