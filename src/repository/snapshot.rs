// ==========================================
// 陈列活动奖励评估 - 内存快照数据源
// ==========================================
// 用途: 调用方已持有数据 (批量评估前一次性加载) 或单元测试
// 行为: 按期间/客户/活动过滤,保持插入顺序
// ==========================================

use crate::domain::{AuditMeasurement, ConditionItem, CriteriaGroup, Period, RegistrationRecord};
use crate::repository::error::RepositoryResult;
use crate::repository::feeds::{AuditFeed, CriteriaFeed, RegistrationFeed};

/// 只读内存快照,同时实现三个数据源 Trait
#[derive(Debug, Clone, Default)]
pub struct EvaluationSnapshot {
    registrations: Vec<RegistrationRecord>,
    condition_items: Vec<ConditionItem>,
    condition_groups: Vec<CriteriaGroup>,
    audits: Vec<AuditMeasurement>,
}

impl EvaluationSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registrations(mut self, records: impl IntoIterator<Item = RegistrationRecord>) -> Self {
        self.registrations.extend(records);
        self
    }

    pub fn with_condition_items(mut self, items: impl IntoIterator<Item = ConditionItem>) -> Self {
        self.condition_items.extend(items);
        self
    }

    pub fn with_condition_groups(mut self, groups: impl IntoIterator<Item = CriteriaGroup>) -> Self {
        self.condition_groups.extend(groups);
        self
    }

    pub fn with_audits(mut self, audits: impl IntoIterator<Item = AuditMeasurement>) -> Self {
        self.audits.extend(audits);
        self
    }
}

impl RegistrationFeed for EvaluationSnapshot {
    fn get_registrations(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<RegistrationRecord>> {
        Ok(self
            .registrations
            .iter()
            .filter(|r| r.belongs_to(period, customer_code))
            .cloned()
            .collect())
    }
}

impl CriteriaFeed for EvaluationSnapshot {
    fn get_condition_items(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<ConditionItem>> {
        Ok(self
            .condition_items
            .iter()
            .filter(|item| item.belongs_to(period, program_code))
            .cloned()
            .collect())
    }

    fn get_condition_groups(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<CriteriaGroup>> {
        Ok(self
            .condition_groups
            .iter()
            .filter(|group| group.belongs_to(period, program_code))
            .cloned()
            .collect())
    }
}

impl AuditFeed for EvaluationSnapshot {
    fn get_audit_measurements(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<AuditMeasurement>> {
        Ok(self
            .audits
            .iter()
            .filter(|a| a.belongs_to(period, customer_code))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_filters_by_period_and_customer() {
        let jan = Period::new(202501).unwrap();
        let feb = Period::new(202502).unwrap();
        let record = |period: Period, customer: &str| RegistrationRecord {
            period,
            program_code: "PRG01".to_string(),
            customer_code: customer.to_string(),
            display_type: "KE_3_O".to_string(),
            register_qty: 1,
            active: true,
        };

        let snapshot = EvaluationSnapshot::new().with_registrations(vec![
            record(jan, "CUST001"),
            record(feb, "CUST001"),
            record(jan, "CUST002"),
        ]);

        let found = snapshot.get_registrations(jan, "CUST001").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].period, jan);
        assert!(snapshot.get_registrations(jan, "CUST999").unwrap().is_empty());
    }
}
