// ==========================================
// 陈列活动奖励评估 - 登记检查
// ==========================================
// 规则:
// - 无匹配登记 → NotRegistered (评估立即终止)
// - 有匹配登记 → 返回其有效标志,无论有效与否都继续评分
//   (停用登记照常评分,但不具备领奖资格)
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::{Period, RegistrationRecord};

/// 登记检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    NotRegistered,
    Registered { active: bool },
}

impl RegistrationStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, RegistrationStatus::Registered { active: true })
    }
}

pub struct RegistrationCheck;

impl RegistrationCheck {
    /// 在客户的全部登记中查找指定活动
    ///
    /// # 参数
    /// - records: 客户在该期间的全部登记 (含已停用)
    ///
    /// # 规则
    /// - 只考虑期间与客户均匹配的记录
    /// - 同一活动有多条陈列类型登记时,以数据源顺序的第一条为准
    pub fn check(
        records: &[RegistrationRecord],
        period: Period,
        customer_code: &str,
        program_code: &str,
    ) -> RegistrationStatus {
        records
            .iter()
            .filter(|r| r.belongs_to(period, customer_code))
            .find(|r| r.program_code == program_code)
            .map(|r| RegistrationStatus::Registered { active: r.active })
            .unwrap_or(RegistrationStatus::NotRegistered)
    }
}
