// ==========================================
// 陈列活动奖励评估 - 考核条件领域模型
// ==========================================
// 数据来源: condition_group / condition_item 表
// 关系: ConditionItem 多对一 CriteriaGroup (按 group_no 关联)
// ==========================================

use crate::domain::types::Period;
use serde::{Deserialize, Serialize};

// ==========================================
// CriteriaGroup - 条件组
// ==========================================
// 每组有独立的达标分数线 group_point
// 组内部分条件未达标,只要得分 >= group_point 仍视为该组通过
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaGroup {
    pub period: Period,
    pub program_code: String,
    pub group_no: i32,            // 组号 (活动+期间内唯一)
    pub type_code: String,        // 活动类型 (如 TYPE_BEVERAGE), 仅展示用
    pub group_point: i64,         // 组达标分数线
}

// ==========================================
// ConditionItem - 考核条件
// ==========================================
// condition_code 在 (period, program_code, group_no) 内唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionItem {
    pub period: Period,
    pub program_code: String,
    pub group_no: i32,
    pub condition_code: String,   // 条件代码 (如 CLEANLINESS)
    pub min_value: i64,           // 达标最小值 (测量值 >= min_value 即达标)
    pub point: i64,               // 达标得分
}

impl ConditionItem {
    /// 测量值是否达到最小值要求
    pub fn meets_minimum(&self, actual_value: i64) -> bool {
        actual_value >= self.min_value
    }

    /// 是否属于指定的期间与活动
    pub fn belongs_to(&self, period: Period, program_code: &str) -> bool {
        self.period == period && self.program_code == program_code
    }
}

impl CriteriaGroup {
    /// 是否属于指定的期间与活动
    pub fn belongs_to(&self, period: Period, program_code: &str) -> bool {
        self.period == period && self.program_code == program_code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meets_minimum_is_inclusive() {
        let item = ConditionItem {
            period: Period::new(202501).unwrap(),
            program_code: "PRG01".to_string(),
            group_no: 1,
            condition_code: "CLEANLINESS".to_string(),
            min_value: 80,
            point: 30,
        };

        assert!(item.meets_minimum(80));
        assert!(item.meets_minimum(81));
        assert!(!item.meets_minimum(79));
        assert!(item.belongs_to(Period::new(202501).unwrap(), "PRG01"));
        assert!(!item.belongs_to(Period::new(202502).unwrap(), "PRG01"));
    }
}
