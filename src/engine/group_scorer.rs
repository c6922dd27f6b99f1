// ==========================================
// 陈列活动奖励评估 - 条件组评分
// ==========================================
// 规则:
// - points_earned   = Σ 测量值 >= 最小值 的条件分值
// - points_possible = Σ 组内全部条件分值
// - passed          = points_earned >= group_point
//   (不要求组内每个条件都达标, 运营可配置 "3 项中 2 项达标即可")
// - 未达标条件逐条输出失败原因, 顺序与组内条件顺序一致
// 红线: 无状态、无副作用、无 I/O 操作; 无效测量值不中断评估
// 红线: 分值累加一律 checked, 溢出按条件数据脏数据上抛
// ==========================================

use crate::domain::{FailureReason, GroupOutcome};
use crate::engine::audit_lookup::{AuditLookup, AuditReading};
use crate::engine::criteria_model::GroupCriteria;
use crate::engine::error::EvaluationError;
use tracing::warn;

/// 单组评分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupScore {
    pub outcome: GroupOutcome,
    pub failures: Vec<FailureReason>,
}

pub struct GroupScorer;

impl GroupScorer {
    /// 对单个条件组评分
    ///
    /// # 返回
    /// - Err(EvaluationError::DataAccess): 组内分值累加溢出
    pub fn score(group: &GroupCriteria, audits: &AuditLookup) -> Result<GroupScore, EvaluationError> {
        let overflow = || EvaluationError::points_overflow(group.group_no);
        let points_possible = group.points_possible().ok_or_else(overflow)?;
        let mut points_earned: i64 = 0;
        let mut failures = Vec::new();

        for item in &group.items {
            match audits.reading(&item.condition_code) {
                AuditReading::Value(actual) if item.meets_minimum(actual) => {
                    points_earned = points_earned.checked_add(item.point).ok_or_else(overflow)?;
                }
                AuditReading::Value(actual) => {
                    failures.push(FailureReason::below_minimum(
                        &item.condition_code,
                        actual,
                        item.min_value,
                    ));
                }
                AuditReading::NotAudited => {
                    failures.push(FailureReason::not_audited(&item.condition_code));
                }
                AuditReading::Invalid => {
                    let raw = audits
                        .measurement(&item.condition_code)
                        .map(|m| m.raw_value.as_str())
                        .unwrap_or_default();
                    warn!(
                        condition_code = %item.condition_code,
                        raw_value = raw,
                        "测量值无法转换为整数,按未达标处理"
                    );
                    failures.push(FailureReason::invalid_value(&item.condition_code));
                }
            }
        }

        let outcome = GroupOutcome {
            group_no: group.group_no,
            points_earned,
            points_possible,
            group_point: group.group_point,
            passed: points_earned >= group.group_point,
        };

        Ok(GroupScore { outcome, failures })
    }
}
