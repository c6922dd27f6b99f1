// ==========================================
// 陈列活动奖励评估 - 评估结果领域模型
// ==========================================
// 职责: 失败原因 (结构化) + 组得分明细 + 最终评估结果
// 红线: 失败原因内部使用结构化类型,仅在边界序列化为文本令牌
//       文本格式需与既有报表消费方保持一致
// ==========================================

use crate::domain::types::{EvaluationOutcome, Period};
use serde::{Serialize, Serializer};
use std::fmt;

// ==========================================
// ConditionFailureKind - 单个条件未达标的类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionFailureKind {
    /// 没有该条件的测量记录
    NotAudited,
    /// 测量值低于最小值
    BelowMinimum { actual: i64, required: i64 },
    /// 测量值无法转换为整数
    InvalidValue,
}

// ==========================================
// FailureReason - 失败原因
// ==========================================
// 文本令牌:
// - NOT_REGISTERED
// - NO_CONDITIONS_DEFINED
// - <code>_NOT_AUDITED
// - <code>_BELOW_MINIMUM(<actual><<required>)
// - <code>_INVALID_VALUE
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    NotRegistered,
    NoConditionsDefined,
    Condition {
        condition_code: String,
        kind: ConditionFailureKind,
    },
}

impl FailureReason {
    pub fn not_audited(condition_code: &str) -> Self {
        FailureReason::Condition {
            condition_code: condition_code.to_string(),
            kind: ConditionFailureKind::NotAudited,
        }
    }

    pub fn below_minimum(condition_code: &str, actual: i64, required: i64) -> Self {
        FailureReason::Condition {
            condition_code: condition_code.to_string(),
            kind: ConditionFailureKind::BelowMinimum { actual, required },
        }
    }

    pub fn invalid_value(condition_code: &str) -> Self {
        FailureReason::Condition {
            condition_code: condition_code.to_string(),
            kind: ConditionFailureKind::InvalidValue,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::NotRegistered => write!(f, "NOT_REGISTERED"),
            FailureReason::NoConditionsDefined => write!(f, "NO_CONDITIONS_DEFINED"),
            FailureReason::Condition {
                condition_code,
                kind,
            } => match kind {
                ConditionFailureKind::NotAudited => write!(f, "{}_NOT_AUDITED", condition_code),
                ConditionFailureKind::BelowMinimum { actual, required } => {
                    write!(f, "{}_BELOW_MINIMUM({}<{})", condition_code, actual, required)
                }
                ConditionFailureKind::InvalidValue => write!(f, "{}_INVALID_VALUE", condition_code),
            },
        }
    }
}

impl Serialize for FailureReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ==========================================
// GroupOutcome - 单组得分明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupOutcome {
    pub group_no: i32,
    pub points_earned: i64,
    pub points_possible: i64,
    pub group_point: i64,         // 组达标分数线 (未配置组行的条件按 0 处理)
    pub passed: bool,
}

// ==========================================
// EvaluationResult - 评估结果
// ==========================================
// 每次评估新建,调用方独占,构造后不再修改
// 不含任何时间戳: 数据不变时重复评估结果完全一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    // ===== 评估对象 =====
    pub period: Period,
    pub customer_code: String,
    pub program_code: String,

    // ===== 得分 =====
    pub total_points: i64,
    pub max_possible_points: i64,
    pub groups: Vec<GroupOutcome>,

    // ===== 判定 =====
    pub meets_criteria: bool,
    pub failure_reasons: Vec<FailureReason>,
    pub registration_active: bool,
    pub outcome: EvaluationOutcome,
}

impl EvaluationResult {
    /// 未登记: 0 分, 0 满分, 不再读取条件与测量数据
    pub fn not_registered(period: Period, customer_code: &str, program_code: &str) -> Self {
        Self {
            period,
            customer_code: customer_code.to_string(),
            program_code: program_code.to_string(),
            total_points: 0,
            max_possible_points: 0,
            groups: Vec::new(),
            meets_criteria: false,
            failure_reasons: vec![FailureReason::NotRegistered],
            registration_active: false,
            outcome: EvaluationOutcome::NotRegistered,
        }
    }

    /// 活动未配置条件: 配置问题,与客户未达标区分
    pub fn no_conditions_defined(
        period: Period,
        customer_code: &str,
        program_code: &str,
        registration_active: bool,
    ) -> Self {
        Self {
            period,
            customer_code: customer_code.to_string(),
            program_code: program_code.to_string(),
            total_points: 0,
            max_possible_points: 0,
            groups: Vec::new(),
            meets_criteria: false,
            failure_reasons: vec![FailureReason::NoConditionsDefined],
            registration_active,
            outcome: EvaluationOutcome::NoConditionsDefined,
        }
    }

    /// 是否有资格领取奖励 = 达标 AND 登记有效
    pub fn eligible_for_reward(&self) -> bool {
        self.meets_criteria && self.registration_active
    }

    /// 得分率 (0.0 ~ 100.0), 满分为 0 时返回 0.0
    pub fn success_rate(&self) -> f64 {
        if self.max_possible_points == 0 {
            return 0.0;
        }
        self.total_points as f64 / self.max_possible_points as f64 * 100.0
    }

    /// 失败原因文本令牌
    pub fn failure_tokens(&self) -> Vec<String> {
        self.failure_reasons.iter().map(|r| r.to_string()).collect()
    }

    /// 失败原因摘要 (最多列出前 3 条)
    pub fn failure_summary(&self) -> String {
        match self.failure_reasons.as_slice() {
            [] => "No failures".to_string(),
            [only] => format!("Failed: {}", only),
            reasons => {
                let listed: Vec<String> = reasons.iter().take(3).map(|r| r.to_string()).collect();
                let ellipsis = if reasons.len() > 3 { "..." } else { "" };
                format!(
                    "Failed {} conditions: {}{}",
                    reasons.len(),
                    listed.join(", "),
                    ellipsis
                )
            }
        }
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.eligible_for_reward() {
            "ELIGIBLE"
        } else {
            "NOT_ELIGIBLE"
        };
        write!(
            f,
            "{}-{}@{}: {}/{} points, {}",
            self.customer_code,
            self.program_code,
            self.period,
            self.total_points,
            self.max_possible_points,
            status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period() -> Period {
        Period::new(202501).unwrap()
    }

    #[test]
    fn test_failure_reason_tokens() {
        assert_eq!(FailureReason::NotRegistered.to_string(), "NOT_REGISTERED");
        assert_eq!(
            FailureReason::NoConditionsDefined.to_string(),
            "NO_CONDITIONS_DEFINED"
        );
        assert_eq!(
            FailureReason::not_audited("DISPLAY_QUALITY").to_string(),
            "DISPLAY_QUALITY_NOT_AUDITED"
        );
        assert_eq!(
            FailureReason::below_minimum("PRODUCT_AVAILABILITY", 88, 90).to_string(),
            "PRODUCT_AVAILABILITY_BELOW_MINIMUM(88<90)"
        );
        assert_eq!(
            FailureReason::invalid_value("CLEANLINESS").to_string(),
            "CLEANLINESS_INVALID_VALUE"
        );
    }

    #[test]
    fn test_failure_reason_serializes_as_token() {
        let json = serde_json::to_string(&vec![
            FailureReason::below_minimum("CLEANLINESS", -5, 0),
            FailureReason::NotRegistered,
        ])
        .unwrap();
        assert_eq!(json, r#"["CLEANLINESS_BELOW_MINIMUM(-5<0)","NOT_REGISTERED"]"#);
    }

    #[test]
    fn test_not_registered_result() {
        let result = EvaluationResult::not_registered(period(), "CUST001", "PRG01");
        assert_eq!(result.failure_tokens(), vec!["NOT_REGISTERED"]);
        assert_eq!(result.total_points, 0);
        assert!(!result.eligible_for_reward());
        assert_eq!(result.success_rate(), 0.0);
        assert_eq!(result.failure_summary(), "Failed: NOT_REGISTERED");
    }

    #[test]
    fn test_failure_summary_truncates() {
        let mut result = EvaluationResult::no_conditions_defined(period(), "CUST001", "PRG01", true);
        result.failure_reasons = vec![
            FailureReason::not_audited("A"),
            FailureReason::not_audited("B"),
            FailureReason::not_audited("C"),
            FailureReason::not_audited("D"),
        ];
        assert_eq!(
            result.failure_summary(),
            "Failed 4 conditions: A_NOT_AUDITED, B_NOT_AUDITED, C_NOT_AUDITED..."
        );

        result.failure_reasons.clear();
        assert_eq!(result.failure_summary(), "No failures");
    }

    #[test]
    fn test_success_rate() {
        let mut result = EvaluationResult::no_conditions_defined(period(), "CUST001", "PRG01", true);
        result.total_points = 60;
        result.max_possible_points = 100;
        assert!((result.success_rate() - 60.0).abs() < f64::EPSILON);
    }
}
