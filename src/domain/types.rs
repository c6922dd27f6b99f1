// ==========================================
// 陈列活动奖励评估 - 领域类型定义
// ==========================================
// 职责: 评估期间 (YYYYMM), 评估终态与评估阶段
// 红线: 四种终态均为正常返回值,不是错误
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==========================================
// 评估期间 (Period)
// ==========================================
// 整数形式 YYYYMM, 所有配置与测量数据都按月划分
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Period(u32);

/// 期间格式错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("期间月份无效: yyyymm={0}")]
    InvalidMonth(u32),

    #[error("期间年份超出范围: yyyymm={0}")]
    InvalidYear(u32),

    #[error("期间格式无法解析: {0}")]
    Unparsable(String),
}

impl Period {
    pub const MIN_YEAR: u32 = 1900;
    pub const MAX_YEAR: u32 = 9999;

    /// 从 YYYYMM 整数创建期间
    ///
    /// # 返回
    /// - Ok(Period): 年份在 1900..=9999 且月份在 1..=12
    /// - Err(PeriodError): 其他情况
    pub fn new(yyyymm: u32) -> Result<Self, PeriodError> {
        let year = yyyymm / 100;
        let month = yyyymm % 100;

        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(yyyymm));
        }
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(PeriodError::InvalidYear(yyyymm));
        }

        Ok(Self(yyyymm))
    }

    /// 从年、月创建期间
    pub fn from_year_month(year: u32, month: u32) -> Result<Self, PeriodError> {
        Self::new(year.saturating_mul(100).saturating_add(month))
    }

    pub fn yyyymm(&self) -> u32 {
        self.0
    }

    pub fn year(&self) -> u32 {
        self.0 / 100
    }

    pub fn month(&self) -> u32 {
        self.0 % 100
    }
}

impl TryFrom<u32> for Period {
    type Error = PeriodError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Period::new(value)
    }
}

impl From<Period> for u32 {
    fn from(period: Period) -> Self {
        period.0
    }
}

impl std::str::FromStr for Period {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.len() != 6 {
            return Err(PeriodError::Unparsable(s.to_string()));
        }
        let value: u32 = trimmed
            .parse()
            .map_err(|_| PeriodError::Unparsable(s.to_string()))?;
        Period::new(value)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

// ==========================================
// 评估终态 (Evaluation Outcome)
// ==========================================
// 展示层需要区分: 未登记 / 活动未配置条件 / 未达标 / 达标
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationOutcome {
    NotRegistered,       // 客户未登记该活动
    NoConditionsDefined, // 活动在该期间未配置考核条件
    CriteriaNotMet,      // 已评分但未达标
    Success,             // 全部达标
}

impl fmt::Display for EvaluationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationOutcome::NotRegistered => write!(f, "NOT_REGISTERED"),
            EvaluationOutcome::NoConditionsDefined => write!(f, "NO_CONDITIONS_DEFINED"),
            EvaluationOutcome::CriteriaNotMet => write!(f, "CRITERIA_NOT_MET"),
            EvaluationOutcome::Success => write!(f, "SUCCESS"),
        }
    }
}

// ==========================================
// 评估阶段 (Evaluation Stage)
// ==========================================
// Start → RegistrationChecked → CriteriaLoaded → Scored → Finalized
// 未登记 / 无条件 时从中间阶段直接进入 Finalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStage {
    Start,
    RegistrationChecked,
    CriteriaLoaded,
    Scored,
    Finalized,
}

impl fmt::Display for EvaluationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationStage::Start => write!(f, "START"),
            EvaluationStage::RegistrationChecked => write!(f, "REGISTRATION_CHECKED"),
            EvaluationStage::CriteriaLoaded => write!(f, "CRITERIA_LOADED"),
            EvaluationStage::Scored => write!(f, "SCORED"),
            EvaluationStage::Finalized => write!(f, "FINALIZED"),
        }
    }
}
