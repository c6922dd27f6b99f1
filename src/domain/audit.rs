// ==========================================
// 陈列活动奖励评估 - 巡店测量领域模型
// ==========================================
// 数据来源: audit_picture 表
// 自然键: (period, customer_code, condition_code), 上游按最新测量覆盖
// ==========================================

use crate::domain::types::Period;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// AuditMeasurement - 巡店测量记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditMeasurement {
    pub period: Period,
    pub customer_code: String,
    pub condition_code: String,
    pub raw_value: String,                    // 原始测量值 (字符串, 应可转为整数)
    pub measured_at: Option<NaiveDateTime>,   // 测量时间
}

// ==========================================
// MeasuredValue - 测量值解析结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasuredValue {
    Numeric(i64),
    Invalid,
}

impl AuditMeasurement {
    /// 将原始测量值转换为整数
    ///
    /// # 规则
    /// - 去除首尾空白后按十进制整数解析 (允许正负号)
    /// - 小数、空串、非数字均视为无效值
    pub fn numeric_value(&self) -> MeasuredValue {
        match self.raw_value.trim().parse::<i64>() {
            Ok(value) => MeasuredValue::Numeric(value),
            Err(_) => MeasuredValue::Invalid,
        }
    }

    /// 是否属于指定的期间与客户
    pub fn belongs_to(&self, period: Period, customer_code: &str) -> bool {
        self.period == period && self.customer_code == customer_code
    }
}
