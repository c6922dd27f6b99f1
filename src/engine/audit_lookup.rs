// ==========================================
// 陈列活动奖励评估 - 测量值索引
// ==========================================
// 职责: 按条件代码索引客户当期的测量记录 (每次评估构建一次)
// 规则:
// - 同一条件代码出现多条时取测量时间最新的一条,时间相同取后出现者
// - 其他期间/客户的记录忽略
// ==========================================

use crate::domain::{AuditMeasurement, MeasuredValue, Period};
use std::collections::HashMap;

/// 单个条件的测量读数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditReading {
    NotAudited,
    Invalid,
    Value(i64),
}

#[derive(Debug, Clone, Default)]
pub struct AuditLookup {
    by_code: HashMap<String, AuditMeasurement>,
}

impl AuditLookup {
    pub fn build(period: Period, customer_code: &str, measurements: Vec<AuditMeasurement>) -> Self {
        let mut by_code: HashMap<String, AuditMeasurement> = HashMap::new();

        for measurement in measurements
            .into_iter()
            .filter(|m| m.belongs_to(period, customer_code))
        {
            let replace = match by_code.get(&measurement.condition_code) {
                Some(existing) => existing.measured_at <= measurement.measured_at,
                None => true,
            };
            if replace {
                by_code.insert(measurement.condition_code.clone(), measurement);
            }
        }

        Self { by_code }
    }

    /// 查询条件的读数
    pub fn reading(&self, condition_code: &str) -> AuditReading {
        match self.by_code.get(condition_code) {
            None => AuditReading::NotAudited,
            Some(measurement) => match measurement.numeric_value() {
                MeasuredValue::Numeric(value) => AuditReading::Value(value),
                MeasuredValue::Invalid => AuditReading::Invalid,
            },
        }
    }

    pub fn measurement(&self, condition_code: &str) -> Option<&AuditMeasurement> {
        self.by_code.get(condition_code)
    }

    /// 已索引的条件代码
    pub fn condition_codes(&self) -> impl Iterator<Item = &str> {
        self.by_code.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}
