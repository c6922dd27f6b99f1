// ==========================================
// 陈列活动奖励评估 - 活动登记领域模型
// ==========================================
// 数据来源: register 表 (运营人员录入)
// 红线: 评估引擎只读,不修改登记记录
// ==========================================

use crate::domain::types::Period;
use serde::{Deserialize, Serialize};

// ==========================================
// RegistrationRecord - 客户活动登记
// ==========================================
// 自然键: (period, program_code, customer_code, display_type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    // ===== 主键 =====
    pub period: Period,           // 登记期间 (YYYYMM)
    pub program_code: String,     // 活动代码
    pub customer_code: String,    // 客户代码
    pub display_type: String,     // 陈列类型 (如 KE_3_O)

    // ===== 登记内容 =====
    pub register_qty: u32,        // 登记数量
    pub active: bool,             // 登记状态 (true=有效, false=已停用)
}

impl RegistrationRecord {
    /// 是否属于指定的期间与客户
    pub fn belongs_to(&self, period: Period, customer_code: &str) -> bool {
        self.period == period && self.customer_code == customer_code
    }
}
