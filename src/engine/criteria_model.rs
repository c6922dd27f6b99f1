// ==========================================
// 陈列活动奖励评估 - 考核条件模型
// ==========================================
// 职责: 将条件与条件组整理为按组号升序的评分结构
// 规则:
// - 条件为空 → None (NoConditionsDefined, 属配置问题)
// - 组内条件保持数据源顺序
// - 条件的组号没有对应组行 → 按同组号的隐式组处理,达标线为 0
// - 组行没有任何条件 → 0/0 分,按其达标线正常判定
// - 达标线高于组满分时不做修正,视为无法通过的正常配置
// - 组满分累加溢出时 points_possible 返回 None, 由调用方按脏数据处理
// ==========================================

use crate::domain::{ConditionItem, CriteriaGroup, Period};
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

/// 单个条件组及其条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCriteria {
    pub group_no: i32,
    pub group_point: i64,
    pub configured: bool,           // 是否存在组行
    pub items: Vec<ConditionItem>,
}

impl GroupCriteria {
    /// 组满分 (与测量无关)
    ///
    /// # 返回
    /// - None: 分值之和超出 i64 范围
    pub fn points_possible(&self) -> Option<i64> {
        self.items
            .iter()
            .try_fold(0i64, |acc, item| acc.checked_add(item.point))
    }
}

/// 活动在某期间的完整考核条件
#[derive(Debug, Clone)]
pub struct CriteriaModel {
    groups: Vec<GroupCriteria>,
    condition_codes: HashSet<String>,
}

impl CriteriaModel {
    /// 由数据源读取的条件与条件组构建模型
    ///
    /// # 返回
    /// - Some(CriteriaModel): 至少有一个条件
    /// - None: 该期间该活动没有任何条件
    pub fn build(
        period: Period,
        program_code: &str,
        items: Vec<ConditionItem>,
        groups: Vec<CriteriaGroup>,
    ) -> Option<Self> {
        let items: Vec<ConditionItem> = items
            .into_iter()
            .filter(|item| item.belongs_to(period, program_code))
            .collect();

        if items.is_empty() {
            return None;
        }

        let mut by_group: BTreeMap<i32, GroupCriteria> = BTreeMap::new();

        for group in groups.into_iter().filter(|g| g.belongs_to(period, program_code)) {
            by_group.entry(group.group_no).or_insert(GroupCriteria {
                group_no: group.group_no,
                group_point: group.group_point,
                configured: true,
                items: Vec::new(),
            });
        }

        for item in items {
            let entry = by_group.entry(item.group_no).or_insert_with(|| {
                warn!(
                    program_code,
                    period = %period,
                    group_no = item.group_no,
                    "条件所属组未配置组行,按达标线 0 处理"
                );
                GroupCriteria {
                    group_no: item.group_no,
                    group_point: 0,
                    configured: false,
                    items: Vec::new(),
                }
            });
            entry.items.push(item);
        }

        let groups: Vec<GroupCriteria> = by_group.into_values().collect();

        let condition_codes: HashSet<String> = groups
            .iter()
            .flat_map(|g| g.items.iter().map(|item| item.condition_code.clone()))
            .collect();

        Some(Self {
            groups,
            condition_codes,
        })
    }

    /// 按组号升序的条件组
    pub fn groups(&self) -> &[GroupCriteria] {
        &self.groups
    }

    /// 条件代码是否在本活动中配置
    pub fn is_configured(&self, condition_code: &str) -> bool {
        self.condition_codes.contains(condition_code)
    }

    pub fn condition_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}
