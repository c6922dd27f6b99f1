// ==========================================
// 陈列活动奖励评估 - 引擎错误类型
// ==========================================
// 说明: 引擎唯一的错误来源是数据源读取失败
//       未登记/未配置条件/未达标 均为正常返回值
// ==========================================

use crate::repository::RepositoryError;
use std::fmt;
use thiserror::Error;

/// 评估引擎读取的数据源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Registrations,
    ConditionItems,
    ConditionGroups,
    AuditMeasurements,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Registrations => write!(f, "registrations"),
            FeedKind::ConditionItems => write!(f, "condition_items"),
            FeedKind::ConditionGroups => write!(f, "condition_groups"),
            FeedKind::AuditMeasurements => write!(f, "audit_measurements"),
        }
    }
}

/// 评估错误 (运行故障,需调用方重试或告警)
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("数据访问不可用 (feed={feed}): {source}")]
    DataAccess {
        feed: FeedKind,
        #[source]
        source: RepositoryError,
    },
}

impl EvaluationError {
    pub fn data_access(feed: FeedKind) -> impl FnOnce(RepositoryError) -> Self {
        move |source| EvaluationError::DataAccess { feed, source }
    }

    /// 条件分值累加溢出 (条件数据源返回了不可用的分值)
    pub fn points_overflow(group_no: i32) -> Self {
        EvaluationError::DataAccess {
            feed: FeedKind::ConditionItems,
            source: RepositoryError::MalformedRecord(format!(
                "条件分值累加溢出: group={}",
                group_no
            )),
        }
    }

    /// 失败的数据源
    pub fn feed(&self) -> FeedKind {
        match self {
            EvaluationError::DataAccess { feed, .. } => *feed,
        }
    }
}
