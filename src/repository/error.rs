// ==========================================
// 陈列活动奖励评估 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 仓储错误属于运行故障 (连接/超时/脏数据),
//       与 "未登记" "未配置条件" 等业务状态严格区分
// ==========================================

use rusqlite::ErrorCode;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库繁忙或被锁定: {0}")]
    DatabaseBusy(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    // ===== 数据质量错误 =====
    #[error("记录格式错误: {0}")]
    MalformedRecord(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref ffi_err, ref msg) => match ffi_err.code {
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                    RepositoryError::DatabaseBusy(msg.clone().unwrap_or_else(|| err.to_string()))
                }
                ErrorCode::CannotOpen | ErrorCode::NotADatabase => {
                    RepositoryError::DatabaseConnectionError(err.to_string())
                }
                _ => RepositoryError::DatabaseQueryError(
                    msg.clone().unwrap_or_else(|| err.to_string()),
                ),
            },
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..)
            | rusqlite::Error::IntegralValueOutOfRange(..) => {
                RepositoryError::MalformedRecord(err.to_string())
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
