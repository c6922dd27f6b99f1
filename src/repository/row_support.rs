// ==========================================
// 陈列活动奖励评估 - 仓储层行映射辅助
// ==========================================

use crate::domain::Period;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// 读取 yyyymm 整数列并校验为合法期间
pub(crate) fn period_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Period> {
    let raw: u32 = row.get(idx)?;
    Period::new(raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

/// 读取测量值列并转为原始文本
///
/// 说明: 上游可能以 INTEGER/REAL 存储测量值, 统一转为文本; NULL 视为空串
pub(crate) fn raw_text_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    match row.get_ref(idx)? {
        ValueRef::Text(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Integer(i) => Ok(i.to_string()),
        ValueRef::Real(f) => Ok(f.to_string()),
        ValueRef::Null => Ok(String::new()),
        ValueRef::Blob(_) => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "value".to_string(),
            Type::Blob,
        )),
    }
}

/// 获取共享连接
pub(crate) fn lock_conn(conn: &Arc<Mutex<Connection>>) -> RepositoryResult<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| RepositoryError::LockError(e.to_string()))
}
