// ==========================================
// 陈列活动奖励评估 - 活动登记数据仓储
// ==========================================
// 表: register
// 红线: Repository 不含业务逻辑, 只读
// ==========================================

use crate::config::DatabaseSettings;
use crate::db::open_sqlite_connection;
use crate::domain::{Period, RegistrationRecord};
use crate::repository::error::RepositoryResult;
use crate::repository::feeds::RegistrationFeed;
use crate::repository::row_support::{lock_conn, period_column};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// RegistrationRepository - 活动登记仓储
// ==========================================
pub struct RegistrationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RegistrationRepository {
    /// 按配置打开数据库并创建仓储实例
    pub fn open(settings: &DatabaseSettings) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(settings)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 查询客户在该期间的全部登记 (含已停用)
    ///
    /// # 排序
    /// - program_code, display_type (同一活动多条陈列类型时按此顺序取首条)
    pub fn find_by_customer(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<RegistrationRecord>> {
        let conn = lock_conn(&self.conn)?;

        let mut stmt = conn.prepare(
            r#"
            SELECT yyyymm, program_code, customer_code, display_type, register_qty, status
            FROM register
            WHERE yyyymm = ?1 AND customer_code = ?2
            ORDER BY program_code, display_type
            "#,
        )?;

        let records = stmt
            .query_map(params![period.yyyymm(), customer_code], |row| {
                Ok(RegistrationRecord {
                    period: period_column(row, 0)?,
                    program_code: row.get(1)?,
                    customer_code: row.get(2)?,
                    display_type: row.get(3)?,
                    register_qty: row.get(4)?,
                    active: row.get(5)?,
                })
            })?
            .collect::<SqliteResult<Vec<RegistrationRecord>>>()?;

        Ok(records)
    }
}

impl RegistrationFeed for RegistrationRepository {
    fn get_registrations(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<RegistrationRecord>> {
        self.find_by_customer(period, customer_code)
    }
}
