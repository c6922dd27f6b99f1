// ==========================================
// 陈列活动奖励评估 - 巡店测量数据仓储
// ==========================================
// 表: audit_picture
// 红线: Repository 不含业务逻辑, 只读
// 说明: value 以文本返回,数值转换由引擎负责
// ==========================================

use crate::config::DatabaseSettings;
use crate::db::open_sqlite_connection;
use crate::domain::{AuditMeasurement, Period};
use crate::repository::error::RepositoryResult;
use crate::repository::feeds::AuditFeed;
use crate::repository::row_support::{lock_conn, period_column, raw_text_column};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// AuditRepository - 巡店测量仓储
// ==========================================
pub struct AuditRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AuditRepository {
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

    /// 查询客户在该期间的全部测量记录
    ///
    /// # 返回
    /// - Err(MalformedRecord): audit_date 不是合法的日期时间文本
    pub fn find_by_customer(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<AuditMeasurement>> {
        let conn = lock_conn(&self.conn)?;

        let mut stmt = conn.prepare(
            r#"
            SELECT yyyymm, customer_code, condition_code, value, audit_date
            FROM audit_picture
            WHERE yyyymm = ?1 AND customer_code = ?2
            ORDER BY condition_code
            "#,
        )?;

        let measurements = stmt
            .query_map(params![period.yyyymm(), customer_code], |row| {
                Ok(AuditMeasurement {
                    period: period_column(row, 0)?,
                    customer_code: row.get(1)?,
                    condition_code: row.get(2)?,
                    raw_value: raw_text_column(row, 3)?,
                    measured_at: row.get::<_, Option<NaiveDateTime>>(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<AuditMeasurement>>>()?;

        Ok(measurements)
    }
}

impl AuditFeed for AuditRepository {
    fn get_audit_measurements(
        &self,
        period: Period,
        customer_code: &str,
    ) -> RepositoryResult<Vec<AuditMeasurement>> {
        self.find_by_customer(period, customer_code)
    }
}
