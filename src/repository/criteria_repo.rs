// ==========================================
// 陈列活动奖励评估 - 考核条件数据仓储
// ==========================================
// 表: condition_group / condition_item
// 红线: Repository 不含业务逻辑, 只读
// ==========================================

use crate::config::DatabaseSettings;
use crate::db::open_sqlite_connection;
use crate::domain::{ConditionItem, CriteriaGroup, Period};
use crate::repository::error::RepositoryResult;
use crate::repository::feeds::CriteriaFeed;
use crate::repository::row_support::{lock_conn, period_column};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// CriteriaRepository - 考核条件仓储
// ==========================================
pub struct CriteriaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CriteriaRepository {
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

    /// 查询活动的全部考核条件
    ///
    /// # 排序
    /// - group, condition_code
    pub fn find_items_by_program(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<ConditionItem>> {
        let conn = lock_conn(&self.conn)?;

        let mut stmt = conn.prepare(
            r#"
            SELECT yyyymm, program_code, "group", condition_code,
                   condition_min_value, condition_point
            FROM condition_item
            WHERE yyyymm = ?1 AND program_code = ?2
            ORDER BY "group", condition_code
            "#,
        )?;

        let items = stmt
            .query_map(params![period.yyyymm(), program_code], |row| {
                Ok(ConditionItem {
                    period: period_column(row, 0)?,
                    program_code: row.get(1)?,
                    group_no: row.get(2)?,
                    condition_code: row.get(3)?,
                    min_value: row.get(4)?,
                    point: row.get(5)?,
                })
            })?
            .collect::<SqliteResult<Vec<ConditionItem>>>()?;

        Ok(items)
    }

    /// 查询活动的条件组定义
    ///
    /// # 排序
    /// - group
    pub fn find_groups_by_program(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<CriteriaGroup>> {
        let conn = lock_conn(&self.conn)?;

        let mut stmt = conn.prepare(
            r#"
            SELECT yyyymm, program_code, "group", type_code, group_point
            FROM condition_group
            WHERE yyyymm = ?1 AND program_code = ?2
            ORDER BY "group"
            "#,
        )?;

        let groups = stmt
            .query_map(params![period.yyyymm(), program_code], |row| {
                Ok(CriteriaGroup {
                    period: period_column(row, 0)?,
                    program_code: row.get(1)?,
                    group_no: row.get(2)?,
                    type_code: row.get(3)?,
                    group_point: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<CriteriaGroup>>>()?;

        Ok(groups)
    }
}

impl CriteriaFeed for CriteriaRepository {
    fn get_condition_items(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<ConditionItem>> {
        self.find_items_by_program(period, program_code)
    }

    fn get_condition_groups(
        &self,
        period: Period,
        program_code: &str,
    ) -> RepositoryResult<Vec<CriteriaGroup>> {
        self.find_groups_by_program(period, program_code)
    }
}
