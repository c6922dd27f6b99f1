// ==========================================
// 陈列活动奖励评估 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑, 评估相关表全部只读
// ==========================================
// 职责: 提供评估数据源接口及其 SQLite / 内存实现
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod audit_repo;
pub mod criteria_repo;
pub mod error;
pub mod feeds;
pub mod registration_repo;
mod row_support;
pub mod snapshot;

// 重导出核心仓储
pub use audit_repo::AuditRepository;
pub use criteria_repo::CriteriaRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use feeds::{AuditFeed, CriteriaFeed, RegistrationFeed};
pub use registration_repo::RegistrationRepository;
pub use snapshot::EvaluationSnapshot;

use crate::config::DatabaseSettings;
use crate::db::{open_sqlite_connection, read_schema_version};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// SqliteRepositories - SQLite 仓储集合
// ==========================================
// 三个仓储共享同一连接,简化评估引擎的依赖注入
#[derive(Clone)]
pub struct SqliteRepositories {
    pub registrations: Arc<RegistrationRepository>,
    pub criteria: Arc<CriteriaRepository>,
    pub audits: Arc<AuditRepository>,
}

impl SqliteRepositories {
    /// 按配置打开数据库并创建全部仓储
    pub fn open(settings: &DatabaseSettings) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(settings)?;
        match read_schema_version(&conn)? {
            Some(version) => debug!(db_path = %settings.db_path, schema_version = version, "数据库已打开"),
            None => debug!(db_path = %settings.db_path, "数据库已打开 (无 schema_version 表)"),
        }
        Ok(Self::from_connection(Arc::new(Mutex::new(conn))))
    }

    /// 从已有连接创建全部仓储
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            registrations: Arc::new(RegistrationRepository::from_connection(conn.clone())),
            criteria: Arc::new(CriteriaRepository::from_connection(conn.clone())),
            audits: Arc::new(AuditRepository::from_connection(conn)),
        }
    }
}
