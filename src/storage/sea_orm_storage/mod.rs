//! SeaORM 存储实现
//!
//! 基于 SQLite 的数据库存储层，启动时由 migration crate 建表。

mod assignments;
mod classes;
mod results;
mod submissions;
mod tests;
mod units;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{AutogradeError, Result};
use crate::models::PAGE_SIZE;
use migration::{CourseTables, MigrationTrait, Migrator, MigratorTrait, SchemaManager};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;
        let db = Self::connect_sqlite(&db_url, config).await?;

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 连接（文件库启用 WAL，内存库固定单连接）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AutogradeError::configuration(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        if !in_memory {
            opt = opt
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory");
        }

        // 内存库每个连接都是独立的数据库
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(config.pool_size.max(1))
                .min_connections(1)
                .test_before_acquire(true)
                .idle_timeout(Duration::from_secs(300))
        }
        .acquire_timeout(Duration::from_secs(config.timeout))
        .connect_with(opt)
        .await
        .map_err(|e| AutogradeError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 由文件路径或 URL 构建 SQLite 连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        let url = url.trim();
        if url.is_empty() {
            Err(AutogradeError::configuration("数据库路径不能为空"))
        } else if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else {
            Ok(format!("sqlite://{url}?mode=rwc"))
        }
    }

    /// 主键区间分页扫描，所有 get_all_* 共用
    pub(crate) async fn page_by_key<E>(
        &self,
        id_column: E::Column,
        offset: i64,
    ) -> Result<Vec<E::Model>>
    where
        E: EntityTrait,
    {
        E::find()
            .filter(id_column.gte(offset))
            .filter(id_column.lt(offset.saturating_add(PAGE_SIZE)))
            .order_by_asc(id_column)
            .all(&self.db)
            .await
            .map_err(|e| AutogradeError::database_operation(format!("分页查询失败: {e}")))
    }

    /// 在事务内删除并重建课程表
    pub async fn reset_store_impl(&self) -> Result<Arc<dyn Storage>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AutogradeError::database_operation(format!("开启事务失败: {e}")))?;

        {
            let manager = SchemaManager::new(&txn);
            CourseTables.down(&manager).await?;
            CourseTables.up(&manager).await?;
        }

        txn.commit()
            .await
            .map_err(|e| AutogradeError::database_operation(format!("重置数据库失败: {e}")))?;

        warn!("Course tables dropped and recreated");

        Ok(Arc::new(Self {
            db: self.db.clone(),
        }))
    }
}

/// 将唯一约束冲突转换为 AlreadyExists，其余为数据库操作错误
pub(crate) fn map_insert_error(err: sea_orm::DbErr, entity: &str) -> AutogradeError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
            AutogradeError::already_exists(format!("{entity} already exists"))
        }
        _ => AutogradeError::database_operation(format!("创建{entity}失败: {err}")),
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    classes::{entities::Class, requests::CreateClassRequest},
    results::{entities::TestResult, requests::CreateResultRequest},
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
    tests::{entities::Test, requests::CreateTestRequest},
    units::{entities::Unit, requests::CreateUnitRequest},
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 单元模块
    async fn create_unit(&self, unit: CreateUnitRequest) -> Result<Unit> {
        self.create_unit_impl(unit).await
    }

    async fn get_unit_by_id(&self, id: i64, fetch_classes: bool) -> Result<Option<Unit>> {
        self.get_unit_by_id_impl(id, fetch_classes).await
    }

    async fn get_unit_by_name(&self, name: &str) -> Result<Option<Unit>> {
        self.get_unit_by_name_impl(name).await
    }

    async fn get_all_units(&self, offset: i64) -> Result<Vec<Unit>> {
        self.get_all_units_impl(offset).await
    }

    async fn get_units_by_ids(&self, ids: &[i64]) -> Result<Vec<Unit>> {
        self.get_units_by_ids_impl(ids).await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(id).await
    }

    async fn get_all_classes(&self, offset: i64) -> Result<Vec<Class>> {
        self.get_all_classes_impl(offset).await
    }

    async fn get_classes_for_unit(&self, unit_id: i64) -> Result<Vec<Class>> {
        self.get_classes_for_unit_impl(unit_id).await
    }

    async fn get_classes_by_ids(&self, ids: &[i64]) -> Result<Vec<Class>> {
        self.get_classes_by_ids_impl(ids).await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(id).await
    }

    async fn get_all_assignments(&self, offset: i64) -> Result<Vec<Assignment>> {
        self.get_all_assignments_impl(offset).await
    }

    async fn get_assignments_for_class(&self, class_id: i64) -> Result<Vec<Assignment>> {
        self.get_assignments_for_class_impl(class_id).await
    }

    async fn get_assignments_by_ids(&self, ids: &[i64]) -> Result<Vec<Assignment>> {
        self.get_assignments_by_ids_impl(ids).await
    }

    // 测试用例模块
    async fn create_test(&self, test: CreateTestRequest) -> Result<Test> {
        self.create_test_impl(test).await
    }

    async fn get_test_by_id(&self, id: i64) -> Result<Option<Test>> {
        self.get_test_by_id_impl(id).await
    }

    async fn get_all_tests(&self, offset: i64) -> Result<Vec<Test>> {
        self.get_all_tests_impl(offset).await
    }

    async fn get_tests_for_assignment(&self, assignment_id: i64) -> Result<Vec<Test>> {
        self.get_tests_for_assignment_impl(assignment_id).await
    }

    async fn get_tests_by_ids(&self, ids: &[i64]) -> Result<Vec<Test>> {
        self.get_tests_by_ids_impl(ids).await
    }

    // 提交模块
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission> {
        self.create_submission_impl(submission).await
    }

    async fn create_submission_with_result(
        &self,
        submission: CreateSubmissionRequest,
        score: f64,
    ) -> Result<(Submission, TestResult)> {
        self.create_submission_with_result_impl(submission, score)
            .await
    }

    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(id).await
    }

    async fn get_all_submissions(&self, offset: i64) -> Result<Vec<Submission>> {
        self.get_all_submissions_impl(offset).await
    }

    async fn get_submissions_for_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>> {
        self.get_submissions_for_assignment_impl(assignment_id)
            .await
    }

    async fn get_submissions_by_ids(&self, ids: &[i64]) -> Result<Vec<Submission>> {
        self.get_submissions_by_ids_impl(ids).await
    }

    // 成绩模块
    async fn create_result(&self, result: CreateResultRequest) -> Result<TestResult> {
        self.create_result_impl(result).await
    }

    async fn get_result_by_id(&self, id: i64) -> Result<Option<TestResult>> {
        self.get_result_by_id_impl(id).await
    }

    async fn get_all_results(&self, offset: i64) -> Result<Vec<TestResult>> {
        self.get_all_results_impl(offset).await
    }

    async fn get_result_for_submission(&self, submission_id: i64) -> Result<Option<TestResult>> {
        self.get_result_for_submission_impl(submission_id).await
    }

    async fn get_results_by_ids(&self, ids: &[i64]) -> Result<Vec<TestResult>> {
        self.get_results_by_ids_impl(ids).await
    }

    async fn get_results_for_submissions(&self, submission_ids: &[i64]) -> Result<Vec<TestResult>> {
        self.get_results_for_submissions_impl(submission_ids).await
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 系统模块
    async fn reset_store(&self) -> Result<Arc<dyn Storage>> {
        self.reset_store_impl().await
    }
}

/// 测试用内存数据库
#[cfg(test)]
pub(crate) async fn memory_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::connect(&config)
        .await
        .expect("in-memory storage should connect")
}

#[cfg(test)]
mod storage_tests {
    use super::*;
    use crate::models::users::entities::UserRole;

    async fn seed_course(storage: &SeaOrmStorage) -> (Unit, Class, Assignment) {
        let unit = storage
            .create_unit(CreateUnitRequest {
                name: "COMP1000".to_string(),
            })
            .await
            .unwrap();
        let class = storage
            .create_class(CreateClassRequest {
                name: "Lab1".to_string(),
                unit_id: unit.id,
            })
            .await
            .unwrap();
        let assignment = storage
            .create_assignment(CreateAssignmentRequest {
                name: "A1".to_string(),
                due_date: 1_767_225_600,
                class_id: class.id,
            })
            .await
            .unwrap();
        (unit, class, assignment)
    }

    #[tokio::test]
    async fn test_create_then_get_returns_supplied_fields() {
        let storage = memory_storage().await;
        let (unit, class, assignment) = seed_course(&storage).await;

        let fetched = storage.get_unit_by_id(unit.id, false).await.unwrap();
        assert_eq!(fetched.as_ref().map(|u| u.name.as_str()), Some("COMP1000"));

        let fetched = storage.get_class_by_id(class.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Lab1");
        assert_eq!(fetched.unit_id, unit.id);

        let fetched = storage
            .get_assignment_by_id(assignment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "A1");
        assert_eq!(fetched.due_date.timestamp(), 1_767_225_600);
        assert_eq!(fetched.class_id, class.id);

        let test = storage
            .create_test(CreateTestRequest {
                name: "compiles".to_string(),
                storage_path: "COMP1000/A1/Tests/1".to_string(),
                assignment_id: assignment.id,
            })
            .await
            .unwrap();
        let fetched = storage.get_test_by_id(test.id).await.unwrap().unwrap();
        assert_eq!(fetched, test);

        let submission = storage
            .create_submission(CreateSubmissionRequest {
                student_id: "s1234567".to_string(),
                assignment_id: assignment.id,
            })
            .await
            .unwrap();
        let fetched = storage
            .get_submission_by_id(submission.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched, submission);

        let result = storage
            .create_result(CreateResultRequest {
                score: 42.5,
                submission_id: submission.id,
            })
            .await
            .unwrap();
        let fetched = storage.get_result_by_id(result.id).await.unwrap().unwrap();
        assert_eq!(fetched.score, 42.5);
        assert_eq!(fetched.submission_id, submission.id);
    }

    #[tokio::test]
    async fn test_missing_record_is_none() {
        let storage = memory_storage().await;
        assert!(storage.get_unit_by_id(99, true).await.unwrap().is_none());
        assert!(storage.get_class_by_id(99).await.unwrap().is_none());
        assert!(storage.get_result_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unit_name_is_unique() {
        let storage = memory_storage().await;
        seed_course(&storage).await;

        let found = storage.get_unit_by_name("COMP1000").await.unwrap();
        assert!(found.is_some());

        let err = storage
            .create_unit(CreateUnitRequest {
                name: "COMP1000".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AutogradeError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_unit_with_classes_is_eager_only_when_asked() {
        let storage = memory_storage().await;
        let (unit, class, _) = seed_course(&storage).await;

        let lazy = storage.get_unit_by_id(unit.id, false).await.unwrap().unwrap();
        assert!(lazy.classes.is_empty());

        let eager = storage.get_unit_by_id(unit.id, true).await.unwrap().unwrap();
        assert_eq!(eager.classes, vec![class]);
    }

    #[tokio::test]
    async fn test_pagination_scans_key_range() {
        let storage = memory_storage().await;
        for i in 0..60 {
            storage
                .create_unit(CreateUnitRequest {
                    name: format!("UNIT{i:04}"),
                })
                .await
                .unwrap();
        }

        let first = storage.get_all_units(1).await.unwrap();
        assert_eq!(first.len(), 50);
        assert!(first.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(first[0].id, 1);

        let second = storage.get_all_units(51).await.unwrap();
        assert_eq!(second.len(), 10);
        assert_eq!(second[0].id, 51);
    }

    #[tokio::test]
    async fn test_children_filtered_by_parent() {
        let storage = memory_storage().await;
        let (unit, class, assignment) = seed_course(&storage).await;
        storage
            .create_class(CreateClassRequest {
                name: "Lab2".to_string(),
                unit_id: unit.id,
            })
            .await
            .unwrap();

        assert_eq!(storage.get_classes_for_unit(unit.id).await.unwrap().len(), 2);
        assert_eq!(
            storage.get_assignments_for_class(class.id).await.unwrap(),
            vec![assignment.clone()]
        );
        assert!(
            storage
                .get_tests_for_assignment(assignment.id)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_dangling_parent_is_rejected_by_store() {
        let storage = memory_storage().await;
        let err = storage
            .create_class(CreateClassRequest {
                name: "Orphan".to_string(),
                unit_id: 404,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AutogradeError::DatabaseOperation(_)));
    }

    #[tokio::test]
    async fn test_submission_with_result_in_one_transaction() {
        let storage = memory_storage().await;
        let (_, _, assignment) = seed_course(&storage).await;

        let (submission, result) = storage
            .create_submission_with_result(
                CreateSubmissionRequest {
                    student_id: "s1".to_string(),
                    assignment_id: assignment.id,
                },
                77.0,
            )
            .await
            .unwrap();
        assert_eq!(result.submission_id, submission.id);

        let found = storage
            .get_result_for_submission(submission.id)
            .await
            .unwrap();
        assert_eq!(found, Some(result));

        // 同一提交不能有第二条成绩
        let err = storage
            .create_result(CreateResultRequest {
                score: 10.0,
                submission_id: submission.id,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AutogradeError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_submission_with_result_requires_assignment() {
        let storage = memory_storage().await;
        let err = storage
            .create_submission_with_result(
                CreateSubmissionRequest {
                    student_id: "s1".to_string(),
                    assignment_id: 404,
                },
                50.0,
            )
            .await;
        assert!(err.is_err());
        assert!(storage.get_all_submissions(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_lookup_skips_missing_ids() {
        let storage = memory_storage().await;
        let (unit, class, assignment) = seed_course(&storage).await;

        let units = storage.get_units_by_ids(&[unit.id, 999]).await.unwrap();
        assert_eq!(units.len(), 1);
        let classes = storage.get_classes_by_ids(&[class.id]).await.unwrap();
        assert_eq!(classes[0].name, "Lab1");
        let assignments = storage
            .get_assignments_by_ids(&[assignment.id, assignment.id])
            .await
            .unwrap();
        assert_eq!(assignments.len(), 1);
    }

    #[tokio::test]
    async fn test_reset_empties_course_tables_and_keeps_users() {
        let storage = memory_storage().await;
        let (_, _, assignment) = seed_course(&storage).await;
        storage
            .create_submission_with_result(
                CreateSubmissionRequest {
                    student_id: "s1".to_string(),
                    assignment_id: assignment.id,
                },
                90.0,
            )
            .await
            .unwrap();
        storage
            .create_user(CreateUserRequest {
                email: "admin@uni.edu".to_string(),
                password_hash: "hash".to_string(),
                role: UserRole::Admin,
            })
            .await
            .unwrap();

        let fresh = storage.reset_store().await.unwrap();

        assert!(fresh.get_all_units(1).await.unwrap().is_empty());
        assert!(fresh.get_all_classes(1).await.unwrap().is_empty());
        assert!(fresh.get_all_assignments(1).await.unwrap().is_empty());
        assert!(fresh.get_all_tests(1).await.unwrap().is_empty());
        assert!(fresh.get_all_submissions(1).await.unwrap().is_empty());
        assert!(fresh.get_all_results(1).await.unwrap().is_empty());
        assert!(
            fresh
                .get_user_by_email("admin@uni.edu")
                .await
                .unwrap()
                .is_some()
        );
        assert_eq!(fresh.count_users().await.unwrap(), 1);
    }

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("autograde.db").unwrap(),
            "sqlite://autograde.db?mode=rwc"
        );
        assert!(SeaOrmStorage::build_database_url("  ").is_err());
    }
}
