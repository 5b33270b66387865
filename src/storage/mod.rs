use std::sync::Arc;

use crate::models::{
    assignments::{entities::Assignment, requests::CreateAssignmentRequest},
    classes::{entities::Class, requests::CreateClassRequest},
    results::{entities::TestResult, requests::CreateResultRequest},
    submissions::{entities::Submission, requests::CreateSubmissionRequest},
    tests::{entities::Test, requests::CreateTestRequest},
    units::{entities::Unit, requests::CreateUnitRequest},
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

mod handle;
pub mod sea_orm_storage;

pub use handle::StoreHandle;

/// 持久化网关
///
/// 按 ID 查询时记录不存在返回 `Ok(None)`，由 `services::lookup` 统一转换为 NotFound。
/// `get_all_*` 按主键区间 `[offset, offset + PAGE_SIZE)` 升序扫描。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 单元管理方法
    // 创建单元
    async fn create_unit(&self, unit: CreateUnitRequest) -> Result<Unit>;
    // 通过ID获取单元，fetch_classes 为真时预加载班级
    async fn get_unit_by_id(&self, id: i64, fetch_classes: bool) -> Result<Option<Unit>>;
    // 通过名称获取单元
    async fn get_unit_by_name(&self, name: &str) -> Result<Option<Unit>>;
    // 分页列出单元
    async fn get_all_units(&self, offset: i64) -> Result<Vec<Unit>>;
    // 批量获取单元
    async fn get_units_by_ids(&self, ids: &[i64]) -> Result<Vec<Unit>>;

    /// 班级管理方法
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    async fn get_class_by_id(&self, id: i64) -> Result<Option<Class>>;
    async fn get_all_classes(&self, offset: i64) -> Result<Vec<Class>>;
    // 列出单元下的班级
    async fn get_classes_for_unit(&self, unit_id: i64) -> Result<Vec<Class>>;
    async fn get_classes_by_ids(&self, ids: &[i64]) -> Result<Vec<Class>>;

    /// 作业管理方法
    async fn create_assignment(&self, assignment: CreateAssignmentRequest) -> Result<Assignment>;
    async fn get_assignment_by_id(&self, id: i64) -> Result<Option<Assignment>>;
    async fn get_all_assignments(&self, offset: i64) -> Result<Vec<Assignment>>;
    // 列出班级下的作业
    async fn get_assignments_for_class(&self, class_id: i64) -> Result<Vec<Assignment>>;
    async fn get_assignments_by_ids(&self, ids: &[i64]) -> Result<Vec<Assignment>>;

    /// 测试用例管理方法
    async fn create_test(&self, test: CreateTestRequest) -> Result<Test>;
    async fn get_test_by_id(&self, id: i64) -> Result<Option<Test>>;
    async fn get_all_tests(&self, offset: i64) -> Result<Vec<Test>>;
    // 列出作业下的测试用例
    async fn get_tests_for_assignment(&self, assignment_id: i64) -> Result<Vec<Test>>;
    async fn get_tests_by_ids(&self, ids: &[i64]) -> Result<Vec<Test>>;

    /// 提交管理方法
    async fn create_submission(&self, submission: CreateSubmissionRequest) -> Result<Submission>;
    // 在同一事务中创建提交及其成绩
    async fn create_submission_with_result(
        &self,
        submission: CreateSubmissionRequest,
        score: f64,
    ) -> Result<(Submission, TestResult)>;
    async fn get_submission_by_id(&self, id: i64) -> Result<Option<Submission>>;
    async fn get_all_submissions(&self, offset: i64) -> Result<Vec<Submission>>;
    // 列出作业下的提交
    async fn get_submissions_for_assignment(&self, assignment_id: i64) -> Result<Vec<Submission>>;
    async fn get_submissions_by_ids(&self, ids: &[i64]) -> Result<Vec<Submission>>;

    /// 成绩管理方法
    async fn create_result(&self, result: CreateResultRequest) -> Result<TestResult>;
    async fn get_result_by_id(&self, id: i64) -> Result<Option<TestResult>>;
    async fn get_all_results(&self, offset: i64) -> Result<Vec<TestResult>>;
    // 获取提交对应的成绩
    async fn get_result_for_submission(&self, submission_id: i64) -> Result<Option<TestResult>>;
    async fn get_results_by_ids(&self, ids: &[i64]) -> Result<Vec<TestResult>>;
    // 批量获取多个提交的成绩
    async fn get_results_for_submissions(&self, submission_ids: &[i64]) -> Result<Vec<TestResult>>;

    /// 用户管理方法
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 系统方法
    // 清空并重建课程相关的六张表，返回新的存储句柄（用户表保留）
    async fn reset_store(&self) -> Result<Arc<dyn Storage>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
