//! 按 ID 获取实体，不存在时统一返回 `NotFound("<entity> not found")`

use crate::errors::{AutogradeError, Result};
use crate::models::{
    assignments::entities::Assignment, classes::entities::Class, results::entities::TestResult,
    submissions::entities::Submission, tests::entities::Test, units::entities::Unit,
};
use crate::storage::Storage;

/// 实体名，用于错误消息
pub mod entity {
    pub const UNIT: &str = "unit";
    pub const CLASS: &str = "class";
    pub const ASSIGNMENT: &str = "assignment";
    pub const TEST: &str = "test";
    pub const SUBMISSION: &str = "submission";
    pub const RESULT: &str = "result";
}

/// 将缺失的记录转换为 NotFound
pub fn found<T>(record: Option<T>, entity: &str) -> Result<T> {
    record.ok_or_else(|| AutogradeError::entity_not_found(entity))
}

pub async fn unit(storage: &dyn Storage, id: i64, fetch_classes: bool) -> Result<Unit> {
    found(storage.get_unit_by_id(id, fetch_classes).await?, entity::UNIT)
}

pub async fn class(storage: &dyn Storage, id: i64) -> Result<Class> {
    found(storage.get_class_by_id(id).await?, entity::CLASS)
}

pub async fn assignment(storage: &dyn Storage, id: i64) -> Result<Assignment> {
    found(storage.get_assignment_by_id(id).await?, entity::ASSIGNMENT)
}

pub async fn test(storage: &dyn Storage, id: i64) -> Result<Test> {
    found(storage.get_test_by_id(id).await?, entity::TEST)
}

pub async fn submission(storage: &dyn Storage, id: i64) -> Result<Submission> {
    found(storage.get_submission_by_id(id).await?, entity::SUBMISSION)
}

pub async fn result(storage: &dyn Storage, id: i64) -> Result<TestResult> {
    found(storage.get_result_by_id(id).await?, entity::RESULT)
}
