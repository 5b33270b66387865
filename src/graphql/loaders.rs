//! 按请求缓存的批量加载器
//!
//! 关系字段的回查都经由这里，同一请求内每个键只访问一次存储。

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, HashMapCache, Loader};
use async_graphql::{Context, ErrorExtensions};

use super::context::loader;
use super::errors::GraphQLResultExt;
use crate::errors::AutogradeError;
use crate::models::{
    assignments::entities::Assignment, classes::entities::Class, results::entities::TestResult,
    submissions::entities::Submission, tests::entities::Test, units::entities::Unit,
};
use crate::services::lookup::{entity, found};
use crate::storage::Storage;

pub type StoreDataLoader = DataLoader<StoreLoader, HashMapCache>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitKey(pub i64);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassKey(pub i64);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssignmentKey(pub i64);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TestKey(pub i64);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionKey(pub i64);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultKey(pub i64);
/// 按提交 ID 查成绩
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResultBySubmissionKey(pub i64);

pub struct StoreLoader {
    storage: Arc<dyn Storage>,
}

impl StoreLoader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

/// 生成按主键批量加载的 Loader 实现
macro_rules! impl_id_loader {
    ($($key:ident => $value:ty, $fetch:ident);* $(;)?) => {
        $(
            impl Loader<$key> for StoreLoader {
                type Value = $value;
                type Error = AutogradeError;

                async fn load(&self, keys: &[$key]) -> Result<HashMap<$key, $value>, Self::Error> {
                    let ids: Vec<i64> = keys.iter().map(|k| k.0).collect();
                    let records = self.storage.$fetch(&ids).await?;
                    Ok(records.into_iter().map(|r| ($key(r.id), r)).collect())
                }
            }
        )*
    };
}

impl_id_loader! {
    UnitKey => Unit, get_units_by_ids;
    ClassKey => Class, get_classes_by_ids;
    AssignmentKey => Assignment, get_assignments_by_ids;
    TestKey => Test, get_tests_by_ids;
    SubmissionKey => Submission, get_submissions_by_ids;
    ResultKey => TestResult, get_results_by_ids;
}

impl Loader<ResultBySubmissionKey> for StoreLoader {
    type Value = TestResult;
    type Error = AutogradeError;

    async fn load(
        &self,
        keys: &[ResultBySubmissionKey],
    ) -> Result<HashMap<ResultBySubmissionKey, TestResult>, Self::Error> {
        let ids: Vec<i64> = keys.iter().map(|k| k.0).collect();
        let results = self.storage.get_results_for_submissions(&ids).await?;
        Ok(results
            .into_iter()
            .map(|r| (ResultBySubmissionKey(r.submission_id), r))
            .collect())
    }
}

// 经加载器的实体获取，不存在时为 NotFound
pub(crate) async fn load_unit(ctx: &Context<'_>, id: i64) -> async_graphql::Result<Unit> {
    let record = loader(ctx)?.load_one(UnitKey(id)).await.gql()?;
    found(record, entity::UNIT).gql()
}

pub(crate) async fn load_class(ctx: &Context<'_>, id: i64) -> async_graphql::Result<Class> {
    let record = loader(ctx)?.load_one(ClassKey(id)).await.gql()?;
    found(record, entity::CLASS).gql()
}

pub(crate) async fn load_assignment(
    ctx: &Context<'_>,
    id: i64,
) -> async_graphql::Result<Assignment> {
    let record = loader(ctx)?.load_one(AssignmentKey(id)).await.gql()?;
    found(record, entity::ASSIGNMENT).gql()
}

pub(crate) async fn load_test(ctx: &Context<'_>, id: i64) -> async_graphql::Result<Test> {
    let record = loader(ctx)?.load_one(TestKey(id)).await.gql()?;
    found(record, entity::TEST).gql()
}

pub(crate) async fn load_submission(
    ctx: &Context<'_>,
    id: i64,
) -> async_graphql::Result<Submission> {
    let record = loader(ctx)?.load_one(SubmissionKey(id)).await.gql()?;
    found(record, entity::SUBMISSION).gql()
}

pub(crate) async fn load_result(ctx: &Context<'_>, id: i64) -> async_graphql::Result<TestResult> {
    let record = loader(ctx)?.load_one(ResultKey(id)).await.gql()?;
    found(record, entity::RESULT).gql()
}

/// 顶层单条查询使用：记录不存在时只把该字段置为 null，错误写入响应的 errors
pub(crate) async fn find_one<K>(
    ctx: &Context<'_>,
    key: K,
    entity: &str,
) -> async_graphql::Result<Option<<StoreLoader as Loader<K>>::Value>>
where
    K: Send + Sync + Hash + Eq + Clone + 'static,
    StoreLoader: Loader<K, Error = AutogradeError>,
{
    let record = loader(ctx)?.load_one(key).await.gql()?;
    if record.is_none() {
        ctx.add_error(
            AutogradeError::entity_not_found(entity)
                .extend()
                .into_server_error(ctx.item.pos),
        );
    }
    Ok(record)
}

/// 提交尚未评分时返回 None
pub(crate) async fn load_result_for_submission(
    ctx: &Context<'_>,
    submission_id: i64,
) -> async_graphql::Result<Option<TestResult>> {
    loader(ctx)?
        .load_one(ResultBySubmissionKey(submission_id))
        .await
        .gql()
}
