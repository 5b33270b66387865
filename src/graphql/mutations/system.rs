use async_graphql::{Context, Object, Result};

use crate::graphql::context::{app, identity};
use crate::graphql::errors::GraphQLResultExt;
use crate::services::SystemService;

#[derive(Default)]
pub struct SystemMutation;

#[Object]
impl SystemMutation {
    /// 清空课程数据，仅管理员
    async fn reset_db(&self, ctx: &Context<'_>) -> Result<bool> {
        SystemService::reset_db(&app(ctx)?.store, identity(ctx))
            .await
            .gql()
    }
}
