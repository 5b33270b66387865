use crate::config::AppConfig;
use crate::errors::Result;
use crate::graphql::{AppSchema, GraphQLContext, build_schema};
use crate::services::{AuthService, HttpTestExecutor};
use crate::storage::StoreHandle;
use std::sync::Arc;
use tracing::warn;

pub struct StartupContext {
    pub context: GraphQLContext,
    pub schema: AppSchema,
}

/// 准备服务器启动的上下文
/// 包括存储、测试执行客户端、认证服务和 GraphQL Schema
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized and migrations completed");

    let executor = HttpTestExecutor::new(&config.test_executor)?;
    warn!(
        "Test executor client ready, endpoint: {}",
        config.test_executor.endpoint
    );

    let context = GraphQLContext::new(
        Arc::new(StoreHandle::new(storage)),
        Arc::new(executor),
        Arc::new(AuthService::from_config(config)),
    );
    let schema = build_schema(context.clone());

    Ok(StartupContext { context, schema })
}
