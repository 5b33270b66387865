use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, HashMapCache};
use async_graphql::{Context, Request, Result};

use super::errors::GraphQLResultExt;
use super::loaders::{StoreDataLoader, StoreLoader};
use crate::errors::AutogradeError;
use crate::models::users::entities::Identity;
use crate::services::{AuthService, TestExecutor};
use crate::storage::{Storage, StoreHandle};

/// Schema 级共享数据
#[derive(Clone)]
pub struct GraphQLContext {
    pub store: Arc<StoreHandle>,
    pub executor: Arc<dyn TestExecutor>,
    pub auth: Arc<AuthService>,
}

/// 请求开始时的存储快照
#[derive(Clone)]
pub struct RequestStorage(pub Arc<dyn Storage>);

impl GraphQLContext {
    pub fn new(
        store: Arc<StoreHandle>,
        executor: Arc<dyn TestExecutor>,
        auth: Arc<AuthService>,
    ) -> Self {
        Self {
            store,
            executor,
            auth,
        }
    }

    /// 为单个请求附加存储快照、批量加载器与身份
    pub async fn prepare_request(&self, request: Request, identity: Option<Identity>) -> Request {
        let storage = self.store.current().await;
        let loader = DataLoader::with_cache(
            StoreLoader::new(storage.clone()),
            tokio::spawn,
            HashMapCache::default(),
        );

        let request = request.data(RequestStorage(storage)).data(loader);
        match identity {
            Some(identity) => request.data(identity),
            None => request,
        }
    }
}

pub(crate) fn app<'a>(ctx: &Context<'a>) -> Result<&'a GraphQLContext> {
    ctx.data::<GraphQLContext>()
}

pub(crate) fn storage<'a>(ctx: &Context<'a>) -> Result<&'a dyn Storage> {
    Ok(ctx.data::<RequestStorage>()?.0.as_ref())
}

pub(crate) fn loader<'a>(ctx: &Context<'a>) -> Result<&'a StoreDataLoader> {
    ctx.data::<StoreDataLoader>()
}

pub(crate) fn identity<'a>(ctx: &Context<'a>) -> Option<&'a Identity> {
    ctx.data_opt::<Identity>()
}

/// 写操作前调用
pub(crate) fn require_identity<'a>(ctx: &Context<'a>) -> Result<&'a Identity> {
    identity(ctx)
        .ok_or_else(|| AutogradeError::authentication("user not authenticated"))
        .gql()
}
