use async_graphql::{Error, ErrorExtensions};

use crate::errors::AutogradeError;

// 错误消息原样返回，extensions.code 为稳定的错误代码
impl ErrorExtensions for AutogradeError {
    fn extend(&self) -> Error {
        Error::new(self.message()).extend_with(|_, e| {
            e.set("code", self.graphql_code());
            e.set("errorCode", self.code());
        })
    }
}

/// 将业务结果转换为 GraphQL 结果
pub trait GraphQLResultExt<T> {
    fn gql(self) -> async_graphql::Result<T>;
}

impl<T> GraphQLResultExt<T> for crate::errors::Result<T> {
    fn gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| {
            if matches!(
                e,
                AutogradeError::DatabaseOperation(_)
                    | AutogradeError::DatabaseConnection(_)
                    | AutogradeError::Upstream(_)
            ) {
                tracing::error!("{}", e.format_simple());
            }
            e.extend()
        })
    }
}
