//! GraphQL 接口层
//!
//! 查询无需登录；除 register/login 外的所有 mutation 都要求已认证身份。

pub mod context;
pub mod errors;
pub mod loaders;
mod mutations;
mod queries;
pub mod schema;
pub mod types;

pub use context::GraphQLContext;
pub use schema::{AppSchema, build_schema};
