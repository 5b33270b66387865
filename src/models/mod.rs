//! 业务数据模型
//!
//! 与 `entity` 中的数据库模型分离，存储层返回这些类型，GraphQL 层再转换为响应节点。

pub mod assignments;
pub mod classes;
pub mod common;
pub mod results;
pub mod submissions;
pub mod tests;
pub mod units;
pub mod users;

pub use common::*;
