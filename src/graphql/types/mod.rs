//! GraphQL 响应节点
//!
//! 节点只携带自身字段，关系字段按 ID 经加载器回查。

mod assignment;
mod class;
mod result;
mod submission;
mod unit;
mod user;

pub use assignment::{AssignmentNode, NewAssignment};
pub use class::{ClassNode, NewClass};
pub use result::{NewResult, ResultNode};
pub use submission::{NewSubmission, SubmissionNode};
pub use test::{NewTest, TestNode};
pub use unit::{NewUnit, UnitNode};
pub use user::UserNode;

use async_graphql::ID;

use crate::utils::parse_id;

/// 解析 GraphQL ID 参数
pub(crate) fn id_arg(field: &str, id: &ID) -> async_graphql::Result<i64> {
    use crate::graphql::errors::GraphQLResultExt;
    parse_id(field, id.as_str()).gql()
}
