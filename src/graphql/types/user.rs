use async_graphql::{ID, SimpleObject};

use crate::models::users::entities::{Identity, UserRole};

/// 当前登录用户
#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "User")]
pub struct UserNode {
    pub id: ID,
    pub email: String,
    pub role: UserRole,
}

impl From<&Identity> for UserNode {
    fn from(identity: &Identity) -> Self {
        Self {
            id: ID::from(identity.user_id.to_string()),
            email: identity.email.clone(),
            role: identity.role,
        }
    }
}
