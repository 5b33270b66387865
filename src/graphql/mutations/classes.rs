use async_graphql::{Context, Object, Result};

use crate::graphql::context::{require_identity, storage};
use crate::graphql::errors::GraphQLResultExt;
use crate::graphql::types::{ClassNode, NewClass, id_arg};
use crate::models::classes::requests::CreateClassRequest;
use crate::services::lookup;
use crate::utils::require_non_empty;

#[derive(Default)]
pub struct ClassMutation;

#[Object]
impl ClassMutation {
    async fn create_class(&self, ctx: &Context<'_>, input: NewClass) -> Result<ClassNode> {
        let identity = require_identity(ctx)?;
        require_non_empty("name", &input.name).gql()?;
        let unit_id = id_arg("unitID", &input.unit_id)?;
        let storage = storage(ctx)?;

        let unit = lookup::unit(storage, unit_id, false).await.gql()?;
        let class = storage
            .create_class(CreateClassRequest {
                name: input.name,
                unit_id: unit.id,
            })
            .await
            .gql()?;

        tracing::info!(
            "Class {} ({}) created in unit {} by {}",
            class.name,
            class.id,
            unit.name,
            identity.email
        );
        Ok(class.into())
    }
}
