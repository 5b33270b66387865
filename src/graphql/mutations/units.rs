use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::errors::AutogradeError;
use crate::graphql::context::{require_identity, storage};
use crate::graphql::errors::GraphQLResultExt;
use crate::graphql::types::{NewUnit, UnitNode};
use crate::models::units::requests::CreateUnitRequest;
use crate::utils::require_non_empty;

#[derive(Default)]
pub struct UnitMutation;

#[Object]
impl UnitMutation {
    async fn create_unit(&self, ctx: &Context<'_>, input: NewUnit) -> Result<UnitNode> {
        let identity = require_identity(ctx)?;
        require_non_empty("name", &input.name).gql()?;
        let storage = storage(ctx)?;

        // 单元名唯一
        if storage.get_unit_by_name(&input.name).await.gql()?.is_some() {
            return Err(AutogradeError::already_exists("unit already exists").extend());
        }

        let unit = storage
            .create_unit(CreateUnitRequest { name: input.name })
            .await
            .gql()?;

        tracing::info!("Unit {} ({}) created by {}", unit.name, unit.id, identity.email);
        Ok(unit.into())
    }
}
