use async_graphql::{Context, Object, Result};

use crate::graphql::context::{require_identity, storage};
use crate::graphql::errors::GraphQLResultExt;
use crate::graphql::types::{AssignmentNode, NewAssignment, id_arg};
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::services::lookup;
use crate::utils::require_non_empty;

#[derive(Default)]
pub struct AssignmentMutation;

#[Object]
impl AssignmentMutation {
    async fn create_assignment(
        &self,
        ctx: &Context<'_>,
        input: NewAssignment,
    ) -> Result<AssignmentNode> {
        let identity = require_identity(ctx)?;
        require_non_empty("name", &input.name).gql()?;
        let class_id = id_arg("classID", &input.class_id)?;
        let storage = storage(ctx)?;

        let class = lookup::class(storage, class_id).await.gql()?;
        let assignment = storage
            .create_assignment(CreateAssignmentRequest {
                name: input.name,
                due_date: input.due_date,
                class_id: class.id,
            })
            .await
            .gql()?;

        tracing::info!(
            "Assignment {} ({}) created in class {} by {}",
            assignment.name,
            assignment.id,
            class.id,
            identity.email
        );
        Ok(assignment.into())
    }
}
