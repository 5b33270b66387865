use async_graphql::{ComplexObject, Context, ID, InputObject, Result, SimpleObject};

use super::{AssignmentNode, UnitNode};
use crate::graphql::context::storage;
use crate::graphql::errors::GraphQLResultExt;
use crate::graphql::loaders::{load_class, load_unit};
use crate::models::classes::entities::Class;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Class", complex)]
pub struct ClassNode {
    pub id: ID,
    pub name: String,
    #[graphql(skip)]
    pub key: i64,
}

impl From<Class> for ClassNode {
    fn from(class: Class) -> Self {
        Self {
            id: ID::from(class.id.to_string()),
            name: class.name,
            key: class.id,
        }
    }
}

#[ComplexObject]
impl ClassNode {
    async fn unit(&self, ctx: &Context<'_>) -> Result<UnitNode> {
        let class = load_class(ctx, self.key).await?;
        Ok(load_unit(ctx, class.unit_id).await?.into())
    }

    async fn assignments(&self, ctx: &Context<'_>) -> Result<Vec<AssignmentNode>> {
        let class = load_class(ctx, self.key).await?;
        let assignments = storage(ctx)?
            .get_assignments_for_class(class.id)
            .await
            .gql()?;
        Ok(assignments.into_iter().map(AssignmentNode::from).collect())
    }
}

#[derive(InputObject, Debug)]
pub struct NewClass {
    pub name: String,
    #[graphql(name = "unitID")]
    pub unit_id: ID,
}
