use async_graphql::{ComplexObject, Context, ID, InputObject, Result, SimpleObject};

use super::ClassNode;
use crate::graphql::context::storage;
use crate::graphql::errors::GraphQLResultExt;
use crate::models::units::entities::Unit;
use crate::services::lookup;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "Unit", complex)]
pub struct UnitNode {
    pub id: ID,
    pub name: String,
    #[graphql(skip)]
    pub key: i64,
}

impl From<Unit> for UnitNode {
    fn from(unit: Unit) -> Self {
        Self {
            id: ID::from(unit.id.to_string()),
            name: unit.name,
            key: unit.id,
        }
    }
}

#[ComplexObject]
impl UnitNode {
    async fn classes(&self, ctx: &Context<'_>) -> Result<Vec<ClassNode>> {
        let unit = lookup::unit(storage(ctx)?, self.key, true).await.gql()?;
        Ok(unit.classes.into_iter().map(ClassNode::from).collect())
    }
}

#[derive(InputObject, Debug)]
pub struct NewUnit {
    pub name: String,
}
