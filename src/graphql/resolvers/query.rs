use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::{God, Pantheon};
use async_graphql::{Context, FieldResult, Object};

/// Root query object for GraphQL
pub struct Query;

/// Root Query
#[Object(rename_args = "snake_case")]
impl Query {
    /// A single god
    async fn god(&self, ctx: &Context<'_>, id: Option<i32>) -> FieldResult<Option<God>> {
        let context = ctx.data::<GraphQLContext>()?;
        let Some(id) = id else {
            return Ok(None);
        };

        match context.storage.get_god_by_id(id).await {
            Ok(god) => Ok(god.map(|g| g.into())),
            Err(e) => Err(e.into()),
        }
    }

    /// List of All Gods
    async fn gods(&self, ctx: &Context<'_>) -> FieldResult<Vec<God>> {
        let context = ctx.data::<GraphQLContext>()?;

        match context.storage.get_all_gods().await {
            Ok(gods) => Ok(gods.into_iter().map(|g| g.into()).collect()),
            Err(e) => Err(e.into()),
        }
    }

    /// List of All Pantheons
    async fn pantheons(&self, ctx: &Context<'_>) -> FieldResult<Vec<Pantheon>> {
        let context = ctx.data::<GraphQLContext>()?;

        match context.storage.get_all_pantheons().await {
            Ok(pantheons) => Ok(pantheons.into_iter().map(|p| p.into()).collect()),
            Err(e) => Err(e.into()),
        }
    }

    /// A Single Pantheon
    async fn pantheon(
        &self,
        ctx: &Context<'_>,
        pantheon_id: Option<i32>,
    ) -> FieldResult<Option<Pantheon>> {
        let context = ctx.data::<GraphQLContext>()?;
        let Some(pantheon_id) = pantheon_id else {
            return Ok(None);
        };

        match context.storage.get_pantheon_by_id(pantheon_id).await {
            Ok(pantheon) => Ok(pantheon.map(|p| p.into())),
            Err(e) => Err(e.into()),
        }
    }
}
