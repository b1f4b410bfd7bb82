use crate::graphql::schema::GraphQLContext;
use crate::graphql::types::{God, Pantheon};
use crate::observability::metrics;
use async_graphql::{Context, FieldResult, Object};

/// Root mutation object for GraphQL
pub struct Mutation;

/// Root Mutation
#[Object(rename_args = "snake_case")]
impl Mutation {
    /// Add a God
    async fn add_god(
        &self,
        ctx: &Context<'_>,
        name: String,
        pantheon_id: i32,
    ) -> FieldResult<God> {
        let context = ctx.data::<GraphQLContext>()?;

        // pantheon_id may reference a pantheon that does not exist
        let god = context
            .storage
            .create_god(&name, pantheon_id)
            .await
            .map_err(|e| async_graphql::Error::new(format!("Failed to add god: {}", e)))?;

        metrics::store::god_created(god.id as usize);
        tracing::info!("Added god: {} (ID: {}, pantheon: {})", god.name, god.id, god.pantheon_id);
        Ok(god.into())
    }

    /// Add a Pantheon
    async fn add_pantheon(&self, ctx: &Context<'_>, name: String) -> FieldResult<Pantheon> {
        let context = ctx.data::<GraphQLContext>()?;

        let pantheon = context
            .storage
            .create_pantheon(&name)
            .await
            .map_err(|e| async_graphql::Error::new(format!("Failed to add pantheon: {}", e)))?;

        metrics::store::pantheon_created(pantheon.pantheon_id as usize);
        tracing::info!("Added pantheon: {} (ID: {})", pantheon.name, pantheon.pantheon_id);
        Ok(pantheon.into())
    }
}
