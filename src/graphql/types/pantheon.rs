use crate::domain::Pantheon as DomainPantheon;
use crate::graphql::schema::GraphQLContext;
use async_graphql::{Context, FieldResult, Object};

/// GraphQL representation of a Pantheon
#[derive(Clone)]
pub struct Pantheon {
    pub inner: DomainPantheon,
}

impl From<DomainPantheon> for Pantheon {
    fn from(pantheon: DomainPantheon) -> Self {
        Self { inner: pantheon }
    }
}

/// This represents a pantheon
#[Object(rename_fields = "snake_case")]
impl Pantheon {
    async fn pantheon_id(&self) -> i32 {
        self.inner.pantheon_id
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Gods whose pantheon_id matches this pantheon, in insertion order
    async fn gods(&self, ctx: &Context<'_>) -> FieldResult<Vec<super::god::God>> {
        let context = ctx.data::<GraphQLContext>()?;

        match context
            .storage
            .get_gods_by_pantheon_id(self.inner.pantheon_id)
            .await
        {
            Ok(gods) => Ok(gods.into_iter().map(|g| g.into()).collect()),
            Err(e) => Err(e.into()),
        }
    }
}
