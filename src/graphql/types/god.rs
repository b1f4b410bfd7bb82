use crate::domain::God as DomainGod;
use crate::graphql::schema::GraphQLContext;
use async_graphql::{Context, FieldResult, Object};

/// GraphQL representation of a God
#[derive(Clone)]
pub struct God {
    pub inner: DomainGod,
}

impl From<DomainGod> for God {
    fn from(god: DomainGod) -> Self {
        Self { inner: god }
    }
}

/// This represents a god
#[Object(rename_fields = "snake_case")]
impl God {
    async fn id(&self) -> i32 {
        self.inner.id
    }

    async fn name(&self) -> &str {
        &self.inner.name
    }

    async fn pantheon_id(&self) -> i32 {
        self.inner.pantheon_id
    }

    /// The pantheon this god belongs to; null when the reference dangles
    async fn pantheon(&self, ctx: &Context<'_>) -> FieldResult<Option<super::pantheon::Pantheon>> {
        let context = ctx.data::<GraphQLContext>()?;

        match context.storage.get_pantheon_by_id(self.inner.pantheon_id).await {
            Ok(pantheon) => Ok(pantheon.map(|p| p.into())),
            Err(e) => Err(e.into()),
        }
    }
}
