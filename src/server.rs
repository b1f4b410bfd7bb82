use crate::error::Result;
use crate::graphql::schema::{create_schema, GraphQLSchema};
use crate::observability::metrics;
use crate::storage::Storage;

use async_graphql::http::{parse_query_string, GraphiQLSource};
use async_graphql::parser::{
    parse_query,
    types::{DocumentOperations, OperationType},
};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::RawQuery,
    http::{header, HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::get,
    Extension, Router,
};
use hyper::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

pub const GRAPHQL_PATH: &str = "/graphql";

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "pantheon-graphql",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GraphiQL IDE, served at the same path as the API
fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

fn wants_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map_or(false, |accept| accept.contains("text/html"))
}

/// The type of the operation a request will run, if it can be determined.
///
/// Multi-operation documents resolve through `operation_name`, or to their only
/// operation when no name is given.
fn operation_type(request: &async_graphql::Request) -> Option<OperationType> {
    let document = parse_query(&request.query).ok()?;
    match document.operations {
        DocumentOperations::Single(op) => Some(op.node.ty),
        DocumentOperations::Multiple(ops) => match request.operation_name.as_deref() {
            Some(name) => ops
                .iter()
                .find(|(op_name, _)| op_name.as_str() == name)
                .map(|(_, op)| op.node.ty),
            None if ops.len() == 1 => ops.values().next().map(|op| op.node.ty),
            None => None,
        },
    }
}

fn operation_label(ty: Option<OperationType>) -> &'static str {
    match ty {
        Some(OperationType::Mutation) => "mutation",
        Some(OperationType::Subscription) => "subscription",
        _ => "query",
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({ "errors": [{ "message": message }] })),
    )
        .into_response()
}

async fn execute(
    schema: &GraphQLSchema,
    request: async_graphql::Request,
    operation: &'static str,
) -> GraphQLResponse {
    let started = Instant::now();
    let response = schema.execute(request).await;
    let had_errors = response.is_err();
    metrics::graphql::request(operation, started.elapsed().as_secs_f64(), had_errors);

    if had_errors {
        debug!("GraphQL {} finished with errors: {:?}", operation, response.errors);
    }
    response.into()
}

/// GET: GraphiQL for browsers, otherwise run the query string.
///
/// Mutations are refused over GET with 405.
async fn graphql_get(
    Extension(schema): Extension<GraphQLSchema>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    if wants_html(&headers) {
        return graphiql().into_response();
    }

    let query = match query {
        Some(q) if !q.is_empty() => q,
        _ => return error_response(StatusCode::BAD_REQUEST, "Must provide query string."),
    };

    let request = match parse_query_string(&query) {
        Ok(request) => request,
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                &format!("Invalid GraphQL request: {}", e),
            )
        }
    };

    let ty = operation_type(&request);
    if ty == Some(OperationType::Mutation) {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, "POST")],
            Json(serde_json::json!({
                "errors": [{ "message": "Can only perform a mutation operation from a POST request." }]
            })),
        )
            .into_response();
    }

    execute(&schema, request, operation_label(ty))
        .await
        .into_response()
}

/// POST: GraphQL-over-HTTP JSON body
async fn graphql_post(
    Extension(schema): Extension<GraphQLSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = req.into_inner();
    let operation = operation_label(operation_type(&request));
    execute(&schema, request, operation).await
}

/// Create the HTTP server router around an existing schema
pub fn create_router(schema: GraphQLSchema) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route(GRAPHQL_PATH, get(graphql_get).post(graphql_post))
        .layer(Extension(schema))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Create the HTTP server with all routes for the given storage
pub fn create_server(storage: Arc<dyn Storage>) -> Router {
    create_router(create_schema(storage))
}

/// Start the HTTP server on the given address
pub async fn start_server(storage: Arc<dyn Storage>, addr: SocketAddr) -> Result<()> {
    let app = create_server(storage);

    info!("HTTP server running on http://{}", addr);
    info!("GraphQL + GraphiQL: http://{}{}", addr, GRAPHQL_PATH);
    info!("Health check: http://{}/health", addr);

    Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_wants_html() {
        let mut headers = HeaderMap::new();
        assert!(!wants_html(&headers));

        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        assert!(!wants_html(&headers));

        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        assert!(wants_html(&headers));
    }

    #[test]
    fn test_operation_type_from_parsed_document() {
        let commented = async_graphql::Request::new(
            "# add one\nmutation { addPantheon(name: \"Aesir\") { pantheon_id } }",
        );
        assert_eq!(operation_type(&commented), Some(OperationType::Mutation));

        let fragment_first = async_graphql::Request::new(
            "fragment F on God { id } query { gods { ...F } }",
        );
        assert_eq!(operation_type(&fragment_first), Some(OperationType::Query));

        let doc = "query Read { gods { id } } mutation Write { addPantheon(name: \"Vanir\") { name } }";
        let read = async_graphql::Request::new(doc).operation_name("Read");
        let write = async_graphql::Request::new(doc).operation_name("Write");
        assert_eq!(operation_type(&read), Some(OperationType::Query));
        assert_eq!(operation_type(&write), Some(OperationType::Mutation));
        assert_eq!(operation_type(&async_graphql::Request::new(doc)), None);

        assert_eq!(operation_type(&async_graphql::Request::new("{ gods")), None);
    }

    #[test]
    fn test_operation_label() {
        assert_eq!(operation_label(Some(OperationType::Mutation)), "mutation");
        assert_eq!(operation_label(Some(OperationType::Query)), "query");
        assert_eq!(operation_label(None), "query");
    }

    #[test]
    fn test_graphiql_points_at_api_path() {
        let Html(body) = graphiql();
        assert!(body.contains(GRAPHQL_PATH));
    }
}
