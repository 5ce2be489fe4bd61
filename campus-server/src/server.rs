use std::sync::Arc;

use anyhow::Result;
use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::State;
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::Router;
use sea_orm_migration::MigratorTrait;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use campus::database::migrations::Migrator;
use campus::database::{establish_connection, get_database_url};
use campus::permissions::AllowAll;

use crate::graphql::context::GraphQLContext;
use crate::graphql::schema::{build_schema, AppSchema};

pub async fn start_server(port: u16, database_path: &str, cors_origin: Option<&str>) -> Result<()> {
    let db = establish_connection(&get_database_url(Some(database_path))).await?;
    Migrator::up(&db, None).await?;

    let context = GraphQLContext::new(db, Arc::new(AllowAll));
    let schema = build_schema(context);

    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    let app = Router::new()
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .layer(cors)
        .with_state(schema);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("GraphQL API listening on http://localhost:{}/graphql", port);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn graphql_handler(State(schema): State<AppSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
