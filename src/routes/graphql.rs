//! GraphQL 路由
//!
//! - `POST /query`：执行 GraphQL 请求，经过 Cookie 令牌认证
//! - `GET /`：GraphiQL 调试页面

use actix_web::{HttpRequest, HttpResponse, web};
use async_graphql::http::GraphiQLSource;
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::graphql::{AppSchema, GraphQLContext};
use crate::middlewares;

pub const QUERY_PATH: &str = "/query";

pub async fn graphql_handler(
    schema: web::Data<AppSchema>,
    context: web::Data<GraphQLContext>,
    request: HttpRequest,
    gql_request: GraphQLRequest,
) -> GraphQLResponse {
    let identity = middlewares::TokenAuth::extract_identity(&request);
    let prepared = context
        .prepare_request(gql_request.into_inner(), identity)
        .await;
    schema.execute(prepared).await.into()
}

pub async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(GraphiQLSource::build().endpoint(QUERY_PATH).finish())
}

// 配置路由
pub fn configure_graphql_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(graphiql)).service(
        web::scope(QUERY_PATH)
            .wrap(middlewares::TokenAuth)
            .route("", web::post().to(graphql_handler)),
    );
}
