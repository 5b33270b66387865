/*!
 * Cookie 令牌认证中间件
 *
 * 读取 `token` Cookie 并校验 HS256 签名，按 subject（邮箱）查出用户，
 * 以存储中的角色构造 [`Identity`] 写入请求扩展。
 *
 * - 没有 Cookie：按未登录继续处理
 * - 签名无效或已过期：返回 401
 * - subject 对应的用户不存在（例如数据库被重置）：按未登录继续处理
 *
 * ```rust,ignore
 * App::new()
 *     .app_data(web::Data::new(graphql_context))
 *     .wrap(TokenAuth)
 *     .service(routes::graphql::configure)
 * ```
 */

use crate::errors::AutogradeError;
use crate::graphql::GraphQLContext;
use crate::models::users::entities::Identity;
use crate::models::{ApiResponse, ErrorCode};
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct TokenAuth;

// 辅助函数：创建错误响应
fn create_error_response(status: StatusCode, code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .json(ApiResponse::<()>::error_empty(code, message))
}

// 辅助函数：解析 Cookie 中的令牌
async fn resolve_identity(req: &ServiceRequest) -> Result<Option<Identity>, AutogradeError> {
    let context = req
        .app_data::<web::Data<GraphQLContext>>()
        .ok_or_else(|| AutogradeError::configuration("GraphQL context not found in app data"))?;

    let Some(token) = context.auth.jwt().extract_token_from_cookie(req) else {
        return Ok(None);
    };

    let storage = context.store.current().await;
    context.auth.identify(storage.as_ref(), &token).await
}

impl<S, B> Transform<S, ServiceRequest> for TokenAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TokenAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct TokenAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TokenAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            match resolve_identity(&req).await {
                Ok(identity) => {
                    if let Some(identity) = identity {
                        debug!("Token authentication successful for {}", identity.email);
                        req.extensions_mut().insert(identity);
                    }
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(AutogradeError::Authentication(err)) => {
                    info!("Token rejected for request to {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Invalid token",
                        )
                        .map_into_right_body(),
                    ))
                }
                Err(err) => {
                    error!("Token authentication failed: {}", err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            ErrorCode::InternalServerError,
                            "Authentication unavailable",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl TokenAuth {
    /// 从请求扩展中提取身份
    pub fn extract_identity(req: &actix_web::HttpRequest) -> Option<Identity> {
        req.extensions().get::<Identity>().cloned()
    }
}
