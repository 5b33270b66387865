use async_graphql::{Context, Object, Result};

use crate::graphql::context::{app, identity, storage};
use crate::graphql::errors::GraphQLResultExt;
use crate::models::users::entities::UserRole;
use crate::services::auth::AuthOutcome;

#[derive(Default)]
pub struct AuthMutation;

/// 令牌同时写入 Cookie
fn set_token_cookie(ctx: &Context<'_>, outcome: &AuthOutcome) -> Result<()> {
    let cookie = app(ctx)?.auth.jwt().create_token_cookie(&outcome.token);
    ctx.append_http_header("Set-Cookie", cookie.to_string());
    Ok(())
}

#[Object]
impl AuthMutation {
    /// 注册用户并返回令牌
    ///
    /// 第一个账号默认为管理员，之后默认为导师；注册管理员需要已登录的管理员身份。
    async fn register(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        role: Option<UserRole>,
    ) -> Result<String> {
        let outcome = app(ctx)?
            .auth
            .register(storage(ctx)?, &email, &password, role, identity(ctx))
            .await
            .gql()?;
        set_token_cookie(ctx, &outcome)?;
        Ok(outcome.token)
    }

    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<String> {
        let outcome = app(ctx)?
            .auth
            .login(storage(ctx)?, &email, &password)
            .await
            .gql()?;
        set_token_cookie(ctx, &outcome)?;
        Ok(outcome.token)
    }
}
