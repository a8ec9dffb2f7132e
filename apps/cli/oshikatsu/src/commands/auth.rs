use super::Outcome;

use crate::cli::{LoginArgs, RegisterArgs};
use crate::context::AppContext;
use crate::error::OshikatsuError;
use crate::render;

use client_core::error::AuthError;
use client_core::validation::{LoginForm, RegisterForm};
use client_core::workflow::ErrorBanner;
use client_core::workflow::banner::CHECK_INPUT_MESSAGE;

use models::AuthUser;

use std::io::Write;

pub async fn login(
    ctx: &AppContext,
    args: &LoginArgs,
    out: &mut impl Write,
) -> Result<Outcome, OshikatsuError> {
    let form = LoginForm {
        username: args.username.clone(),
        password: args.password.clone(),
    };

    let mut session = ctx.session();
    let result = session.login(&form).await;
    signed_in(result, "ログインしました", out)
}

pub async fn register(
    ctx: &AppContext,
    args: &RegisterArgs,
    out: &mut impl Write,
) -> Result<Outcome, OshikatsuError> {
    let form = RegisterForm {
        username: args.username.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
    };

    let mut session = ctx.session();
    let result = session.register(&form).await;
    signed_in(result, "登録しました", out)
}

pub fn logout(ctx: &AppContext, out: &mut impl Write) -> Result<Outcome, OshikatsuError> {
    ctx.session().logout();
    writeln!(out, "ログアウトしました")?;
    Ok(Outcome::Done)
}

fn signed_in(
    result: Result<&AuthUser, AuthError>,
    headline: &str,
    out: &mut impl Write,
) -> Result<Outcome, OshikatsuError> {
    match result {
        Ok(user) => {
            writeln!(out, "{headline}")?;
            render::dashboard(out, Some(user))?;
            Ok(Outcome::Done)
        }
        Err(AuthError::Validation(errors)) => {
            writeln!(out, "{CHECK_INPUT_MESSAGE}")?;
            render::validation(out, &errors)?;
            Ok(Outcome::Rejected)
        }
        Err(AuthError::Api(error)) => {
            render::banner(out, &ErrorBanner::from_api(&error))?;
            Ok(Outcome::Rejected)
        }
    }
}
