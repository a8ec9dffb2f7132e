//! One module per page. Each command resolves its route through the guard,
//! drives client-core the way the page would, and renders the result.

pub mod auth;
pub mod dashboard;
pub mod groups;
pub mod members;

use crate::context::AppContext;
use crate::error::OshikatsuError;
use crate::render;

use client_core::navigation::Route;

use std::io::Write;

use log::info;

/// How a command ended, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Validation or server rejection; details were rendered.
    Rejected,
    /// A protected page was requested without a credential.
    LoginRequired,
}

impl Outcome {
    /// Exit code for failures that never reached a page.
    pub const FAILURE_CODE: u8 = 3;

    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Done => 0,
            Outcome::Rejected => 1,
            Outcome::LoginRequired => 2,
        }
    }
}

/// `Some(LoginRequired)` after telling the user to log in, `None` to proceed.
fn require_route(
    ctx: &AppContext,
    route: Route,
    out: &mut impl Write,
) -> Result<Option<Outcome>, OshikatsuError> {
    let resolved = ctx.guard(route);
    if resolved == route {
        return Ok(None);
    }

    info!("Route {} redirected to {}", route, resolved);
    render::login_required(out)?;
    Ok(Some(Outcome::LoginRequired))
}
