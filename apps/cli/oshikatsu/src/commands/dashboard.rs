use super::{Outcome, require_route};

use crate::context::AppContext;
use crate::error::OshikatsuError;
use crate::render;

use client_core::navigation::Route;

use std::io::Write;

/// The user is only known right after login; later runs greet anonymously.
pub fn show(ctx: &AppContext, out: &mut impl Write) -> Result<Outcome, OshikatsuError> {
    if let Some(outcome) = require_route(ctx, Route::Dashboard, out)? {
        return Ok(outcome);
    }

    render::dashboard(out, None)?;
    Ok(Outcome::Done)
}
