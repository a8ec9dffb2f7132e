use super::{Outcome, require_route};

use crate::context::AppContext;
use crate::error::OshikatsuError;
use crate::render;

use client_core::navigation::Route;

use std::io::Write;

pub fn show(ctx: &AppContext, out: &mut impl Write) -> Result<Outcome, OshikatsuError> {
    if let Some(outcome) = require_route(ctx, Route::OshiMembers, out)? {
        return Ok(outcome);
    }

    render::members(out)?;
    Ok(Outcome::Done)
}
