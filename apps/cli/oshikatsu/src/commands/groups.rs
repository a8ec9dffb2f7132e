//! The oshi group page, one command per user journey.

use super::{Outcome, require_route};

use crate::cli::{GroupFieldArgs, SearchArgs};
use crate::context::AppContext;
use crate::error::OshikatsuError;
use crate::render;

use client_core::api::OshiGroupApi;
use client_core::error::WorkflowError;
use client_core::navigation::Route;
use client_core::validation::OshiGroupForm;
use client_core::workflow::GroupPage;

use models::GroupId;

use std::io::Write;

use log::debug;

/// Output options shared by the group commands.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFormat {
    pub json: bool,
}

pub async fn search(
    ctx: &AppContext,
    args: &SearchArgs,
    format: ListFormat,
    out: &mut impl Write,
) -> Result<Outcome, OshikatsuError> {
    if let Some(outcome) = require_route(ctx, Route::OshiGroups, out)? {
        return Ok(outcome);
    }

    let mut page = ctx.group_page();
    run_search(&mut page, args).await?;
    show_list(&page, format, out)?;

    Ok(if page.state().search_error().is_some() {
        Outcome::Rejected
    } else {
        Outcome::Done
    })
}

/// Optional search first (to set the refetch criteria), then the create modal.
pub async fn create(
    ctx: &AppContext,
    search: &SearchArgs,
    fields: &GroupFieldArgs,
    format: ListFormat,
    out: &mut impl Write,
) -> Result<Outcome, OshikatsuError> {
    if let Some(outcome) = require_route(ctx, Route::OshiGroups, out)? {
        return Ok(outcome);
    }

    let mut page = ctx.group_page();
    *page.search_form_mut() = search.to_form();

    if !search.query.trim().is_empty() {
        page.search().await?;
        if let Some(error) = page.state().search_error() {
            render::banner(out, error)?;
            return Ok(Outcome::Rejected);
        }
    }

    page.open_create()?;
    if let Some(form) = page.form_mut() {
        apply_fields(form, fields);
    }

    submit(&mut page, format, out).await
}

/// Search, open the listed group `id`, apply the given fields, save.
pub async fn edit(
    ctx: &AppContext,
    id: GroupId,
    search: &SearchArgs,
    fields: &GroupFieldArgs,
    format: ListFormat,
    out: &mut impl Write,
) -> Result<Outcome, OshikatsuError> {
    if let Some(outcome) = require_route(ctx, Route::OshiGroups, out)? {
        return Ok(outcome);
    }

    let mut page = ctx.group_page();
    run_search(&mut page, search).await?;
    if let Some(error) = page.state().search_error() {
        render::banner(out, error)?;
        return Ok(Outcome::Rejected);
    }

    match page.open_edit(id) {
        Ok(()) => {}
        Err(WorkflowError::UnknownGroup { group_id, .. }) => {
            writeln!(out, "ID {group_id} のグループは検索結果にありません")?;
            return Ok(Outcome::Rejected);
        }
        Err(e) => return Err(e.into()),
    }

    if let Some(form) = page.form_mut() {
        apply_fields(form, fields);
    }

    submit(&mut page, format, out).await
}

/// Given values replace the form's; absent ones keep the pre-filled value.
pub fn apply_fields(form: &mut OshiGroupForm, fields: &GroupFieldArgs) {
    if let Some(group_name) = &fields.group_name {
        form.group_name = group_name.clone();
    }
    if let Some(company) = &fields.company {
        form.company = company.clone();
    }
    if let Some(description) = &fields.description {
        form.description = description.clone();
    }
}

async fn run_search<A: OshiGroupApi>(
    page: &mut GroupPage<A>,
    args: &SearchArgs,
) -> Result<(), OshikatsuError> {
    *page.search_form_mut() = args.to_form();
    debug!("Searching with {:?}", page.state().search_form);
    page.search().await?;
    Ok(())
}

async fn submit<A: OshiGroupApi>(
    page: &mut GroupPage<A>,
    format: ListFormat,
    out: &mut impl Write,
) -> Result<Outcome, OshikatsuError> {
    page.submit().await?;

    if let Some(modal) = page.state().modal() {
        render::modal(out, modal)?;
        return Ok(Outcome::Rejected);
    }

    if !format.json {
        writeln!(out, "保存しました")?;
    }
    show_list(page, format, out)?;

    if page.state().search_error().is_some() {
        return Ok(Outcome::Rejected);
    }
    Ok(Outcome::Done)
}

fn show_list<A: OshiGroupApi>(
    page: &GroupPage<A>,
    format: ListFormat,
    out: &mut impl Write,
) -> Result<(), OshikatsuError> {
    if format.json && page.state().search_error().is_none() {
        render::group_list_json(out, page.state().groups())?;
    } else {
        render::group_list(out, page.state())?;
    }
    Ok(())
}
