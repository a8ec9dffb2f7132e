//! Text rendering of pages, lists and errors.

use client_core::navigation::{MEMBERS_PLACEHOLDER, dashboard_greeting, dashboard_menu};
use client_core::validation::ValidationErrors;
use client_core::workflow::display::{empty_list_hint, format_timestamp};
use client_core::workflow::{ErrorBanner, Modal, WorkflowState};

use models::{AuthUser, OshiGroup};

use std::io::{Result, Write};

const EMPTY_FIELD: &str = "-";

pub const LOGIN_REQUIRED_MESSAGE: &str =
    "ログインが必要です。`oshikatsu login --username <U> --password <P>` を実行してください";

pub fn banner(out: &mut impl Write, banner: &ErrorBanner) -> Result<()> {
    match banner.status {
        Some(status) if !status.is_network_failure() => {
            writeln!(out, "エラー: {} (HTTP {})", banner.message, status)
        }
        _ => writeln!(out, "エラー: {}", banner.message),
    }
}

pub fn validation(out: &mut impl Write, errors: &ValidationErrors) -> Result<()> {
    for (field, message) in &errors.field_errors {
        writeln!(out, "  {field}: {message}")?;
    }
    for message in &errors.form_errors {
        writeln!(out, "  {message}")?;
    }
    Ok(())
}

pub fn group(out: &mut impl Write, group: &OshiGroup) -> Result<()> {
    writeln!(out, "[{}] {}", group.id, group.group_name)?;
    writeln!(
        out,
        "    会社: {}",
        group.company.as_deref().unwrap_or(EMPTY_FIELD)
    )?;
    if let Some(description) = group.description.as_deref() {
        writeln!(out, "    説明: {description}")?;
    }
    writeln!(
        out,
        "    作成: {}  更新: {}",
        format_timestamp(&group.created_at),
        format_timestamp(&group.updated_at)
    )
}

/// The list surface: its error banner, or the groups, or the empty-state hint.
pub fn group_list(out: &mut impl Write, state: &WorkflowState) -> Result<()> {
    if let Some(error) = state.search_error() {
        return banner(out, error);
    }

    if let Some(hint) = empty_list_hint(state) {
        return writeln!(out, "{hint}");
    }

    for entry in state.groups() {
        group(out, entry)?;
    }
    Ok(())
}

pub fn group_list_json(out: &mut impl Write, groups: &[OshiGroup]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, groups)?;
    writeln!(out)
}

pub fn modal(out: &mut impl Write, modal: &Modal) -> Result<()> {
    writeln!(out, "{}", modal.title())?;
    if let Some(error) = &modal.error {
        banner(out, error)?;
    }

    let fields = [
        ("groupName", "グループ名", modal.form.group_name.as_str()),
        ("company", "会社", modal.form.company.as_str()),
        ("description", "説明", modal.form.description.as_str()),
    ];
    for (key, label, value) in fields {
        writeln!(out, "  {label}: {value}")?;
        if let Some(message) = modal.field_errors.get(key) {
            writeln!(out, "    ! {message}")?;
        }
    }
    Ok(())
}

pub fn dashboard(out: &mut impl Write, user: Option<&AuthUser>) -> Result<()> {
    writeln!(out, "{}", dashboard_greeting(user))?;
    for entry in dashboard_menu() {
        writeln!(out, "  - {} ({})", entry.label, entry.route)?;
    }
    Ok(())
}

pub fn members(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{MEMBERS_PLACEHOLDER}")
}

pub fn login_required(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{LOGIN_REQUIRED_MESSAGE}")
}
