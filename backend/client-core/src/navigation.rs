//! Route table and the authentication guard.

use crate::token_store::CredentialProvider;

use models::AuthUser;

use std::fmt;

pub const MEMBERS_PLACEHOLDER: &str = "推しメンバー管理機能は準備中です";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    OshiGroups,
    OshiMembers,
}

impl Route {
    /// Unknown paths fall back to the dashboard.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = trimmed.trim_end_matches('/');

        match trimmed {
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/oshi-groups" => Route::OshiGroups,
            "/oshi-members" => Route::OshiMembers,
            _ => Route::Dashboard,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
            Route::OshiGroups => "/oshi-groups",
            Route::OshiMembers => "/oshi-members",
        }
    }

    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login | Route::Register)
    }

    /// Where a request for this route actually lands.
    pub fn guard(self, credentials: &dyn CredentialProvider) -> Route {
        if self.requires_auth() && credentials.get().is_none() {
            Route::Login
        } else {
            self
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub route: Route,
    pub available: bool,
}

/// Dashboard menu in display order.
pub fn dashboard_menu() -> [MenuEntry; 2] {
    [
        MenuEntry {
            label: "推しグループ管理",
            route: Route::OshiGroups,
            available: true,
        },
        MenuEntry {
            label: "推しメンバー管理 (準備中)",
            route: Route::OshiMembers,
            available: false,
        },
    ]
}

/// Greeting line for the dashboard. The user is unknown after a restart.
pub fn dashboard_greeting(user: Option<&AuthUser>) -> String {
    match user {
        Some(user) => format!("ようこそ、{}さん", user.username),
        None => String::from("ようこそ"),
    }
}
