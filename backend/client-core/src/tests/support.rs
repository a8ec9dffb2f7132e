//! In-memory fakes for the API traits.

use crate::api::{AuthApi, OshiGroupApi};
use crate::error::ApiError;

use models::{
    AuthResponse, CreateOshiGroupRequest, GroupId, LoginRequest, OshiGroup, RegisterRequest,
    UpdateOshiGroupRequest,
};

use std::sync::Mutex;

pub const TEST_TIMESTAMP: &str = "2024-01-15T10:30:00";

pub fn group(id: GroupId, name: &str, company: Option<&str>) -> OshiGroup {
    OshiGroup {
        id,
        user_id: 1,
        group_name: name.to_string(),
        company: company.map(str::to_string),
        description: None,
        created_at: TEST_TIMESTAMP.to_string(),
        updated_at: TEST_TIMESTAMP.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListByGroupName {
        full: bool,
        fuzzy: bool,
        query: String,
    },
    ListByCompany(String),
    Create(CreateOshiGroupRequest),
    Update(UpdateOshiGroupRequest),
}

/// Group backend over a vector. Full match is equality, fuzzy and company
/// are substring matches.
#[derive(Default)]
pub struct FakeGroupApi {
    groups: Mutex<Vec<OshiGroup>>,
    calls: Mutex<Vec<Call>>,
    list_error: Mutex<Option<ApiError>>,
    write_error: Mutex<Option<ApiError>>,
}

impl FakeGroupApi {
    pub fn with_groups(groups: Vec<OshiGroup>) -> Self {
        Self {
            groups: Mutex::new(groups),
            ..Self::default()
        }
    }

    pub fn fail_next_list(&self, error: ApiError) {
        *self.list_error.lock().unwrap() = Some(error);
    }

    pub fn fail_next_write(&self, error: ApiError) {
        *self.write_error.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn list_where(&self, keep: impl Fn(&OshiGroup) -> bool) -> Result<Vec<OshiGroup>, ApiError> {
        if let Some(error) = self.list_error.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self
            .groups
            .lock()
            .unwrap()
            .iter()
            .filter(|group| keep(group))
            .cloned()
            .collect())
    }

    fn take_write_error(&self) -> Option<ApiError> {
        self.write_error.lock().unwrap().take()
    }
}

impl OshiGroupApi for FakeGroupApi {
    async fn list_by_group_name(
        &self,
        full: bool,
        fuzzy: bool,
        group_name: &str,
    ) -> Result<Vec<OshiGroup>, ApiError> {
        self.record(Call::ListByGroupName {
            full,
            fuzzy,
            query: group_name.to_string(),
        });
        self.list_where(|group| {
            if full {
                group.group_name == group_name
            } else {
                group.group_name.contains(group_name)
            }
        })
    }

    async fn list_by_company(&self, company: &str) -> Result<Vec<OshiGroup>, ApiError> {
        self.record(Call::ListByCompany(company.to_string()));
        self.list_where(|group| {
            group
                .company
                .as_deref()
                .is_some_and(|value| value.contains(company))
        })
    }

    async fn create(&self, request: &CreateOshiGroupRequest) -> Result<OshiGroup, ApiError> {
        self.record(Call::Create(request.clone()));
        if let Some(error) = self.take_write_error() {
            return Err(error);
        }

        let mut groups = self.groups.lock().unwrap();
        let id = groups.iter().map(|group| group.id).max().unwrap_or(0) + 1;
        let mut created = group(id, &request.group_name, request.company.as_deref());
        created.description = request.description.clone();
        groups.push(created.clone());
        Ok(created)
    }

    async fn update(&self, request: &UpdateOshiGroupRequest) -> Result<OshiGroup, ApiError> {
        self.record(Call::Update(request.clone()));
        if let Some(error) = self.take_write_error() {
            return Err(error);
        }

        let mut groups = self.groups.lock().unwrap();
        let target = groups
            .iter_mut()
            .find(|group| group.id == request.group_id)
            .ok_or_else(|| ApiError::server(404u16, "グループが見つかりません"))?;
        target.group_name = request.group_name.clone();
        target.company = request.company.clone();
        target.description = request.description.clone();
        Ok(target.clone())
    }
}

/// Auth backend that accepts one username/password pair.
pub struct FakeAuthApi {
    pub calls: Mutex<usize>,
}

pub const FAKE_TOKEN: &str = "jwt-for-alice";

impl FakeAuthApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn respond(&self, username: &str, email: &str) -> AuthResponse {
        *self.calls.lock().unwrap() += 1;
        AuthResponse {
            token: FAKE_TOKEN.to_string(),
            token_type: "Bearer".to_string(),
            user_id: 7,
            username: username.to_string(),
            email: email.to_string(),
        }
    }
}

impl AuthApi for FakeAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        if request.password != "secret" {
            *self.calls.lock().unwrap() += 1;
            return Err(ApiError::server(401u16, "ユーザー名またはパスワードが正しくありません"));
        }
        Ok(self.respond(&request.username, "alice@example.com"))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        Ok(self.respond(&request.username, &request.email))
    }
}
