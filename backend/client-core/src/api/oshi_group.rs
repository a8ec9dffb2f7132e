use crate::api_client::{ApiClient, RequestOptions};
use crate::error::ApiError;

use models::{CreateOshiGroupRequest, OshiGroup, UpdateOshiGroupRequest};

use std::future::Future;
use std::sync::Arc;

use url::form_urlencoded::Serializer;

pub const LIST_BY_GROUP_NAME_PATH: &str = "/api/oshi-groups/list-group";
pub const LIST_BY_COMPANY_PATH: &str = "/api/oshi-groups/list-company";
pub const CREATE_PATH: &str = "/api/oshi-groups/create";
pub const UPDATE_PATH: &str = "/api/oshi-groups/update";

/// Oshi group endpoints.
pub trait OshiGroupApi: Send + Sync {
    /// `GET /api/oshi-groups/list-group?full=&fuzzy=&groupName=`.
    ///
    /// `full` and `fuzzy` are exclusive; callers validate before calling.
    fn list_by_group_name(
        &self,
        full: bool,
        fuzzy: bool,
        group_name: &str,
    ) -> impl Future<Output = Result<Vec<OshiGroup>, ApiError>> + Send;

    /// `GET /api/oshi-groups/list-company?company=`.
    fn list_by_company(
        &self,
        company: &str,
    ) -> impl Future<Output = Result<Vec<OshiGroup>, ApiError>> + Send;

    fn create(
        &self,
        request: &CreateOshiGroupRequest,
    ) -> impl Future<Output = Result<OshiGroup, ApiError>> + Send;

    fn update(
        &self,
        request: &UpdateOshiGroupRequest,
    ) -> impl Future<Output = Result<OshiGroup, ApiError>> + Send;
}

fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    let mut serializer = Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    format!("{path}?{}", serializer.finish())
}

pub fn list_by_group_name_path(full: bool, fuzzy: bool, group_name: &str) -> String {
    with_query(
        LIST_BY_GROUP_NAME_PATH,
        &[
            ("full", if full { "true" } else { "false" }),
            ("fuzzy", if fuzzy { "true" } else { "false" }),
            ("groupName", group_name),
        ],
    )
}

pub fn list_by_company_path(company: &str) -> String {
    with_query(LIST_BY_COMPANY_PATH, &[("company", company)])
}

impl OshiGroupApi for ApiClient {
    async fn list_by_group_name(
        &self,
        full: bool,
        fuzzy: bool,
        group_name: &str,
    ) -> Result<Vec<OshiGroup>, ApiError> {
        let path = list_by_group_name_path(full, fuzzy, group_name);
        self.request_json(&path, RequestOptions::get()).await
    }

    async fn list_by_company(&self, company: &str) -> Result<Vec<OshiGroup>, ApiError> {
        let path = list_by_company_path(company);
        self.request_json(&path, RequestOptions::get()).await
    }

    async fn create(&self, request: &CreateOshiGroupRequest) -> Result<OshiGroup, ApiError> {
        let options = RequestOptions::post().with_json(request)?;
        self.request_json(CREATE_PATH, options).await
    }

    async fn update(&self, request: &UpdateOshiGroupRequest) -> Result<OshiGroup, ApiError> {
        let options = RequestOptions::post().with_json(request)?;
        self.request_json(UPDATE_PATH, options).await
    }
}

impl<T: OshiGroupApi> OshiGroupApi for Arc<T> {
    fn list_by_group_name(
        &self,
        full: bool,
        fuzzy: bool,
        group_name: &str,
    ) -> impl Future<Output = Result<Vec<OshiGroup>, ApiError>> + Send {
        (**self).list_by_group_name(full, fuzzy, group_name)
    }

    fn list_by_company(
        &self,
        company: &str,
    ) -> impl Future<Output = Result<Vec<OshiGroup>, ApiError>> + Send {
        (**self).list_by_company(company)
    }

    fn create(
        &self,
        request: &CreateOshiGroupRequest,
    ) -> impl Future<Output = Result<OshiGroup, ApiError>> + Send {
        (**self).create(request)
    }

    fn update(
        &self,
        request: &UpdateOshiGroupRequest,
    ) -> impl Future<Output = Result<OshiGroup, ApiError>> + Send {
        (**self).update(request)
    }
}
