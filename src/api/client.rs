//! Blocking HTTP client for the remote budget service
//!
//! One client instance serves both the auth and budget endpoints. The whole
//! application is synchronous and event-driven, so a blocking client keeps
//! at most one request per flow in flight by construction.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

use super::dto::{
    AddBudgetRequest, AddBudgetResponse, BudgetItemsResponse, ErrorBody, ForgotPasswordRequest,
    LoginRequest, LoginResponse, RegisterRequest,
};
use super::{AuthService, BudgetService};
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetItem, NewBudgetItem, RegistrationForm};

/// Client for the remote auth and budget services
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a client from settings
    pub fn new(settings: &Settings) -> BudgetResult<Self> {
        Self::with_base_url(&settings.api_base_url, settings.request_timeout_secs)
    }

    /// Create a client for an explicit base URL (useful for testing)
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> BudgetResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BudgetError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a session token; subsequent requests carry it as a bearer header
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Drop the session token
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Whether a session token is attached
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_auth(
        &self,
        builder: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a non-2xx response to the crate error taxonomy.
    ///
    /// 401 means the session is no longer valid; 400 may carry a structured
    /// per-field error map; everything else is a bare rejection.
    fn ensure_success(response: Response) -> BudgetResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(BudgetError::Unauthorized);
        }

        if status == StatusCode::BAD_REQUEST {
            let field_errors = response
                .json::<ErrorBody>()
                .ok()
                .and_then(|body| body.errors);
            return Err(BudgetError::Rejected {
                status: status.as_u16(),
                field_errors,
            });
        }

        Err(BudgetError::rejected(status.as_u16()))
    }
}

impl AuthService for ApiClient {
    fn register(&self, form: &RegistrationForm) -> BudgetResult<()> {
        let body = RegisterRequest {
            name: &form.name,
            user_name: &form.user_name,
            email: &form.email,
            password: &form.password,
            confirm_password: &form.confirm_password,
        };

        let response = self.http.post(self.url("/api/register")).json(&body).send()?;
        Self::ensure_success(response)?;
        Ok(())
    }

    fn login(&self, user_name: &str, password: &str) -> BudgetResult<String> {
        let body = LoginRequest {
            user_name,
            password,
        };

        let response = self.http.post(self.url("/api/login")).json(&body).send()?;
        let response = Self::ensure_success(response)?;

        let parsed: LoginResponse = response
            .json()
            .map_err(|e| BudgetError::Json(format!("Malformed login response: {}", e)))?;
        Ok(parsed.token)
    }

    fn forgot_password(&self, email: &str, new_password: &str) -> BudgetResult<()> {
        let body = ForgotPasswordRequest {
            email,
            new_password,
        };

        let response = self
            .http
            .post(self.url("/api/forgot-password"))
            .json(&body)
            .send()?;
        Self::ensure_success(response)?;
        Ok(())
    }
}

impl BudgetService for ApiClient {
    fn fetch_items(&self) -> BudgetResult<Vec<BudgetItem>> {
        let response = self
            .with_auth(self.http.get(self.url("/api/filter-budget")))
            .send()?;
        let response = Self::ensure_success(response)?;

        let parsed: BudgetItemsResponse = response
            .json()
            .map_err(|e| BudgetError::Json(format!("Malformed item list: {}", e)))?;

        parsed
            .budget_items
            .into_iter()
            .map(BudgetItem::try_from)
            .collect()
    }

    fn create_item(
        &self,
        candidate: &NewBudgetItem,
        creation_date: chrono::NaiveDate,
    ) -> BudgetResult<Option<String>> {
        let body = AddBudgetRequest::from_candidate(candidate, creation_date);

        let response = self
            .with_auth(self.http.post(self.url("/api/add-budget")).json(&body))
            .send()?;
        let response = Self::ensure_success(response)?;

        // The contract only promises a 2xx; take an identity if one came back
        let parsed: AddBudgetResponse = response.json().unwrap_or_default();
        Ok(parsed.id)
    }

    fn delete_item(&self, remote_id: &str) -> BudgetResult<()> {
        let response = self
            .with_auth(
                self.http
                    .delete(self.url(&format!("/api/delete-budget/{}", remote_id))),
            )
            .send()?;
        Self::ensure_success(response)?;
        Ok(())
    }

    fn toggle_favorite(&self, remote_id: &str) -> BudgetResult<()> {
        let response = self
            .with_auth(
                self.http
                    .put(self.url(&format!("/api/favorite-budget/{}", remote_id))),
            )
            .send()?;
        Self::ensure_success(response)?;
        Ok(())
    }
}
