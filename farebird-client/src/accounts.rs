use async_trait::async_trait;
use serde::Serialize;

use farebird_core::api::{AccountsApi, LoginResponse};
use farebird_core::models::{ProfileUpdate, Registration, User};
use farebird_core::pii::Masked;
use farebird_core::ApiResult;

use crate::http::ApiClient;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: Masked<&'a str>,
}

#[async_trait]
impl AccountsApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = LoginRequest {
            email,
            password: Masked(password),
        };
        tracing::debug!(email, "submitting login");
        self.send(self.http.post(self.url("/accounts/login/")).json(&request))
            .await
    }

    async fn register(&self, registration: &Registration) -> ApiResult<()> {
        tracing::debug!(email = %registration.email, "submitting registration");
        // 201 carries the created user and a token pair; both are discarded
        let _body: serde_json::Value = self
            .send(
                self.http
                    .post(self.url("/accounts/register/"))
                    .json(registration),
            )
            .await?;
        Ok(())
    }

    async fn current_user(&self, token: &str) -> ApiResult<User> {
        self.send(self.http.get(self.url("/accounts/me/")).bearer_auth(token))
            .await
    }

    async fn update_profile(&self, update: &ProfileUpdate, token: &str) -> ApiResult<User> {
        tracing::debug!(email = %update.email, "submitting profile update");
        self.send(
            self.http
                .patch(self.url("/accounts/profile/update/"))
                .bearer_auth(token)
                .json(update),
        )
        .await
    }
}
