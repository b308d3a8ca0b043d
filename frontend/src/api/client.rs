use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client, Method, Response, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use std::rc::Rc;
use uuid::Uuid;

use crate::{
    api::types::ApiError,
    config,
    state::session::{SessionProvider, NOT_AUTHENTICATED},
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Option<String>,
    session: Rc<dyn SessionProvider>,
}

impl ApiClient {
    pub fn new(session: Rc<dyn SessionProvider>) -> Self {
        Self {
            client: Client::new(),
            base_url: None,
            session,
        }
    }

    #[cfg(test)]
    pub fn new_with_base_url(base_url: impl Into<String>, session: Rc<dyn SessionProvider>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: Some(config::normalize_base_url(&base_url).unwrap_or(base_url)),
            session,
        }
    }

    pub(crate) async fn resolved_base_url(&self) -> String {
        if let Some(base) = &self.base_url {
            base.clone()
        } else {
            config::await_api_base_url().await
        }
    }

    /// Builds the bearer header from a freshly fetched identity token.
    async fn get_auth_headers(&self) -> Result<HeaderMap, ApiError> {
        if self.session.current_user().is_none() {
            return Err(ApiError::unauthenticated(NOT_AUTHENTICATED));
        }
        let token = self.session.id_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::unauthenticated("Invalid token format"))?,
        );
        Ok(headers)
    }

    fn handle_unauthorized_status(status: StatusCode, path: &str) {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::warn!("backend rejected credentials for {} ({})", path, status);
        }
    }

    /// Sends an authenticated request and maps every non-success outcome to
    /// an [`ApiError`]. No network call is made without a session.
    async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut headers = self.get_auth_headers().await?;
        let base_url = self.resolved_base_url().await;
        let request_id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }

        log::debug!("{} {} [{}]", method, path, request_id);
        let mut request = self
            .client
            .request(method.clone(), format!("{}{}", base_url, path))
            .headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            log::warn!("{} {} [{}] failed: {}", method, path, request_id, e);
            ApiError::request_failed(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        Self::handle_unauthorized_status(status, path);
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_failed_response(status.as_u16(), &body);
            log::warn!(
                "{} {} [{}] returned {}: {}",
                method,
                path,
                request_id,
                status,
                error.error
            );
            Err(error)
        }
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send::<()>(Method::GET, path, None).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::unknown(format!("Failed to parse response: {}", e)))
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(Method::POST, path, Some(body)).await.map(|_| ())
    }
}
