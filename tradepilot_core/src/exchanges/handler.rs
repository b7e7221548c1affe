use reqwest::multipart::Form;
use reqwest::Method;

use crate::error::ClientError;
use crate::helpers::dto::RestResponse;
use crate::session::handler::SessionClient;

use super::dto::{NewExchange, UserExchange};

/// Client surface for exchange-account management.
#[derive(Clone)]
pub struct ExchangeService {
    session: SessionClient,
}

impl ExchangeService {
    pub fn new(session: SessionClient) -> Self {
        Self { session }
    }

    pub async fn create(&self, exchange: &NewExchange) -> Result<RestResponse, ClientError> {
        let form = Form::new()
            .text("name", exchange.name.clone())
            .text("key", exchange.key.clone())
            .text("secret", exchange.secret.clone())
            .text("extra", exchange.extra.clone());
        let request = self
            .session
            .authorized_request(Method::POST, "/user/exchange")
            .multipart(form);
        let response = self.session.dispatch(request).await?;
        Ok(response.json().await?)
    }

    /// Removal rides POST on the named route, with an empty form.
    pub async fn delete(&self, name: &str) -> Result<RestResponse, ClientError> {
        let request = self
            .session
            .authorized_request(Method::POST, &format!("/user/exchange/{}", name))
            .multipart(Form::new());
        let response = self.session.dispatch(request).await?;
        Ok(response.json().await?)
    }

    pub async fn user_exchanges(&self) -> Result<RestResponse<Vec<UserExchange>>, ClientError> {
        self.session.get_json("/user/exchanges").await
    }

    /// Display names of every exchange the server has a plugin for.
    pub async fn names(&self) -> Result<RestResponse<Vec<String>>, ClientError> {
        self.session.get_json("/exchanges/names").await
    }
}
