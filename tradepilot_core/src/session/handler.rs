use log::{debug, warn};
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;

use super::claims::{decode_claims, is_expired};
use super::dto::{RegistrationResult, Session, TokenResponse, UserCredentials, UserIdentity};
use super::storage::SessionStore;

/// Single authority for "is the caller authenticated", and the choke
/// point every API call goes through. Holds one [`Client`] and the
/// injected [`SessionStore`]; cheap to clone.
#[derive(Clone)]
pub struct SessionClient {
    client: Client,
    api_url: String,
    store: SessionStore,
}

impl SessionClient {
    pub fn new(store: SessionStore, config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.clone(),
            store,
        }
    }

    /// Exchanges credentials for a bearer token. The token is persisted
    /// only once its claims decode; an empty token means the server
    /// rejected the credentials and `error` says why.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        let request = self
            .authorized_request(Method::POST, "/login")
            .json(&UserCredentials { username, password });
        let response = self.dispatch(request).await?;
        let body: TokenResponse = response.json().await?;

        if body.token.is_empty() {
            warn!("login rejected for {}", username);
            return Err(ClientError::Authentication(body.error));
        }

        let claims = decode_claims(&body.token).map_err(ClientError::MalformedToken)?;
        self.store.set_token(&body.token)?;
        debug!("session opened for user {}", claims.user_id);

        Ok(Session {
            token: body.token,
            claims,
        })
    }

    /// Same transport pattern as login, but nothing is persisted and
    /// validation failures come back structurally rather than as `Err`.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<RegistrationResult, ClientError> {
        let request = self
            .authorized_request(Method::POST, "/register")
            .json(&UserCredentials { username, password });
        let response = self.dispatch(request).await?;
        Ok(response.json().await?)
    }

    /// True iff a token is stored, decodes, and has not expired. No
    /// I/O beyond the store read; re-evaluated on every call because
    /// tokens expire between calls.
    pub fn is_authenticated(&self) -> bool {
        match self.store.token() {
            Ok(Some(token)) => decode_claims(&token).is_ok() && !is_expired(&token),
            _ => false,
        }
    }

    /// Claims of the current session, remapped to the shape consumers
    /// use. Fails with [`ClientError::NoSession`] when not
    /// authenticated.
    pub fn current_user(&self) -> Result<UserIdentity, ClientError> {
        if !self.is_authenticated() {
            return Err(ClientError::NoSession);
        }
        let token = self.store.token()?.ok_or(ClientError::NoSession)?;
        let claims = decode_claims(&token).map_err(ClientError::MalformedToken)?;
        Ok(UserIdentity::from(claims))
    }

    /// Clears the stored token unconditionally. Idempotent.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.store.clear()
    }

    /// Builds a request against the API base URL. The bearer header is
    /// attached iff the session is valid at this moment, not at client
    /// construction. Bodies bring their own content type.
    pub fn authorized_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_url, path);
        let mut request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if self.is_authenticated() {
            if let Ok(Some(token)) = self.store.token() {
                request = request.bearer_auth(token);
            }
        }
        request
    }

    /// Sends the request and classifies the response: exactly HTTP 200
    /// is success, anything else is a [`ClientError::Request`] carrying
    /// the drained body. 2xx codes other than 200 are NOT success.
    pub async fn dispatch(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(response);
        }
        warn!("request failed with status {}", status);
        Err(ClientError::Request {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            body: response
                .text()
                .await
                .unwrap_or_else(|_| "unable to read error body".to_string()),
        })
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .dispatch(self.authorized_request(Method::GET, path))
            .await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::dto::Claims;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use mockito::Matcher;

    fn temp_store() -> SessionStore {
        let db = sled::Config::new().temporary(true).open().unwrap();
        SessionStore::new(&db).unwrap()
    }

    fn client_for(api_url: &str) -> SessionClient {
        SessionClient::new(temp_store(), &ClientConfig::new(api_url, "ws://unused"))
    }

    fn mint(exp: i64) -> String {
        let claims = Claims {
            user_id: 42,
            username: "satoshi".to_string(),
            local_currency: "USD".to_string(),
            exp,
            iat: Utc::now().timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn authentication_tracks_exp_and_decodability() {
        let client = client_for("http://unused");

        assert!(!client.is_authenticated());

        client
            .store
            .set_token(&mint(Utc::now().timestamp() + 3600))
            .unwrap();
        assert!(client.is_authenticated());

        client
            .store
            .set_token(&mint(Utc::now().timestamp() - 3600))
            .unwrap();
        assert!(!client.is_authenticated());

        client.store.set_token("garbage").unwrap();
        assert!(!client.is_authenticated());
    }

    #[test]
    fn current_user_requires_a_session() {
        let client = client_for("http://unused");
        assert!(matches!(
            client.current_user(),
            Err(ClientError::NoSession)
        ));

        client
            .store
            .set_token(&mint(Utc::now().timestamp() + 3600))
            .unwrap();
        let identity = client.current_user().unwrap();
        assert_eq!(
            identity,
            UserIdentity {
                id: 42,
                username: "satoshi".to_string(),
                local_currency: "USD".to_string(),
            }
        );
    }

    #[test]
    fn logout_is_idempotent() {
        let client = client_for("http://unused");
        client
            .store
            .set_token(&mint(Utc::now().timestamp() + 3600))
            .unwrap();
        client.logout().unwrap();
        assert!(!client.is_authenticated());
        client.logout().unwrap();
    }

    #[tokio::test]
    async fn login_persists_token_on_success() {
        let mut server = mockito::Server::new_async().await;
        let token = mint(Utc::now().timestamp() + 3600);
        let mock = server
            .mock("POST", "/login")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"token": "{}", "error": ""}}"#, token))
            .create_async()
            .await;

        let client = client_for(&server.url());
        let session = client.login("satoshi", "hunter2").await.unwrap();

        assert_eq!(session.claims.user_id, 42);
        assert_eq!(client.store.token().unwrap(), Some(token));
        assert!(client.is_authenticated());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn login_failure_carries_server_message_and_persists_nothing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/login")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"token": "", "error": "invalid credentials"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let err = client.login("satoshi", "wrong").await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Authentication(ref message) if message == "invalid credentials"
        ));
        assert_eq!(client.store.token().unwrap(), None);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn register_reports_validation_failure_structurally() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/register")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": false, "error": "username taken"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        let result = client.register("satoshi", "hunter2").await.unwrap();
        assert!(!result.success);
        assert_eq!(result.error, "username taken");
    }

    #[tokio::test]
    async fn bearer_attached_iff_authenticated_at_call_time() {
        let mut server = mockito::Server::new_async().await;
        let token = mint(Utc::now().timestamp() + 3600);

        let without = server
            .mock("GET", "/transactions")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        let client = client_for(&server.url());
        client
            .dispatch(client.authorized_request(Method::GET, "/transactions"))
            .await
            .unwrap();
        without.assert_async().await;

        let with = server
            .mock("GET", "/transactions")
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success": true}"#)
            .create_async()
            .await;

        client.store.set_token(&token).unwrap();
        client
            .dispatch(client.authorized_request(Method::GET, "/transactions"))
            .await
            .unwrap();
        with.assert_async().await;
    }

    #[tokio::test]
    async fn only_exactly_200_is_success() {
        for status in [201, 204, 400, 401, 500] {
            let mut server = mockito::Server::new_async().await;
            server
                .mock("GET", "/transactions")
                .with_status(status)
                .create_async()
                .await;

            let client = client_for(&server.url());
            let err = client
                .dispatch(client.authorized_request(Method::GET, "/transactions"))
                .await
                .unwrap_err();
            match err {
                ClientError::Request { status: got, .. } => assert_eq!(got, status as u16),
                other => panic!("expected Request error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn unauthorized_response_leaves_token_untouched() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/transactions")
            .with_status(401)
            .create_async()
            .await;

        let token = mint(Utc::now().timestamp() + 3600);
        let client = client_for(&server.url());
        client.store.set_token(&token).unwrap();

        let err = client
            .dispatch(client.authorized_request(Method::GET, "/transactions"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Request { status: 401, .. }));

        // No implicit logout; re-authentication is the caller's call.
        assert_eq!(client.store.token().unwrap(), Some(token));
    }
}
