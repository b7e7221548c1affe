use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Method;

use crate::error::ClientError;
use crate::helpers::dto::RestResponse;
use crate::session::handler::SessionClient;

use super::dto::Transaction;

/// Client surface for the transaction-history endpoints. Every request
/// is decorated and classified by the owning [`SessionClient`], and
/// every response envelope is handed back structurally for the view to
/// inspect.
#[derive(Clone)]
pub struct TransactionService {
    session: SessionClient,
}

impl TransactionService {
    pub fn new(session: SessionClient) -> Self {
        Self { session }
    }

    pub async fn transactions(&self) -> Result<RestResponse<Vec<Transaction>>, ClientError> {
        self.session.get_json("/transactions").await
    }

    /// Asks the server to re-pull from the configured exchanges before
    /// returning the merged history.
    pub async fn sync(&self) -> Result<RestResponse<Vec<Transaction>>, ClientError> {
        self.session.get_json("/transactions/sync").await
    }

    pub async fn order_history(&self) -> Result<RestResponse<Vec<Transaction>>, ClientError> {
        self.session.get_json("/transactions/orderhistory").await
    }

    pub async fn export(&self) -> Result<RestResponse<String>, ClientError> {
        self.session.get_json("/transactions/export").await
    }

    /// Uploads an exchange CSV; the payload echoes the imported rows.
    pub async fn import(
        &self,
        csv: Vec<u8>,
        file_name: &str,
        exchange: &str,
    ) -> Result<RestResponse<Vec<Transaction>>, ClientError> {
        debug!("importing {} for {}", file_name, exchange);
        let form = Form::new()
            .part("csv", Part::bytes(csv).file_name(file_name.to_string()))
            .text("exchange", exchange.to_string());
        let request = self
            .session
            .authorized_request(Method::POST, "/transactions/import")
            .multipart(form);
        let response = self.session.dispatch(request).await?;
        Ok(response.json().await?)
    }

    /// The one local mutation: re-categorizing a row, by round trip.
    pub async fn update_category(
        &self,
        id: &str,
        category: &str,
    ) -> Result<RestResponse, ClientError> {
        let form = Form::new().text("category", category.to_string());
        let request = self
            .session
            .authorized_request(Method::PUT, &format!("/transactions/{}", id))
            .multipart(form);
        let response = self.session.dispatch(request).await?;
        Ok(response.json().await?)
    }
}
