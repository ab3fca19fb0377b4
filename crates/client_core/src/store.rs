//! REST client for an Appwrite-compatible document store.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Expense, ExpenseDraft},
    error::{ApiError, RemoteOperation, RemoteOperationFailed},
    protocol::{CreateDocumentRequest, DocumentList, QueryDescriptor},
};
use url::Url;

use crate::{config::StoreSettings, DocumentStore};

const PROJECT_HEADER: &str = "X-Appwrite-Project";
const KEY_HEADER: &str = "X-Appwrite-Key";
const RESPONSE_FORMAT_HEADER: &str = "X-Appwrite-Response-Format";
const RESPONSE_FORMAT: &str = "1.5.0";

pub struct AppwriteStore {
    http: Client,
    documents_url: Url,
    project_id: String,
    api_key: Option<String>,
}

impl AppwriteStore {
    pub fn new(settings: &StoreSettings) -> Result<Self> {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(http: Client, settings: &StoreSettings) -> Result<Self> {
        let mut documents_url = settings.validate()?;
        documents_url
            .path_segments_mut()
            .map_err(|_| anyhow!("store endpoint '{}' cannot carry a path", settings.endpoint))?
            .pop_if_empty()
            .extend([
                "databases",
                settings.database_id.as_str(),
                "collections",
                settings.collection_id.as_str(),
                "documents",
            ]);

        Ok(Self {
            http,
            documents_url,
            project_id: settings.project_id.clone(),
            api_key: settings.api_key.clone(),
        })
    }

    pub fn documents_url(&self) -> &Url {
        &self.documents_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request
            .header(PROJECT_HEADER, &self.project_id)
            .header(RESPONSE_FORMAT_HEADER, RESPONSE_FORMAT);
        match &self.api_key {
            Some(key) => request.header(KEY_HEADER, key),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(
        operation: RemoteOperation,
        request: RequestBuilder,
    ) -> std::result::Result<T, RemoteOperationFailed> {
        let response = request
            .send()
            .await
            .map_err(|err| RemoteOperationFailed::new(operation, err.to_string()))?;
        decode(operation, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    operation: RemoteOperation,
    response: Response,
) -> std::result::Result<T, RemoteOperationFailed> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<ApiError>(&body) {
            Ok(api_error) => RemoteOperationFailed::from((operation, api_error)),
            Err(_) => RemoteOperationFailed::new(operation, format!("store responded {status}")),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|err| RemoteOperationFailed::new(operation, err.to_string()))?;
    serde_json::from_slice(&body)
        .context("malformed store response")
        .map_err(|err| RemoteOperationFailed::new(operation, format!("{err:#}")))
}

#[async_trait]
impl DocumentStore for AppwriteStore {
    async fn create_expense(
        &self,
        draft: &ExpenseDraft,
    ) -> std::result::Result<Expense, RemoteOperationFailed> {
        let request = self
            .authorize(self.http.post(self.documents_url.clone()))
            .json(&CreateDocumentRequest::unique(draft));
        Self::send(RemoteOperation::Create, request).await
    }

    async fn list_expenses(
        &self,
        query: Option<&QueryDescriptor>,
    ) -> std::result::Result<Vec<Expense>, RemoteOperationFailed> {
        let mut params = Vec::new();
        for clause in query.map(QueryDescriptor::clauses).unwrap_or_default() {
            let encoded = clause.encode().map_err(|err| {
                RemoteOperationFailed::new(RemoteOperation::ListExpenses, err.to_string())
            })?;
            params.push(("queries[]", encoded));
        }

        let request = self
            .authorize(self.http.get(self.documents_url.clone()))
            .query(&params);
        let list: DocumentList = Self::send(RemoteOperation::ListExpenses, request).await?;
        tracing::debug!(
            total = list.total,
            returned = list.documents.len(),
            "listed expense documents"
        );
        Ok(list.documents)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
