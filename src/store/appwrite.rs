use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::domain::RowId;
use crate::store::{Query, Row, RowList, RowStore, StoreError};

#[derive(Debug, Clone)]
pub struct AppwriteConfig {
    pub endpoint: String,

    pub project_id: String,

    pub api_key: Option<String>,

    pub database_id: String,
}

impl Default for AppwriteConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://cloud.appwrite.io/v1".to_string(),
            project_id: String::new(),
            api_key: None,
            database_id: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateRowBody<'a> {
    row_id: &'a RowId,
    data: &'a Map<String, Value>,
}

#[derive(Serialize)]
struct UpdateRowBody<'a> {
    data: &'a Map<String, Value>,
}

/// `RowStore` backed by the Appwrite `TablesDB` REST API.
#[derive(Debug, Clone)]
pub struct AppwriteStore {
    client: Client,
    config: AppwriteConfig,
}

impl AppwriteStore {
    pub fn new(client: Client, config: AppwriteConfig) -> Result<Self, StoreError> {
        if config.project_id.is_empty() {
            return Err(StoreError::Config("project id is empty".to_string()));
        }
        if config.database_id.is_empty() {
            return Err(StoreError::Config("database id is empty".to_string()));
        }
        Url::parse(&config.endpoint)
            .map_err(|e| StoreError::Config(format!("invalid endpoint: {e}")))?;

        Ok(Self { client, config })
    }

    fn rows_url(&self, table: &str) -> String {
        format!(
            "{}/tablesdb/{}/tables/{}/rows",
            self.config.endpoint.trim_end_matches('/'),
            urlencoding::encode(&self.config.database_id),
            urlencoding::encode(table)
        )
    }

    fn row_url(&self, table: &str, id: &RowId) -> String {
        format!(
            "{}/{}",
            self.rows_url(table),
            urlencoding::encode(id.as_str())
        )
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url)
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Response-Format", "1.8.0");

        match &self.config.api_key {
            Some(key) => builder.header("X-Appwrite-Key", key),
            None => builder,
        }
    }

    fn parse_url(raw: &str) -> Result<Url, StoreError> {
        Url::parse(raw).map_err(|e| StoreError::Config(format!("invalid url {raw}: {e}")))
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        op: &'static str,
        table: &str,
        row: Option<&RowId>,
    ) -> Result<Response, StoreError> {
        metrics::counter!("row_store_requests_total", "op" => op, "table" => table.to_string())
            .increment(1);

        let result = Self::check(builder.send().await, row).await;

        if let Err(e) = &result {
            metrics::counter!("row_store_errors_total", "op" => op, "table" => table.to_string())
                .increment(1);
            debug!(op, table, error = %e, "Row store request failed");
        }

        result
    }

    async fn check(
        sent: Result<Response, reqwest::Error>,
        row: Option<&RowId>,
    ) -> Result<Response, StoreError> {
        let response = sent?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = row {
                return Err(StoreError::NotFound(id.clone()));
            }
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => match parsed.kind {
                Some(kind) => format!("{} [{kind}]", parsed.message),
                None => parsed.message,
            },
            Err(_) => body,
        };

        Err(StoreError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Decode {
            row: RowId::new(""),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl RowStore for AppwriteStore {
    async fn list_rows(&self, table: &str, queries: &[Query]) -> Result<RowList, StoreError> {
        let mut url = Self::parse_url(&self.rows_url(table))?;
        {
            let mut pairs = url.query_pairs_mut();
            for query in queries {
                pairs.append_pair("queries[]", &query.to_wire());
            }
        }

        debug!(table, queries = queries.len(), "Listing rows");
        let response = self
            .send(self.request(Method::GET, url), "list", table, None)
            .await?;

        Self::decode(response).await
    }

    async fn create_row(
        &self,
        table: &str,
        id: &RowId,
        data: Map<String, Value>,
    ) -> Result<Row, StoreError> {
        let url = Self::parse_url(&self.rows_url(table))?;
        let body = CreateRowBody {
            row_id: id,
            data: &data,
        };

        debug!(table, row_id = %id, "Creating row");
        let response = self
            .send(
                self.request(Method::POST, url).json(&body),
                "create",
                table,
                None,
            )
            .await?;

        Self::decode(response).await
    }

    async fn update_row(
        &self,
        table: &str,
        id: &RowId,
        patch: Map<String, Value>,
    ) -> Result<Row, StoreError> {
        let url = Self::parse_url(&self.row_url(table, id))?;
        let body = UpdateRowBody { data: &patch };

        debug!(table, row_id = %id, "Updating row");
        let response = self
            .send(
                self.request(Method::PATCH, url).json(&body),
                "update",
                table,
                Some(id),
            )
            .await?;

        Self::decode(response).await
    }

    async fn delete_row(&self, table: &str, id: &RowId) -> Result<(), StoreError> {
        let url = Self::parse_url(&self.row_url(table, id))?;

        debug!(table, row_id = %id, "Deleting row");
        let result = self
            .send(self.request(Method::DELETE, url), "delete", table, Some(id))
            .await;

        if let Err(StoreError::NotFound(_)) = &result {
            warn!(table, row_id = %id, "Row already gone on delete");
        }

        result.map(|_| ())
    }
}
