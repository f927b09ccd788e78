use reqwest::Client;
use serde_json::{json, Value};

use crate::error::{Result, SyncError};
use crate::markdown::Block;

const API_ENDPOINT: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

pub struct NotionClient {
    http: Client,
    token: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, API_ENDPOINT.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            token,
            base_url,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder, body: &Value) -> Result<()> {
        let response = request
            .header("Notion-Version", NOTION_VERSION)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SyncError::NotionApi {
                status: response.status().as_u16(),
                message: response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<failed to read response body>".to_string()),
            });
        }

        Ok(())
    }

    /// Replace the database's property schema. Multi-select option lists are
    /// overwritten wholesale; options absent from `properties` are dropped.
    pub async fn update_database(&self, database_id: &str, properties: Value) -> Result<()> {
        let request = self
            .http
            .patch(format!("{}/databases/{}", self.base_url, database_id));

        self.send(request, &json!({ "properties": properties })).await
    }

    /// Create one page under the database. Reruns create fresh pages; nothing
    /// checks for an existing page with the same issue number.
    pub async fn create_page(
        &self,
        database_id: &str,
        children: &[Block],
        properties: Value,
    ) -> Result<()> {
        let request = self.http.post(format!("{}/pages", self.base_url));

        self.send(
            request,
            &json!({
                "parent": { "database_id": database_id },
                "children": children,
                "properties": properties,
            }),
        )
        .await
    }
}
