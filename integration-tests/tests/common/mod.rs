//! Shared test utilities for the HTTP integration tests.
//!
//! Starts the real router on a loopback listener over a fresh store and
//! offers small JSON request helpers plus fixtures for the board hierarchy.

#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use reqwest::{Client, Method, StatusCode};
use serde_json::{Value, json};
use taskboard::infrastructure::server;
use taskboard::state::AppState;
use taskboard::store::Store;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running server and a client pointed at it.
pub struct TestServer {
    /// `http://127.0.0.1:<port>`
    pub base: String,
    /// Shared HTTP client.
    pub client: Client,
    /// State behind the router, for direct store assertions.
    pub state: Arc<AppState>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serves a fresh in-memory store on an ephemeral port.
    pub async fn start() -> Result<Self> {
        Self::serve(Store::in_memory().await?).await
    }

    /// Serves an already opened store on an ephemeral port.
    pub async fn serve(store: Store) -> Result<Self> {
        let state = Arc::new(AppState::new(store));
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base = format!("http://{}", listener.local_addr()?);
        let app = server::app(state.clone());
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Ok(Self {
            base,
            client: Client::new(),
            state,
            handle,
        })
    }

    /// Sends a request with an optional JSON body and decodes a JSON reply.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(StatusCode, Value)> {
        let mut request = self.client.request(method, format!("{}{path}", self.base));
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let value = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok((status, value))
    }

    /// `GET` helper.
    pub async fn get(&self, path: &str) -> Result<(StatusCode, Value)> {
        self.send(Method::GET, path, None).await
    }

    /// `POST` helper.
    pub async fn post(&self, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// `PUT` helper.
    pub async fn put(&self, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// `PATCH` helper.
    pub async fn patch(&self, path: &str, body: Value) -> Result<(StatusCode, Value)> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    /// `DELETE` helper.
    pub async fn delete(&self, path: &str) -> Result<(StatusCode, Value)> {
        self.send(Method::DELETE, path, None).await
    }

    /// Posts `body` to `path`, expects 201 and returns the new id.
    pub async fn create(&self, path: &str, body: Value) -> Result<i64> {
        let (status, created) = self.post(path, body).await?;
        anyhow::ensure!(status == StatusCode::CREATED, "{path}: {status} {created}");
        created["id"]
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("{path}: no id in {created}"))
    }

    /// Creates user → workspace → board → column → task.
    pub async fn hierarchy(&self) -> Result<Hierarchy> {
        let user = self.create("/users", json!({ "username": "alice" })).await?;
        let workspace = self
            .create("/workspaces", json!({ "title": "Home", "owner": user }))
            .await?;
        let board = self
            .create("/boards", json!({ "title": "Sprint", "workspace": workspace }))
            .await?;
        let column = self
            .create(
                &format!("/boards/{board}/columns"),
                json!({ "title": "Todo", "position": 1 }),
            )
            .await?;
        let task = self
            .create("/tasks", json!({ "title": "Write tests", "column": column }))
            .await?;
        Ok(Hierarchy {
            user,
            workspace,
            board,
            column,
            task,
        })
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Ids of one linked row per level.
#[derive(Debug, Clone, Copy)]
pub struct Hierarchy {
    /// Owner of the workspace.
    pub user: i64,
    /// Workspace id.
    pub workspace: i64,
    /// Board id.
    pub board: i64,
    /// Column id, position 1.
    pub column: i64,
    /// Task id, in the column.
    pub task: i64,
}
