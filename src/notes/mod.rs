pub mod autosave;

use std::env;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{LessonNote, NewNoteRequest, UpdateNoteRequest};

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl ApiConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("STUDYHELPER_API_URL")
            .map_err(|_| AppError::Config("STUDYHELPER_API_URL is not set".to_string()))?;
        let access_token = env::var("STUDYHELPER_ACCESS_TOKEN")
            .map_err(|_| AppError::Config("STUDYHELPER_ACCESS_TOKEN is not set".to_string()))?;
        let refresh_token = env::var("STUDYHELPER_REFRESH_TOKEN")
            .map_err(|_| AppError::Config("STUDYHELPER_REFRESH_TOKEN is not set".to_string()))?;

        Ok(Self {
            base_url,
            access_token,
            refresh_token,
        })
    }
}

/// Note persistence collaborator. Cancellation is by dropping the returned
/// future; the autosave controller does that by aborting the task running
/// the call, which also aborts the underlying HTTP request.
#[async_trait]
pub trait NoteService: Send + Sync {
    async fn create_note(&self, req: &NewNoteRequest) -> Result<LessonNote, AppError>;
    async fn update_note(&self, id: &str, req: &UpdateNoteRequest) -> Result<LessonNote, AppError>;
}

pub struct HttpNoteService {
    client: Client,
    base_url: String,
    refresh_token: String,
    access_token: RwLock<String>,
    // Serializes token refreshes; latecomers reuse the fresh token.
    refresh_lock: Mutex<()>,
}

impl HttpNoteService {
    pub fn new(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url,
            refresh_token: config.refresh_token,
            access_token: RwLock::new(config.access_token),
            refresh_lock: Mutex::new(()),
        })
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<LessonNote, AppError> {
        let url = format!("{}{}", self.base_url, path);
        let token = self.access_token.read().await.clone();

        let mut response = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(&token)
            .json(body)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("access token rejected, refreshing");
            let fresh = self.refresh_access_token(&token).await?;
            response = self
                .client
                .request(method, &url)
                .bearer_auth(&fresh)
                .json(body)
                .send()
                .await?;
        }

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Api { status, message });
        }

        Ok(response.json::<LessonNote>().await?)
    }

    /// Refreshes the access token, unless another task already replaced
    /// `stale` while we waited for the lock.
    async fn refresh_access_token(&self, stale: &str) -> Result<String, AppError> {
        let _guard = self.refresh_lock.lock().await;

        {
            let current = self.access_token.read().await;
            if *current != stale {
                return Ok(current.clone());
            }
        }

        #[derive(Serialize)]
        struct RefreshRequest<'a> {
            refresh_token: &'a str,
        }

        #[derive(Deserialize)]
        struct RefreshResponse {
            access_token: String,
        }

        let url = format!("{}/auth/refresh", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&RefreshRequest {
                refresh_token: &self.refresh_token,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Auth(format!(
                "token refresh failed with status {}",
                response.status()
            )));
        }

        let body: RefreshResponse = response.json().await?;
        *self.access_token.write().await = body.access_token.clone();
        info!("access token refreshed");
        Ok(body.access_token)
    }
}

#[async_trait]
impl NoteService for HttpNoteService {
    async fn create_note(&self, req: &NewNoteRequest) -> Result<LessonNote, AppError> {
        self.send(Method::POST, "/notes", req).await
    }

    async fn update_note(&self, id: &str, req: &UpdateNoteRequest) -> Result<LessonNote, AppError> {
        self.send(Method::PATCH, &format!("/notes/{}", id), req).await
    }
}

/// Accepts every save without talking to a backend. Useful for offline
/// sessions and tests.
pub struct NoopNoteService;

#[async_trait]
impl NoteService for NoopNoteService {
    async fn create_note(&self, req: &NewNoteRequest) -> Result<LessonNote, AppError> {
        let now = Utc::now();
        Ok(LessonNote {
            id: uuid::Uuid::new_v4().to_string(),
            text: req.text.clone(),
            entry_id: req.entry_id.clone(),
            subject: req.subject.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn update_note(&self, id: &str, req: &UpdateNoteRequest) -> Result<LessonNote, AppError> {
        let now = Utc::now();
        Ok(LessonNote {
            id: id.to_string(),
            text: req.text.clone(),
            entry_id: None,
            subject: None,
            created_at: now,
            updated_at: now,
        })
    }
}
