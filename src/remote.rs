//! Thin client for the OpenList/Alist REST dialect.
//!
//! Every endpoint answers a JSON envelope `{code, message, data}`; a
//! non-success envelope code or an opaque body is surfaced as a typed error.
//! The client also owns the session state: destination URL, bearer token and
//! whether the token has been verified remotely.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

/// Full-listing fetches ask for everything in one page, like the original
/// client did for its rename/copy passes.
pub const FULL_LISTING: u32 = 9999;
/// Page size used while the operator browses the tree.
pub const BROWSE_PAGE: u32 = 200;

const VERIFY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authenticated (no verified token)")]
    Unauthorized,
    #[error("service error: {message} (code {code})")]
    Service { code: i64, message: String },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Outcome of one login attempt. Transport failures and unexpected envelope
/// codes both count as server errors; the caller decides how to recover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Token(String),
    Unauthorized,
    ServerError,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub is_dir: bool,
}

/// One listing, valid only for the path it was fetched for.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    pub path: String,
    pub entries: Vec<DirectoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlanItem {
    pub src_name: String,
    pub new_name: String,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    #[serde(default)]
    message: String,
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

#[derive(Debug, Deserialize)]
struct MeData {
    username: String,
}

#[derive(Debug, Deserialize)]
struct ListData {
    // The service reports an empty directory as `"content": null`.
    #[serde(default)]
    content: Option<Vec<DirectoryEntry>>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RenameBatchRequest<'a> {
    src_dir: &'a str,
    rename_objects: &'a [RenamePlanItem],
}

#[derive(Debug, Serialize)]
struct CopyRequest<'a> {
    src_dir: &'a str,
    dst_dir: &'a str,
    names: &'a [String],
}

#[derive(Debug, Serialize)]
struct MkdirRequest<'a> {
    path: &'a str,
}

/// Seam between the workflow core and the HTTP client, so recovery and
/// navigation logic can run against scripted fakes in tests.
#[allow(async_fn_in_trait)]
pub trait RemoteApi {
    async fn login(&self, username: &str, password: &str) -> LoginOutcome;
    async fn verify_token(&self, token: &str) -> bool;
    async fn list_directory(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
        refresh: bool,
    ) -> Result<DirectoryListing, ApiError>;
    async fn rename_batch(&self, path: &str, items: &[RenamePlanItem]) -> bool;
    async fn copy_files(&self, src_dir: &str, dst_dir: &str, names: &[String]) -> bool;
    async fn mkdir(&self, path: &str) -> bool;

    /// Point the session at a new destination URL. Invalidates the token.
    fn set_base_url(&mut self, url: &str);
    /// Install a token that has just been verified remotely.
    fn set_token(&mut self, token: &str);
}

#[derive(Debug)]
pub struct OpenListClient {
    base_url: String,
    token: String,
    token_valid: bool,
    http: reqwest::Client,
}

impl OpenListClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: String::new(),
            token_valid: false,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fire a mutating call and reduce the envelope to pass/fail with logs.
    async fn post_checked<B: Serialize>(&self, endpoint: &str, body: &B, label: &str) -> bool {
        let send = self
            .http
            .post(self.url(endpoint))
            .header("Authorization", &self.token)
            .json(body)
            .send()
            .await;
        let resp = match send {
            Ok(resp) => resp,
            Err(err) => {
                error!("{label} request failed: {err}");
                return false;
            }
        };
        match resp.json::<Envelope<serde_json::Value>>().await {
            Ok(env) if env.code == 200 => {
                info!("{label} succeeded");
                true
            }
            Ok(env) => {
                error!("{label} rejected: {} (code {})", env.message, env.code);
                false
            }
            Err(err) => {
                error!("{label} returned an unreadable response: {err}");
                false
            }
        }
    }
}

impl RemoteApi for OpenListClient {
    async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        info!("requesting a new token");
        let send = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&LoginRequest { username, password })
            .send()
            .await;
        let resp = match send {
            Ok(resp) => resp,
            Err(err) => {
                error!("login request failed: {err}");
                return LoginOutcome::ServerError;
            }
        };
        match resp.json::<Envelope<LoginData>>().await {
            Ok(env) => match (env.code, env.data) {
                (200, Some(data)) => LoginOutcome::Token(data.token),
                (400 | 401 | 403, _) => LoginOutcome::Unauthorized,
                (code, _) => {
                    error!("login rejected: {} (code {code})", env.message);
                    LoginOutcome::ServerError
                }
            },
            Err(err) => {
                error!("login returned an unreadable response: {err}");
                LoginOutcome::ServerError
            }
        }
    }

    async fn verify_token(&self, token: &str) -> bool {
        info!("verifying token");
        let send = self
            .http
            .get(self.url("/api/me"))
            .header("Authorization", token)
            .timeout(VERIFY_TIMEOUT)
            .send()
            .await;
        let resp = match send {
            Ok(resp) => resp,
            Err(err) => {
                error!("token verification unreachable: {err}");
                return false;
            }
        };
        match resp.json::<Envelope<MeData>>().await {
            Ok(env) if env.code == 200 => {
                if let Some(me) = env.data {
                    info!("token verified for user {}", me.username);
                }
                true
            }
            Ok(env) => {
                error!("token rejected: {} (code {})", env.message, env.code);
                false
            }
            Err(err) => {
                error!("token verification returned an unreadable response: {err}");
                false
            }
        }
    }

    async fn list_directory(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
        refresh: bool,
    ) -> Result<DirectoryListing, ApiError> {
        if !self.token_valid {
            return Err(ApiError::Unauthorized);
        }
        let resp = self
            .http
            .get(self.url("/api/fs/list"))
            .header("Authorization", &self.token)
            .query(&[
                ("path", path),
                ("page", &page.to_string()),
                ("per_page", &per_page.to_string()),
                ("refresh", &refresh.to_string()),
            ])
            .send()
            .await?;
        let env = resp.json::<Envelope<ListData>>().await?;
        if env.code != 200 {
            return Err(ApiError::Service {
                code: env.code,
                message: env.message,
            });
        }
        let entries = env.data.and_then(|d| d.content).unwrap_or_default();
        Ok(DirectoryListing {
            path: path.to_string(),
            entries,
        })
    }

    async fn rename_batch(&self, path: &str, items: &[RenamePlanItem]) -> bool {
        info!("submitting rename batch of {} files in {path}", items.len());
        self.post_checked(
            "/api/fs/batch_rename",
            &RenameBatchRequest {
                src_dir: path,
                rename_objects: items,
            },
            "batch rename",
        )
        .await
    }

    async fn copy_files(&self, src_dir: &str, dst_dir: &str, names: &[String]) -> bool {
        info!("creating copy task: {src_dir} -> {dst_dir} ({} items)", names.len());
        self.post_checked(
            "/api/fs/copy",
            &CopyRequest {
                src_dir,
                dst_dir,
                names,
            },
            "copy task",
        )
        .await
    }

    async fn mkdir(&self, path: &str) -> bool {
        info!("creating directory {path}");
        self.post_checked("/api/fs/mkdir", &MkdirRequest { path }, "mkdir").await
    }

    fn set_base_url(&mut self, url: &str) {
        self.base_url = url.trim_end_matches('/').to_string();
        self.token_valid = false;
    }

    fn set_token(&mut self, token: &str) {
        self.token = token.to_string();
        self.token_valid = true;
    }
}
