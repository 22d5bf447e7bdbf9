// Shared fixtures for router-level tests

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::common::clock::FixedClock;
use crate::common::{AppConfig, AppState};
use crate::static_files::StaticRoot;

pub const INDEX_HTML: &str = "<!doctype html><title>Hamster Stay</title>";

/// A site root and log directory that live as long as the fixture.
pub struct TestSite {
    pub dir: TempDir,
    pub today: NaiveDate,
    pub state: Arc<AppState>,
}

impl TestSite {
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    pub fn with_config(tweak: impl FnOnce(&mut AppConfig)) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let public = dir.path().join("public");
        std::fs::create_dir_all(public.join("css")).expect("create site root");
        std::fs::write(public.join("index.html"), INDEX_HTML).expect("write index");
        std::fs::write(public.join("css/styles.css"), "body{margin:0}").expect("write css");
        std::fs::write(public.join("notes.xyz"), [0u8, 1, 2]).expect("write binary");
        std::fs::write(dir.path().join("secret.txt"), "outside the root").expect("write secret");

        let mut config = AppConfig {
            site_root: public.clone(),
            reservations_log: dir.path().join("data/reservations.ndjson"),
            ..AppConfig::default()
        };
        tweak(&mut config);
        if let Some(parent) = config.reservations_log.parent() {
            std::fs::create_dir_all(parent).expect("create log dir");
        }

        let today = NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date");
        let site = StaticRoot::open(&public).expect("open site root");
        let state = AppState::new(config, Arc::new(FixedClock::on(today)), site);

        Self {
            dir,
            today,
            state: Arc::new(state),
        }
    }

    pub fn router(&self) -> Router {
        crate::app(self.state.clone())
    }

    pub fn log_path(&self) -> PathBuf {
        self.state.config.reservations_log.clone()
    }

    pub fn log_lines(&self) -> Vec<String> {
        std::fs::read_to_string(self.log_path())
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// `today + offset` as `YYYY-MM-DD`.
    pub fn day(&self, offset: i64) -> String {
        (self.today + chrono::Duration::days(offset))
            .format("%Y-%m-%d")
            .to_string()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}
