#![allow(dead_code)]

use admin_dashboard::api::middleware::rate_limit::RateLimit;
use admin_dashboard::application::services::{DashboardService, TokenManager};
use admin_dashboard::domain::entities::{MonthlyEarning, Overview};
use admin_dashboard::infrastructure::backend::{FetchError, OverviewApi};
use admin_dashboard::infrastructure::storage::{MemoryStorage, TokenStorage};
use admin_dashboard::routes::app_router;
use admin_dashboard::state::AppState;
use async_trait::async_trait;
use axum::ServiceExt;
use axum::extract::Request;
use axum_test::TestServer;
use reqwest::header::HeaderMap;
use std::sync::{Arc, Mutex};

/// Canned backend answer.
#[derive(Clone)]
pub enum Reply {
    Ok(Overview),
    Unauthorized,
    ServerError,
}

/// Backend stand-in recording every call.
pub struct FakeOverviewApi {
    reply: Reply,
    pub calls: Mutex<Vec<(Option<i32>, HeaderMap)>>,
}

impl FakeOverviewApi {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl OverviewApi for FakeOverviewApi {
    async fn fetch_overview(
        &self,
        year: Option<i32>,
        headers: HeaderMap,
    ) -> Result<Overview, FetchError> {
        self.calls.lock().unwrap().push((year, headers));
        match &self.reply {
            Reply::Ok(overview) => Ok(overview.clone()),
            Reply::Unauthorized => Err(FetchError::Unauthorized(401)),
            Reply::ServerError => Err(FetchError::Status(500)),
        }
    }
}

pub fn sample_overview() -> Overview {
    Overview {
        total_earnings: Some(1234.5),
        total_users: Some(1200.0),
        total_tokens_used: Some(3_400_000.0),
        total_affiliate_products: Some(8.0),
        monthly_data: Some(
            ["Jan", "Feb", "Mar"]
                .iter()
                .zip([150.0, 0.0, 75.25])
                .map(|(month, earnings)| MonthlyEarning {
                    month: month.to_string(),
                    earnings: Some(earnings),
                })
                .collect(),
        ),
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub api: Arc<FakeOverviewApi>,
}

/// Builds the full router (normalization and guard included, rate limiting
/// off) over a fake backend and an in-memory token store.
pub async fn create_test_app(reply: Reply, token: Option<&str>) -> TestApp {
    create_test_app_with_storage(reply, token, Arc::new(MemoryStorage::new())).await
}

pub async fn create_test_app_with_storage(
    reply: Reply,
    token: Option<&str>,
    storage: Arc<dyn TokenStorage>,
) -> TestApp {
    let api = Arc::new(FakeOverviewApi::new(reply));
    let token_manager = Arc::new(TokenManager::new(storage));
    if let Some(token) = token {
        token_manager.set_tokens(token, None).await.unwrap();
    }
    let dashboard_service = Arc::new(DashboardService::new(api.clone(), token_manager.clone()));
    let state = AppState::new(token_manager, dashboard_service);

    let app = app_router(state.clone(), RateLimit::Disabled);
    let server = TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap();

    TestApp { server, state, api }
}
