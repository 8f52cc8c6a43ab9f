#![allow(dead_code)]

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

use wealthx_console::models::market::{CoinSnapshot, GlobalStats, TrendingCoin};
use wealthx_console::models::scheme::{Scheme, SchemeInput};
use wealthx_console::services::market_api::MarketApiService;
use wealthx_console::services::scheme_api::{ADMIN_TOKEN_HEADER, SchemeApiService};
use wealthx_console::services::site_api::SiteApiService;

/// Password accepted by the mock admin login endpoint.
pub const ADMIN_PASSWORD: &str = "test-admin-pass";

/// Per-endpoint request counters, so tests can assert exactly which
/// requests a flow issued (and which it did not).
#[derive(Default)]
pub struct EndpointHits {
    pub top_coins: AtomicUsize,
    pub global: AtomicUsize,
    pub trending: AtomicUsize,
    pub schemes_list: AtomicUsize,
    pub settings: AtomicUsize,
    pub subscribe: AtomicUsize,
    pub login: AtomicUsize,
    pub create: AtomicUsize,
    pub update: AtomicUsize,
    pub delete: AtomicUsize,
}

/// Shared state behind the mock backend. Tests mutate it directly to
/// seed data, inject failures, or slow an endpoint down.
pub struct MockState {
    pub schemes: Mutex<Vec<Scheme>>,
    pub token: Mutex<Option<String>>,
    pub last_mutation_token: Mutex<Option<String>>,
    pub subscribers: Mutex<Vec<String>>,
    pub telegram_link: Mutex<Option<String>>,
    pub top_coins: Mutex<Vec<CoinSnapshot>>,
    pub global: Mutex<GlobalStats>,
    pub trending: Mutex<Vec<TrendingCoin>>,
    pub fail_top_coins: AtomicBool,
    pub fail_global: AtomicBool,
    pub fail_trending: AtomicBool,
    pub fail_schemes_list: AtomicBool,
    pub fail_settings: AtomicBool,
    pub top_coins_delay_ms: AtomicU64,
    pub create_error: Mutex<Option<String>>,
    pub hits: EndpointHits,
}

impl MockState {
    fn new() -> Self {
        Self {
            schemes: Mutex::new(Vec::new()),
            token: Mutex::new(None),
            last_mutation_token: Mutex::new(None),
            subscribers: Mutex::new(Vec::new()),
            telegram_link: Mutex::new(None),
            top_coins: Mutex::new(Vec::new()),
            global: Mutex::new(GlobalStats::default()),
            trending: Mutex::new(Vec::new()),
            fail_top_coins: AtomicBool::new(false),
            fail_global: AtomicBool::new(false),
            fail_trending: AtomicBool::new(false),
            fail_schemes_list: AtomicBool::new(false),
            fail_settings: AtomicBool::new(false),
            top_coins_delay_ms: AtomicU64::new(0),
            create_error: Mutex::new(None),
            hits: EndpointHits::default(),
        }
    }
}

/// A running mock backend bound to an ephemeral local port.
pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockBackend {
    pub fn market_api(&self) -> MarketApiService {
        MarketApiService::new(self.base_url.clone())
    }

    pub fn scheme_api(&self) -> SchemeApiService {
        SchemeApiService::new(self.base_url.clone())
    }

    pub fn site_api(&self) -> SiteApiService {
        SiteApiService::new(self.base_url.clone())
    }
}

/// Start the mock backend on 127.0.0.1:0 and return its base URL plus
/// a handle to the shared state.
pub async fn spawn_backend() -> MockBackend {
    let state = Arc::new(MockState::new());
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("mock backend should bind an ephemeral port");
    let addr = listener.local_addr().expect("listener should have an address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock backend should serve");
    });

    MockBackend {
        base_url: format!("http://{}", addr),
        state,
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/crypto/top-coins", get(top_coins))
        .route("/api/crypto/global", get(global_stats))
        .route("/api/crypto/trending", get(trending))
        .route("/api/schemes", get(list_schemes))
        .route("/api/settings", get(settings))
        .route("/api/newsletter/subscribe", post(subscribe))
        .route("/api/admin/login", post(login))
        .route("/api/admin/schemes", post(create_scheme))
        .route("/api/admin/schemes/{id}", put(update_scheme).delete(delete_scheme))
        .with_state(state)
}

// Handlers

async fn top_coins(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.hits.top_coins.fetch_add(1, Ordering::SeqCst);

    // Snapshot at request time so a delayed response carries the data that
    // was current when the request arrived.
    let coins: Vec<CoinSnapshot> = state.top_coins.lock().clone();

    let delay = state.top_coins_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    if state.fail_top_coins.load(Ordering::SeqCst) {
        return upstream_error();
    }

    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(20);
    let coins: Vec<CoinSnapshot> = coins.into_iter().take(limit).collect();
    Json(json!({ "coins": coins })).into_response()
}

async fn global_stats(State(state): State<Arc<MockState>>) -> Response {
    state.hits.global.fetch_add(1, Ordering::SeqCst);
    if state.fail_global.load(Ordering::SeqCst) {
        return upstream_error();
    }
    let stats = state.global.lock().clone();
    Json(stats).into_response()
}

async fn trending(State(state): State<Arc<MockState>>) -> Response {
    state.hits.trending.fetch_add(1, Ordering::SeqCst);
    if state.fail_trending.load(Ordering::SeqCst) {
        return upstream_error();
    }
    let coins: Vec<TrendingCoin> = state.trending.lock().clone();
    Json(json!({ "trending": coins })).into_response()
}

async fn list_schemes(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.hits.schemes_list.fetch_add(1, Ordering::SeqCst);
    if state.fail_schemes_list.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Database unavailable" })),
        )
            .into_response();
    }
    let active_only = params
        .get("active_only")
        .map(|v| v == "true")
        .unwrap_or(true);
    let schemes: Vec<Scheme> = state
        .schemes
        .lock()
        .iter()
        .filter(|s| !active_only || s.is_active)
        .cloned()
        .collect();
    Json(json!({ "schemes": schemes })).into_response()
}

async fn settings(State(state): State<Arc<MockState>>) -> Response {
    state.hits.settings.fetch_add(1, Ordering::SeqCst);
    if state.fail_settings.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "Database unavailable" })),
        )
            .into_response();
    }
    let link = state.telegram_link.lock().clone();
    Json(json!({ "telegram_link": link })).into_response()
}

#[derive(Deserialize)]
struct SubscribeBody {
    email: String,
}

async fn subscribe(
    State(state): State<Arc<MockState>>,
    Json(body): Json<SubscribeBody>,
) -> Response {
    state.hits.subscribe.fetch_add(1, Ordering::SeqCst);
    let mut subscribers = state.subscribers.lock();
    if subscribers.contains(&body.email) {
        return Json(json!({ "message": "Already subscribed", "status": "exists" })).into_response();
    }
    subscribers.push(body.email);
    Json(json!({ "message": "Successfully subscribed!", "status": "success" })).into_response()
}

#[derive(Deserialize)]
struct LoginBody {
    password: String,
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<LoginBody>) -> Response {
    state.hits.login.fetch_add(1, Ordering::SeqCst);
    if body.password != ADMIN_PASSWORD {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid password" })),
        )
            .into_response();
    }
    let token = Uuid::new_v4().to_string();
    *state.token.lock() = Some(token.clone());
    Json(json!({ "token": token, "expires_in_secs": 3600 })).into_response()
}

async fn create_scheme(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(input): Json<SchemeInput>,
) -> Response {
    state.hits.create.fetch_add(1, Ordering::SeqCst);
    if !record_auth(&state, &headers) {
        return unauthorized();
    }
    if let Some(detail) = state.create_error.lock().clone() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response();
    }
    let scheme = scheme_from_input(Uuid::new_v4().to_string(), input);
    state.schemes.lock().push(scheme.clone());
    Json(scheme).into_response()
}

async fn update_scheme(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(input): Json<SchemeInput>,
) -> Response {
    state.hits.update.fetch_add(1, Ordering::SeqCst);
    if !record_auth(&state, &headers) {
        return unauthorized();
    }
    let mut schemes = state.schemes.lock();
    match schemes.iter_mut().find(|s| s.id == id) {
        Some(slot) => {
            *slot = scheme_from_input(id, input);
            Json(slot.clone()).into_response()
        }
        None => not_found(),
    }
}

async fn delete_scheme(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    state.hits.delete.fetch_add(1, Ordering::SeqCst);
    if !record_auth(&state, &headers) {
        return unauthorized();
    }
    let mut schemes = state.schemes.lock();
    let before = schemes.len();
    schemes.retain(|s| s.id != id);
    if schemes.len() == before {
        return not_found();
    }
    Json(json!({ "message": "Scheme deleted" })).into_response()
}

// Records the presented admin token and checks it against the one the
// login handler issued.
fn record_auth(state: &MockState, headers: &HeaderMap) -> bool {
    let presented = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_mutation_token.lock() = presented.clone();
    match (state.token.lock().as_deref(), presented.as_deref()) {
        (Some(expected), Some(got)) => expected == got,
        _ => false,
    }
}

fn scheme_from_input(id: String, input: SchemeInput) -> Scheme {
    Scheme {
        id,
        title: input.title,
        min_investment: input.min_investment,
        max_investment: input.max_investment,
        return_percentage: input.return_percentage,
        duration_months: input.duration_months,
        description: input.description,
        is_popular: input.is_popular,
        is_active: input.is_active,
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Invalid or expired token" })),
    )
        .into_response()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": "Scheme not found" })),
    )
        .into_response()
}

fn upstream_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": "CoinGecko rate limit exceeded. Try again later." })),
    )
        .into_response()
}

// Seed helpers

pub fn sample_coin(id: &str, price: f64, change_24h: f64) -> CoinSnapshot {
    CoinSnapshot {
        id: id.to_string(),
        name: capitalize(id),
        symbol: id[..id.len().min(3)].to_uppercase(),
        image: Some(format!("https://assets.example/{id}.png")),
        current_price: Some(price),
        market_cap: Some(price * 1_000_000.0),
        market_cap_rank: None,
        price_change_percentage_24h: Some(change_24h),
        price_change_percentage_7d: Some(change_24h / 2.0),
        total_volume: Some(price * 50_000.0),
        sparkline_in_7d: vec![price * 0.95, price, price * 1.05],
    }
}

pub fn sample_global() -> GlobalStats {
    GlobalStats {
        total_market_cap: 2_400_000_000_000.0,
        total_volume: 81_200_000_000.0,
        market_cap_change_24h: 4.2,
        active_cryptocurrencies: 17_234,
        markets: 800,
        btc_dominance: 58.25,
    }
}

pub fn sample_trending(name: &str, rank: u32) -> TrendingCoin {
    TrendingCoin {
        id: name.to_lowercase(),
        name: name.to_string(),
        symbol: name[..name.len().min(3)].to_uppercase(),
        thumb: None,
        market_cap_rank: Some(rank),
    }
}

/// Insert a scheme directly into the mock store, returning its id.
pub fn seed_scheme(state: &MockState, title: &str, is_active: bool) -> String {
    let id = Uuid::new_v4().to_string();
    state.schemes.lock().push(Scheme {
        id: id.clone(),
        title: title.to_string(),
        min_investment: 5_000,
        max_investment: 2_500_000,
        return_percentage: 40.0,
        duration_months: 12,
        description: format!("{title} test scheme"),
        is_popular: false,
        is_active,
    });
    id
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
