use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Form, Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use reqwest::StatusCode as RStatus;
use serde_json::{Value, json};

use ordena_api::app::services::AppServices;
use ordena_api::config::ApiConfig;
use ordena_infra::InMemoryOrderStore;

// -------------------------
// Mock upstream (online store + ViaCEP on one router)
// -------------------------

#[derive(Default)]
struct UpstreamState {
    sales: Vec<Value>,
    sales_failure: Option<String>,
    viacep: HashMap<String, Value>,
    closed: Vec<i64>,
    fail_close_for: Option<i64>,
}

type SharedState = Arc<Mutex<UpstreamState>>;

async fn mock_get_sales(Extension(state): Extension<SharedState>) -> axum::response::Response {
    let state = state.lock().unwrap();
    if let Some(msg) = &state.sales_failure {
        return (StatusCode::BAD_REQUEST, Json(json!({ "message": msg }))).into_response();
    }
    (StatusCode::OK, Json(json!({ "sales": state.sales }))).into_response()
}

#[derive(serde::Deserialize)]
struct CloseSaleForm {
    sales_id: i64,
}

async fn mock_close_sale(
    Extension(state): Extension<SharedState>,
    Form(form): Form<CloseSaleForm>,
) -> axum::response::Response {
    let mut state = state.lock().unwrap();
    if state.fail_close_for == Some(form.sales_id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": format!("Error: sale {} is stuck", form.sales_id) })),
        )
            .into_response();
    }
    state.closed.push(form.sales_id);
    (StatusCode::OK, Json(json!({ "message": "Success" }))).into_response()
}

async fn mock_viacep(
    Extension(state): Extension<SharedState>,
    Path(zip_code): Path<String>,
) -> axum::response::Response {
    let state = state.lock().unwrap();
    let body = state
        .viacep
        .get(&zip_code)
        .cloned()
        .unwrap_or_else(|| json!({ "erro": true }));
    (StatusCode::OK, Json(body)).into_response()
}

// -------------------------
// Harness: mock upstream + the real app on ephemeral ports
// -------------------------

struct Harness {
    base_url: String,
    state: SharedState,
    app_handle: tokio::task::JoinHandle<()>,
    upstream_handle: tokio::task::JoinHandle<()>,
}

impl Harness {
    async fn spawn() -> Self {
        let state: SharedState = Arc::new(Mutex::new(UpstreamState::default()));

        let upstream = Router::new()
            .route("/get_sales", get(mock_get_sales))
            .route("/close_sale", put(mock_close_sale))
            .route("/ws/:zip_code/json/", get(mock_viacep))
            .layer(Extension(state.clone()));

        let upstream_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind upstream mock");
        let upstream_url = format!("http://{}", upstream_listener.local_addr().unwrap());
        let upstream_handle = tokio::spawn(async move {
            axum::serve(upstream_listener, upstream).await.unwrap();
        });

        // Bind the app first so the self-hop URL is known before wiring.
        let app_listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let base_url = format!("http://{}", app_listener.local_addr().unwrap());

        let config = ApiConfig {
            bind_addr: String::new(),
            database_url: None,
            store_base_url: upstream_url.clone(),
            viacep_base_url: upstream_url,
            self_base_url: base_url.clone(),
            http_timeout: Duration::from_secs(5),
        };
        let services = AppServices::new(Arc::new(InMemoryOrderStore::new()), &config);
        let app = ordena_api::app::build_app(Arc::new(services));

        let app_handle = tokio::spawn(async move {
            axum::serve(app_listener, app).await.unwrap();
        });

        Self {
            base_url,
            state,
            app_handle,
            upstream_handle,
        }
    }

    fn set_sales(&self, sales: Vec<Value>) {
        self.state.lock().unwrap().sales = sales;
    }

    fn set_viacep(&self, zip: &str, body: Value) {
        self.state.lock().unwrap().viacep.insert(zip.to_string(), body);
    }

    fn closed_sales(&self) -> Vec<i64> {
        self.state.lock().unwrap().closed.clone()
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.app_handle.abort();
        self.upstream_handle.abort();
    }
}

fn brazilian_sale(sales_id: i64) -> Value {
    json!({
        "sales_id": sales_id,
        "country": "Brasil",
        "city": "",
        "state": "",
        "street": "",
        "neighborhood": "",
        "zip_code": "01001000",
        "name": "Widget",
        "price": 9.99,
        "quantity": 2,
        "value": 19.98,
        "sale_date": "2024-01-01T00:00:00",
    })
}

fn sao_paulo_viacep() -> Value {
    json!({
        "localidade": "São Paulo",
        "uf": "SP",
        "logradouro": "Praça da Sé",
        "bairro": "Sé",
    })
}

// -------------------------
// Tests
// -------------------------

#[tokio::test]
async fn health_endpoint_responds() {
    let h = Harness::spawn().await;
    let res = reqwest::get(format!("{}/health", h.base_url)).await.unwrap();
    assert_eq!(res.status(), RStatus::OK);
}

#[tokio::test]
async fn sales_retrieval_enriches_brazilian_addresses() {
    let h = Harness::spawn().await;
    h.set_sales(vec![brazilian_sale(7)]);
    h.set_viacep("01001000", sao_paulo_viacep());

    let body: Value = reqwest::get(format!("{}/get_sales_order", h.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["message"], "Success");
    let sale = &body["sales_data"][0];
    assert_eq!(sale["city"], "São Paulo");
    assert_eq!(sale["state"], "SP");
    assert_eq!(sale["street"], "Praça da Sé");
    assert_eq!(sale["neighborhood"], "Sé");
    // Non-address fields pass through untouched.
    assert_eq!(sale["name"], "Widget");
    assert_eq!(sale["zip_code"], "01001000");
}

#[tokio::test]
async fn non_brazilian_sales_pass_through_unchanged() {
    let h = Harness::spawn().await;
    let sale = json!({
        "sales_id": 1,
        "country": "Argentina",
        "city": "",
        "state": "",
        "street": "",
        "neighborhood": "",
        "zip_code": "C1002",
        "warehouse": "norte",
    });
    h.set_sales(vec![sale.clone()]);

    let body: Value = reqwest::get(format!("{}/get_sales_order", h.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["sales_data"][0], sale);
}

#[tokio::test]
async fn already_complete_addresses_skip_the_lookup() {
    let h = Harness::spawn().await;
    let mut sale = brazilian_sale(2);
    sale["city"] = json!("Santos");
    sale["state"] = json!("SP");
    sale["street"] = json!("Rua XV");
    sale["neighborhood"] = json!("Centro");
    h.set_sales(vec![sale.clone()]);
    // No viacep fixture registered: a lookup would come back "erro".

    let body: Value = reqwest::get(format!("{}/get_sales_order", h.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["sales_data"][0], sale);
}

#[tokio::test]
async fn failed_zip_lookup_is_not_an_error() {
    let h = Harness::spawn().await;
    h.set_sales(vec![brazilian_sale(3)]);
    // Lookup for 01001000 answers {"erro": true}.

    let res = reqwest::get(format!("{}/get_sales_order", h.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["sales_data"][0]["city"], "");
}

#[tokio::test]
async fn upstream_failure_aborts_sales_retrieval() {
    let h = Harness::spawn().await;
    h.state.lock().unwrap().sales_failure = Some("Error: store exploded".to_string());

    let res = reqwest::get(format!("{}/get_sales_order", h.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Error: store exploded");
}

#[tokio::test]
async fn empty_upstream_list_is_a_success() {
    let h = Harness::spawn().await;

    let body: Value = reqwest::get(format!("{}/get_sales_order", h.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "Success");
    assert_eq!(body["sales_data"], json!([]));
}

#[tokio::test]
async fn end_to_end_ingestion_persists_enriched_orders_and_closes_sales() {
    let h = Harness::spawn().await;
    h.set_sales(vec![brazilian_sale(7)]);
    h.set_viacep("01001000", sao_paulo_viacep());

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/add_order", h.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Added Orders");
    let order = &body["orders"][0];
    assert_eq!(order["city"], "São Paulo");
    assert_eq!(order["state"], "SP");
    assert_eq!(order["street"], "Praça da Sé");
    assert_eq!(order["neighborhood"], "Sé");
    assert_eq!(order["sales_id"], 7);
    assert!(order.get("order_id").is_none());
    assert!(order.get("invoice_status").is_none());

    assert_eq!(h.closed_sales(), vec![7]);

    // The persisted record is pending.
    let body: Value = reqwest::get(format!("{}/get_pending_invoices", h.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["message"], "There are pending orders");
    assert_eq!(body["orders"][0]["order_id"], 1);
    assert_eq!(body["orders"][0]["city"], "São Paulo");
}

#[tokio::test]
async fn close_sale_failure_aborts_the_rest_of_the_batch() {
    let h = Harness::spawn().await;
    h.set_sales(vec![brazilian_sale(1), brazilian_sale(2), brazilian_sale(3)]);
    h.set_viacep("01001000", sao_paulo_viacep());
    h.state.lock().unwrap().fail_close_for = Some(2);

    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/add_order", h.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Error: sale 2 is stuck");

    // Sale 1 closed; sale 2's close failed; sale 3 never attempted.
    assert_eq!(h.closed_sales(), vec![1]);

    // Commit point is before the callback: items 1 and 2 are persisted,
    // item 3 is not.
    let body: Value = reqwest::get(format!("{}/get_pending_invoices", h.base_url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let sales_ids: Vec<i64> = body["orders"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["sales_id"].as_i64().unwrap())
        .collect();
    assert_eq!(sales_ids, vec![1, 2]);
}

#[tokio::test]
async fn listing_pending_invoices_with_none_is_a_failure() {
    let h = Harness::spawn().await;

    let res = reqwest::get(format!("{}/get_pending_invoices", h.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Error: There are no pending orders");
}

#[tokio::test]
async fn completion_is_idempotent_in_effect_but_reports_conflict() {
    let h = Harness::spawn().await;
    h.set_sales(vec![brazilian_sale(5)]);
    h.set_viacep("01001000", sao_paulo_viacep());

    let client = reqwest::Client::new();
    client
        .post(format!("{}/add_order", h.base_url))
        .send()
        .await
        .unwrap();

    let res = client
        .put(format!("{}/complete_order", h.base_url))
        .form(&[("order_id", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Order 1 completed successfully");

    // Second completion fails and changes nothing.
    let res = client
        .put(format!("{}/complete_order", h.base_url))
        .form(&[("order_id", "1")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Error: The order 1 is already completed");

    // And the pending list no longer shows it.
    let res = reqwest::get(format!("{}/get_pending_invoices", h.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::NOT_FOUND);
}

#[tokio::test]
async fn completing_an_unknown_order_is_not_found() {
    let h = Harness::spawn().await;

    let client = reqwest::Client::new();
    let res = client
        .put(format!("{}/complete_order", h.base_url))
        .form(&[("order_id", "99")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Error: The order 99 does not exist");
}

#[tokio::test]
async fn viacep_proxy_resolves_and_reports_unknown_zip_codes() {
    let h = Harness::spawn().await;
    h.set_viacep("01001-000", sao_paulo_viacep());

    let client = reqwest::Client::new();

    // Double-encoded hyphen still resolves.
    let res = client
        .get(format!(
            "{}/get_viacep/?zip_code=01001%252D000",
            h.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Success");
    assert_eq!(body["data"]["localidade"], "São Paulo");

    let res = client
        .get(format!("{}/get_viacep/?zip_code=99999999", h.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), RStatus::BAD_GATEWAY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Error: Zip code not found");
}
