use std::sync::Arc;

#[tokio::main]
async fn main() {
    ordena_observability::init();

    let config = ordena_api::config::ApiConfig::from_env();

    let services = ordena_api::app::build_services(&config)
        .await
        .expect("failed to wire services");
    let app = ordena_api::app::build_app(Arc::new(services));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
