use std::net::SocketAddr;

use backoffice::{config, routes, services, store, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let settings = config::load();

    let (events_tx, _) = tokio::sync::broadcast::channel::<String>(64);

    let state = AppState {
        db: store::Db::new(),
        settings: settings.clone(),
        prices: services::binance::PriceFeed::new(),
        events_tx,
    };

    if let Err(e) = services::admin_service::ensure_root_admin(&state).await {
        tracing::error!("could not seed root admin: {e}");
        std::process::exit(1);
    }

    // Supervised Binance mirror; aborted implicitly on process exit.
    let _feed = services::binance::spawn_price_feed(state.clone());

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings
            .host
            .parse::<std::net::IpAddr>()
            .expect("HOST must be a valid IP address"),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("could not bind listen address");
    axum::serve(listener, app).await.expect("server error");
}
