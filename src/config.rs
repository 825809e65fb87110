use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,

    pub jwt_secret: String,
    pub token_ttl_hours: i64,

    // seeded into an empty admin directory at startup
    pub root_admin_id: String,
    pub root_admin_password: String,

    pub binance_ws_url: String,
    pub price_symbols: Vec<String>,
    pub feed_retry_secs: u64,
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| "change-me-dev-secret".to_string());

    let token_ttl_hours = env::var("TOKEN_TTL_HOURS")
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .unwrap_or(12);

    let root_admin_id = env::var("ROOT_ADMIN_ID").unwrap_or_else(|_| "root".to_string());
    let root_admin_password =
        env::var("ROOT_ADMIN_PASSWORD").unwrap_or_else(|_| "change-me".to_string());

    let binance_ws_url = env::var("BINANCE_WS_URL")
        .unwrap_or_else(|_| "wss://stream.binance.com:9443/stream".to_string());

    let price_symbols = env::var("PRICE_SYMBOLS")
        .unwrap_or_else(|_| "BTCUSDT,ETHUSDT,BNBUSDT,SOLUSDT".to_string())
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    let feed_retry_secs = env::var("FEED_RETRY_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(5);

    Settings {
        host,
        port,
        jwt_secret,
        token_ttl_hours,
        root_admin_id,
        root_admin_password,
        binance_ws_url,
        price_symbols,
        feed_retry_secs,
    }
}
