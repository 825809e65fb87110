//! Binance trade-price mirror. One outbound websocket subscription keeps an
//! in-process `symbol -> last price` table fresh for display-only estimates;
//! order submission never depends on it.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::AppState;

#[derive(Clone, Default)]
pub struct PriceFeed {
    prices: Arc<RwLock<HashMap<String, f64>>>,
}

impl PriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn price_for(&self, symbol: &str) -> Option<f64> {
        self.prices.read().await.get(&symbol.to_uppercase()).copied()
    }

    pub async fn snapshot(&self) -> HashMap<String, f64> {
        self.prices.read().await.clone()
    }

    pub async fn set(&self, symbol: &str, price: f64) {
        self.prices
            .write()
            .await
            .insert(symbol.to_uppercase(), price);
    }
}

// Combined-stream frame: {"stream":"btcusdt@trade","data":{...}}
#[derive(Debug, Deserialize)]
struct StreamFrame {
    #[allow(dead_code)]
    stream: String,
    data: TradeData,
}

#[derive(Debug, Deserialize)]
struct TradeData {
    // symbol
    s: String,
    // last trade price, sent as a decimal string
    p: String,
}

/// Supervised background subscription: connect, mirror trades, and on any
/// error or close reconnect after a fixed delay, forever. Cancel by
/// aborting the returned handle.
pub fn spawn_price_feed(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let retry = Duration::from_secs(state.settings.feed_retry_secs);

        loop {
            if let Err(e) = run_subscription(&state).await {
                tracing::warn!("price feed disconnected: {e}; retrying in {retry:?}");
            }
            sleep(retry).await;
        }
    })
}

async fn run_subscription(state: &AppState) -> Result<(), String> {
    let streams: Vec<String> = state
        .settings
        .price_symbols
        .iter()
        .map(|s| format!("{}@trade", s.to_lowercase()))
        .collect();

    let url = format!("{}?streams={}", state.settings.binance_ws_url, streams.join("/"));

    let (ws, _) = connect_async(url.as_str())
        .await
        .map_err(|e| e.to_string())?;

    tracing::info!(
        "price feed connected ({} symbols)",
        state.settings.price_symbols.len()
    );

    let (mut write, mut read) = ws.split();

    while let Some(msg) = read.next().await {
        match msg.map_err(|e| e.to_string())? {
            Message::Text(txt) => {
                let Ok(frame) = serde_json::from_str::<StreamFrame>(&txt) else {
                    continue;
                };
                if let Ok(price) = frame.data.p.parse::<f64>() {
                    state.prices.set(&frame.data.s, price).await;
                }
            }
            Message::Ping(payload) => {
                let _ = write.send(Message::Pong(payload)).await;
            }
            Message::Close(_) => return Err("stream closed".to_string()),
            _ => {}
        }
    }

    Err("stream ended".to_string())
}
