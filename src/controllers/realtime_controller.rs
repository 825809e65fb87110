use std::{convert::Infallible, time::Duration};

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures_util::stream::Stream;
use serde_json::{json, Value};
use tokio::sync::broadcast::error::RecvError;

use crate::AppState;

// GET /api/orders/stream
//
// One SSE channel per open dashboard page. Delivery is best-effort: a
// lagged or closed receiver shows up as a ping and the page falls back to
// its next full list fetch.
pub async fn sse_orders(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.events_tx.subscribe();

    let stream = futures_util::stream::unfold(rx, |mut rx| async {
        let evt = match rx.recv().await {
            Ok(payload) => Event::default().event("orderUpdated").data(payload),
            Err(RecvError::Lagged(_)) => Event::default().event("ping").data("lagged"),
            Err(RecvError::Closed) => Event::default().event("ping").data("closed"),
        };

        Some((Ok(evt), rx))
    });

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(20))
            .text("keep-alive"),
    )
}

// GET /api/prices
pub async fn get_prices(State(state): State<AppState>) -> Json<Value> {
    let prices = state.prices.snapshot().await;
    Json(json!({ "ok": true, "prices": prices }))
}
