use backoffice::services::binance::PriceFeed;

#[tokio::test]
async fn price_for_is_unavailable_until_a_trade_arrives() {
    let feed = PriceFeed::new();
    assert_eq!(feed.price_for("BTCUSDT").await, None);

    feed.set("BTCUSDT", 65000.5).await;
    assert_eq!(feed.price_for("BTCUSDT").await, Some(65000.5));
}

#[tokio::test]
async fn lookups_are_case_insensitive_on_symbol() {
    let feed = PriceFeed::new();
    feed.set("ethusdt", 3200.0).await;

    assert_eq!(feed.price_for("ETHUSDT").await, Some(3200.0));
    assert_eq!(feed.price_for("EthUsdt").await, Some(3200.0));
}

#[tokio::test]
async fn snapshot_reflects_the_latest_price_per_symbol() {
    let feed = PriceFeed::new();
    feed.set("BTCUSDT", 64000.0).await;
    feed.set("BTCUSDT", 64100.0).await;
    feed.set("SOLUSDT", 150.0).await;

    let snap = feed.snapshot().await;
    assert_eq!(snap.len(), 2);
    assert_eq!(snap.get("BTCUSDT"), Some(&64100.0));
    assert_eq!(snap.get("SOLUSDT"), Some(&150.0));
}
