//! Simple example of using proxyfox.

use proxyfox::{PoolConfig, Protocol, ProxyFetcher, ProxyFilter, ProxyPool, ProxySource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let fetcher = ProxyFetcher::with_defaults()?;

    println!("=== Fast Proxies ===");
    for proxy in fetcher.fastest(5, None).await {
        println!("{}", proxy);
    }

    println!("\n=== Fast HTTPS Proxies ===");
    for proxy in fetcher.https_only(Some(1000)).await.iter().take(5) {
        println!("{}", proxy);
    }

    println!("\n=== Fast HTTPS Proxies from United Kingdom ===");
    for proxy in fetcher
        .by_country("UK", Some(1000), Some(Protocol::Https))
        .await
        .iter()
        .take(5)
    {
        println!("{}", proxy);
    }

    println!("\n=== Refreshing pool ===");
    let config = PoolConfig::builder()
        .size(5)
        .refresh_interval_secs(300)
        .filter(ProxyFilter::new().max_speed_ms(1000).protocol(Protocol::Http))
        .build();
    let pool = ProxyPool::new(fetcher, config).await;

    println!("Pooled: {:?}", pool.all());
    match pool.take().await {
        Some(proxy) => println!("Took: {}", proxy),
        None => println!("No proxy available"),
    }

    pool.stop().await;
    Ok(())
}
