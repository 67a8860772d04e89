//! Debug script to see how each search mirror answers right now
//!
//! Usage: cargo run -p nicolite-core --example probe_mirrors -- "初音ミク"

use nicolite_core::{AttemptOutcome, ClientConfig, NicoClient, SearchQuery};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let keywords = std::env::args().nth(1).unwrap_or_else(|| "初音ミク".to_string());
    let query = SearchQuery::from_params(&keywords, Some("3"), None, None)?;
    let params = query.to_params();

    let config = ClientConfig::default();
    let client = NicoClient::with_config(config.clone())?;

    for host in &config.search_hosts {
        match client.search_once(host, &params).await {
            AttemptOutcome::Success(body) => {
                let page = body.into_page(0);
                println!("{host}: ok, {} total", page.total_count);
                for item in page.items {
                    println!("  {:?} {:?}", item.id, item.title);
                }
            }
            AttemptOutcome::Retryable(status) => println!("{host}: blocked ({status})"),
            AttemptOutcome::Fatal(status) => println!("{host}: error ({status})"),
            AttemptOutcome::NetworkError(message) => println!("{host}: unreachable: {message}"),
        }
    }

    Ok(())
}
