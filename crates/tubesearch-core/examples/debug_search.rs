//! Debug script to run a search against YouTube and inspect the results
//!
//! Usage: `RUST_LOG=tubesearch_core=debug cargo run --example debug_search -- "query" [video|playlist] [limit]`

use tracing_subscriber::EnvFilter;
use tubesearch_core::{Entity, SearchOptions, SearchType, TubeScraper};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let query = args.next().unwrap_or_else(|| "never gonna give you up".to_string());
    let search_type = args.next().map(|t| SearchType::from_lossy(&t)).unwrap_or_default();
    let limit = args.next().and_then(|l| l.parse().ok()).unwrap_or(20);

    let scraper = TubeScraper::new()?;
    let options = SearchOptions {
        limit,
        search_type,
        ..Default::default()
    };

    println!("Searching {} results for '{}'...\n", search_type.as_str(), query);
    let results = scraper.search(&query, &options).await?;

    for (index, item) in results.items.iter().enumerate() {
        match item {
            Entity::Video(video) => println!(
                "{:>3}. {} [{}] {} views - {}",
                index + 1,
                video.title,
                video.duration.as_deref().unwrap_or("LIVE"),
                video.views.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string()),
                video.url
            ),
            Entity::Playlist(playlist) => println!(
                "{:>3}. {} ({} videos) - {}",
                index + 1,
                playlist.title,
                playlist.video_count,
                playlist.url
            ),
        }
    }

    println!(
        "\n{} items shown, about {} matches reported",
        results.items.len(),
        results.results
    );

    // Second search reuses the cached client version and skips the results page
    let again = scraper.search(&query, &options).await?;
    println!("Repeat search returned {} items", again.items.len());

    Ok(())
}
