//! Debug script to inspect a series page and resolve one episode
//!
//! Run with: cargo run --example debug_series -p donyaye-core -- true-detective 1 2

use donyaye_core::parser::{parse_season_directories, season_label};
use donyaye_core::{Config, DonyayeSerial, MediaKind, Provider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let slug = args.next().unwrap_or_else(|| "true-detective".to_string());
    let season: u32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(1);
    let episode: u32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(1);

    let config = Config::from_env();
    let provider = DonyayeSerial::new(&config)?;

    println!("Fetching series page for '{}'...\n", slug);
    let Some(page) = provider.fetch_detail_page(MediaKind::Series, &slug).await else {
        println!("Could not fetch the series page!");
        return Ok(());
    };

    std::fs::write("debug_series.html", &page)?;
    println!("HTML saved to debug_series.html");

    let imdb_id = provider.resolve_external_id(&page).await;
    println!("IMDb id: {}\n", imdb_id.as_deref().unwrap_or("<none>"));

    let label = season_label(season);
    let directories = parse_season_directories(&page, &label)?;
    println!("Found {} directories for {}:\n", directories.len(), label);
    for (i, directory) in directories.iter().enumerate() {
        println!("{}. {}", i + 1, directory.title);
        println!("   URL: {}", directory.url);
    }

    let external_ref = format!("{}:{}:{}", imdb_id.unwrap_or_default(), season, episode);
    println!("\nResolving streams for {}...\n", external_ref);

    let streams = provider
        .resolve_streams(MediaKind::Series, &external_ref, &page, &slug)
        .await;
    if streams.is_empty() {
        println!("No streams found!");
    }
    for stream in &streams {
        println!("{}", stream.title);
        println!("   {}", stream.url);
    }

    Ok(())
}
