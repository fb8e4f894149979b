use tvdb_core::{ClientConfig, Tvdb};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let api_key = std::env::var("TVDB_API_KEY")?;

    let mut config = ClientConfig::new(api_key);
    config.cache_dir = Some(std::env::temp_dir().join("tvdb-cache"));
    let db = Tvdb::new(config).await?;

    println!("Searching for 'Dexter'...\n");

    let mut search = db.search("Dexter", "en", true).await?;

    println!("Found {} results:", search.len());
    for (i, show) in search.iter().enumerate() {
        println!("  {}. {} (ID: {})", i + 1, show.series_name()?, show.series_id()?);
    }

    let show = search.get_mut(0)?;
    println!("\nLoading full data for: {}\n", show.series_name()?);

    show.update().await?;

    println!("Seasons: {}", show.num_seasons().await?);
    for season in show.seasons().await? {
        println!("  Season {} - {} episodes", season.season_number(), season.len());
    }

    let season_one = show.season(1).await?;
    println!("\nEpisodes of season 1:\n");
    for ep in season_one {
        let aired = ep
            .first_aired()
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unaired".to_string());
        println!("  S{:02}E{:02} {} [{}]", ep.season_number()?, ep.episode_number()?, ep.name()?, aired);
    }

    Ok(())
}
