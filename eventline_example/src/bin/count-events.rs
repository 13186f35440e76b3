use anyhow::Result;
use eventline_example::{count_fixture, logging::init_logging, settings::Settings};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let mut settings =
        Settings::load().map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    // A path on the command line overrides the configured fixture
    if let Some(path) = std::env::args_os().nth(1) {
        settings.fixture.path = path.into();
    }

    init_logging(&settings.logging);

    tracing::info!("Counting '{}' events in {}", settings.fixture.event_type, settings.fixture.path.display());

    let counts = count_fixture(&settings).await?;

    println!("line scan:               {}", counts.lines);
    println!("line scan + json:        {}", counts.lines_decoded);
    println!("event decoder:           {}", counts.events);
    println!("event decoder + json:    {}", counts.events_decoded);

    if !counts.agree() {
        tracing::warn!("consumers disagree; the line scan only understands single-line events");
    }

    Ok(())
}
