pub mod consumers;
pub mod logging;
pub mod settings;

use std::path::Path;

use anyhow::{Context, Result};
use eventline::payload::EventTypeFilter;
use tokio::fs::File;

use consumers::Counts;
use settings::Settings;

/// Run all four consumers over the fixture, each on a freshly opened file.
pub async fn count_fixture(settings: &Settings) -> Result<Counts> {
    let path = settings.fixture.path.as_path();
    let filter = EventTypeFilter::new(&settings.fixture.event_type);
    let decoder = &settings.decoder;

    let counts = Counts {
        lines: consumers::count_lines(open(path).await?, &filter).await?,
        lines_decoded: consumers::count_lines_decoded(open(path).await?, &filter).await?,
        events: consumers::count_events(open(path).await?, decoder.clone(), &filter).await?,
        events_decoded: consumers::count_events_decoded(open(path).await?, decoder.clone(), &filter)
            .await?,
    };

    tracing::info!(
        path = %path.display(),
        event_type = %filter.event_type(),
        lines = counts.lines,
        lines_decoded = counts.lines_decoded,
        events = counts.events,
        events_decoded = counts.events_decoded,
        "fixture consumed"
    );

    Ok(counts)
}

async fn open(path: &Path) -> Result<File> {
    File::open(path)
        .await
        .with_context(|| format!("Failed to open fixture {}", path.display()))
}
