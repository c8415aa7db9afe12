mod app;
mod effects;
mod logging;
mod render;

use docassist_client::ClientSettings;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);

    let base_url = std::env::var("DOCASSIST_BASE_URL")
        .ok()
        .or_else(|| std::env::args().nth(1))
        .unwrap_or_else(|| "http://localhost:5000".to_string());

    app::run(ClientSettings::new(base_url))
}
