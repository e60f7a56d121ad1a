use anyhow::Context;

use shelf_app::controller::App;
use shelf_app::shell::Shell;
use shelf_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Shelf settings")?;
    shelf_telemetry::init(&settings.telemetry);

    tracing::info!(
        env = ?settings.environment,
        api = %settings.api.base_url,
        "shelf bootstrap starting"
    );

    let app = App::new(&settings).context("failed to build API client")?;
    let mut shell = Shell::new(app, &settings.api.base_url);
    shell.run().await
}
