use anyhow::Context;
use articulate::{ViewerApp, ViewerConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let app = ViewerApp::new(ViewerConfig::default()).context("failed to start the viewer")?;
    app.run().context("viewer exited with an error")?;
    Ok(())
}
