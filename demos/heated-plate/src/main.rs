use std::path::Path;

use anyhow::Context;
use heatplate::{SimulationConfig, SimulationRunner};
use log::info;

fn load_config(path: Option<String>) -> anyhow::Result<SimulationConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path))?;
            serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path))
        }
        None => Ok(SimulationConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config(std::env::args().nth(1))?;
    let runner = SimulationRunner::from_config(&config)?;
    let frames = runner.run(config.frame_count());

    info!(
        "{} frames, {} ms apart",
        frames.frame_count(),
        frames.frame_interval().as_millis()
    );

    image_util::render_frames(Path::new("out"), "heated_plate", &frames)
}
