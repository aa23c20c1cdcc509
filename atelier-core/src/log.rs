pub use log::{trace, debug, info, warn, error};

pub fn initialize() -> Result<(), anyhow::Error> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .filter_module("gltf", log::LevelFilter::Warn)
        .filter_module("png", log::LevelFilter::Warn)
        .parse_default_env()
        .try_init()?;

    Ok(())
}
