use std::path::Path;
use std::time::{Duration, Instant};
use log::info;
use atelier_core::config::ConfiguratorConfig;
use atelier_scene::Configurator;
use crate::app::App;

const FRAME_TIME: Duration = Duration::from_micros(16_667);

pub struct FrameLoop<A> {
    configurator: Configurator,
    app: A,
}

impl<A: App> FrameLoop<A> {
    pub(super) fn new(config_path: Option<&Path>) -> Result<Self, anyhow::Error> {
        atelier_core::log::initialize()?;

        let config = match config_path {
            Some(path) => {
                info!("Load config from {:?}", path);
                ConfiguratorConfig::load(path)?
            }
            None => ConfiguratorConfig::default(),
        };

        let mut configurator = Configurator::from_config(config);
        let app = A::init(&mut configurator)?;

        Ok(Self {
            configurator,
            app,
        })
    }

    pub fn configurator(&self) -> &Configurator {
        &self.configurator
    }

    /// Drive frames at a fixed pace until the app asks to stop.
    pub fn run(self) -> Result<(), anyhow::Error> {
        let mut configurator = self.configurator;
        let mut app = self.app;

        let mut should_exit = false;
        let mut frame_count = 0u64;
        let mut total_frames = 0u64;
        let mut last_tick = Instant::now();
        let mut last_time_printed = last_tick;

        while !should_exit {
            let delta_time = {
                let now = Instant::now();
                let delta_time = now - last_tick;
                last_tick = now;

                let last_time_print_elapsed = (now - last_time_printed).as_secs_f32();
                if last_time_print_elapsed > 1. {
                    info!("Frame rate: {} fps", frame_count as f32 / last_time_print_elapsed);
                    last_time_printed = now;
                    frame_count = 0;
                }

                delta_time.as_secs_f32()
            };

            let step = configurator.frame(delta_time);
            should_exit = !app.update(&mut configurator, step, delta_time);

            frame_count += 1;
            total_frames += 1;

            let elapsed = last_tick.elapsed();
            if elapsed < FRAME_TIME {
                std::thread::sleep(FRAME_TIME - elapsed);
            }
        }

        info!("Frame loop finished after {} frames", total_frames);
        Ok(())
    }
}
