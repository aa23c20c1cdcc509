use std::collections::VecDeque;
use std::path::PathBuf;
use glam::Vec3;
use log::{error, info};
use atelier::asset_loader::ModelPart;
use atelier::math::Aabb;
use atelier::{launch, load_model, display_name, AnimationStep, App, Configurator};

#[derive(Debug, Clone, Copy)]
enum Action {
    Click(&'static str),
    Material(&'static str),
    Pattern(&'static str),
    Stitching(&'static str),
    ResetZoom,
    Export,
}

const SCRIPT: &[Action] = &[
    Action::Click("seat"),
    Action::Material("Marlin"),
    Action::Pattern("Diamond"),
    Action::Stitching("Cross"),
    Action::Click("backrest"),
    Action::Material("Burgundy"),
    Action::Pattern("Quilted"),
    Action::Export,
    Action::ResetZoom,
];

struct Options {
    config: Option<PathBuf>,
    model: Option<PathBuf>,
    output: PathBuf,
}

impl Options {
    fn from_args() -> Result<Self, anyhow::Error> {
        let mut options = Options {
            config: None,
            model: None,
            output: PathBuf::from("atelier-output"),
        };

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            let mut value = || args.next().ok_or_else(|| anyhow::anyhow!("missing value for {}", arg));
            match arg.as_str() {
                "--config" => options.config = Some(PathBuf::from(value()?)),
                "--model" => options.model = Some(PathBuf::from(value()?)),
                "--out" => options.output = PathBuf::from(value()?),
                _ => anyhow::bail!("unknown argument `{}`, expected --config, --model or --out", arg),
            }
        }
        Ok(options)
    }
}

fn sample_chair() -> Vec<ModelPart> {
    let part = |name: &str, min: Vec3, max: Vec3| ModelPart::new(name, Aabb::from_min_max(min, max));
    vec![
        part("seat", Vec3::new(-0.45, 0.4, -0.45), Vec3::new(0.45, 0.55, 0.45)),
        part("backrest", Vec3::new(-0.45, 0.55, -0.5), Vec3::new(0.45, 1.3, -0.38)),
        part("armrest_left", Vec3::new(-0.55, 0.55, -0.4), Vec3::new(-0.45, 0.75, 0.4)),
        part("armrest_right", Vec3::new(0.45, 0.55, -0.4), Vec3::new(0.55, 0.75, 0.4)),
        part("base", Vec3::new(-0.3, 0.0, -0.3), Vec3::new(0.3, 0.4, 0.3)),
    ]
}

struct ShowroomApp {
    script: VecDeque<Action>,
    output: PathBuf,
}

impl ShowroomApp {
    fn perform(&self, configurator: &mut Configurator, action: Action) -> Result<(), anyhow::Error> {
        info!("Script: {:?}", action);
        match action {
            Action::Click(part) => configurator.click_part(part)?,
            Action::Material(name) => configurator.select_material(name)?,
            Action::Pattern(name) => configurator.select_pattern(name)?,
            Action::Stitching(name) => configurator.select_stitching(name)?,
            Action::ResetZoom => configurator.reset_zoom(),
            Action::Export => self.export(configurator)?,
        }
        Ok(())
    }

    fn export(&self, configurator: &mut Configurator) -> Result<(), anyhow::Error> {
        std::fs::create_dir_all(&self.output)?;

        let names: Vec<String> = configurator.catalog().materials.iter().map(|m| m.name.clone()).collect();
        for name in names {
            let preview = configurator.material_preview(&name)?;
            let path = self.output.join(format!("{}.png", name.to_lowercase().replace(' ', "_")));
            std::fs::write(&path, preview.encode_png()?)?;
            info!("Wrote {:?}", path);
        }

        for part in configurator.part_names() {
            match configurator.applied_material(part) {
                Some(material) => info!("{}: {} roughness {}", display_name(part), material.color, material.roughness),
                None => info!("{}: default material", display_name(part)),
            }
        }
        Ok(())
    }
}

impl App for ShowroomApp {
    fn init(configurator: &mut Configurator) -> Result<Self, anyhow::Error> {
        let options = Options::from_args()?;

        match &options.model {
            Some(path) => {
                load_model(configurator, path);
            }
            None => {
                info!("No model given, using the sample chair");
                configurator.on_model_loaded(sample_chair())?;
            }
        }

        Ok(Self {
            script: SCRIPT.iter().copied().collect(),
            output: options.output,
        })
    }

    fn update(&mut self, configurator: &mut Configurator, step: AnimationStep, _delta_time: f32) -> bool {
        if !configurator.load_state().is_ready() {
            error!("Model is not available: {:?}", configurator.load_state());
            return false;
        }

        if matches!(step, AnimationStep::Moved { .. }) {
            return true;
        }

        match self.script.pop_front() {
            Some(action) => {
                if let Err(e) = self.perform(configurator, action) {
                    error!("Script action {:?} failed: {}", action, e);
                }
                true
            }
            None => configurator.animator().is_animating(),
        }
    }
}

fn main() {
    let config = std::env::args()
        .skip_while(|arg| arg != "--config")
        .nth(1)
        .map(PathBuf::from);

    let result = launch::<ShowroomApp>(config.as_deref()).and_then(|main_loop| main_loop.run());
    if let Err(e) = result {
        eprintln!("atelier sandbox failed: {:?}", e);
        std::process::exit(1);
    }
}
