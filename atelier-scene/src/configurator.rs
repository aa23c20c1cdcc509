use std::sync::Arc;
use log::{error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use atelier_core::asset_loader::ModelPart;
use atelier_core::camera::{Camera, CameraPose};
use atelier_core::collections::hashmap::HashMap;
use atelier_core::config::ConfiguratorConfig;
use atelier_core::math::{BoundingSphere, Radians};
use atelier_texture::{
    MaterialDescriptor, PatternDescriptor, Rgb, StitchingDescriptor, SurfaceImage, SurfaceMaterial, SurfaceRequest,
    Synthesizer, TextureCache, TextureKey, TextureSetLoader,
};
use crate::animator::{AnimationKind, AnimationStep, CameraAnimator};
use crate::catalog::{display_name, Catalog};
use crate::fitter::CameraFitter;
use crate::ConfiguratorError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    /// Terminal until [`Configurator::reload`].
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

/// Emissive tint marking the selected part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    pub emissive: Rgb,
    pub intensity: f32,
}

impl Highlight {
    pub const NONE: Highlight = Highlight { emissive: Rgb::BLACK, intensity: 0.0 };
    pub const SELECTED: Highlight = Highlight { emissive: Rgb::new(0x33, 0x33, 0x33), intensity: 0.2 };
}

pub struct Configurator {
    config: ConfiguratorConfig,
    catalog: Catalog,

    load_state: LoadState,
    parts: Vec<ModelPart>,
    model_bounds: Option<BoundingSphere>,

    selected_part: Option<String>,
    selected_material: usize,
    selected_pattern: usize,
    selected_stitching: usize,
    // keyed by lower-cased part name
    applied: HashMap<String, SurfaceMaterial>,

    zoom_on_click: bool,
    auto_rotate: bool,
    zoomed: bool,

    camera: Camera,
    fitter: CameraFitter,
    animator: CameraAnimator,

    synthesizer: Synthesizer,
    textures: TextureCache<TextureKey, SurfaceImage>,
    texture_sets: Option<TextureSetLoader>,
    material_sets: HashMap<String, String>,
}

impl Configurator {
    /// Fails with [`ConfiguratorError::EmptyCatalog`] when any catalog list is empty.
    pub fn new(
        config: ConfiguratorConfig,
        catalog: Catalog,
        textures: TextureCache<TextureKey, SurfaceImage>,
    ) -> Result<Self, ConfiguratorError> {
        if !catalog.is_valid() {
            return Err(ConfiguratorError::EmptyCatalog);
        }
        Ok(Self::with_catalog(config, catalog, textures))
    }

    pub fn from_config(config: ConfiguratorConfig) -> Self {
        let textures = TextureCache::new(config.texture.cache_capacity);
        Self::with_catalog(config, Catalog::default(), textures)
    }

    fn with_catalog(config: ConfiguratorConfig, catalog: Catalog, textures: TextureCache<TextureKey, SurfaceImage>) -> Self {
        let camera = Camera::new(config.camera.fov_y(), config.camera.aspect_ratio, Camera::Z_NEAR);
        Self {
            catalog,
            load_state: LoadState::Loading,
            parts: Vec::new(),
            model_bounds: None,
            selected_part: None,
            selected_material: 0,
            selected_pattern: 0,
            selected_stitching: 0,
            applied: HashMap::new(),
            zoom_on_click: config.zoom_on_click,
            auto_rotate: config.auto_rotate,
            zoomed: false,
            camera,
            fitter: CameraFitter::from_config(&config.camera),
            animator: CameraAnimator::from_config(&config.camera),
            synthesizer: Synthesizer::new(config.texture.resolution),
            textures,
            texture_sets: None,
            material_sets: HashMap::new(),
            config,
        }
    }

    /// Bind a texture set to a catalog material. Its maps are merged into
    /// every surface built from that material.
    pub fn with_texture_sets(mut self, loader: TextureSetLoader, bindings: impl IntoIterator<Item = (String, String)>) -> Self {
        self.texture_sets = Some(loader);
        self.material_sets.extend(bindings);
        self
    }

    // ---------------------------------------------------------------------
    // model lifecycle

    pub fn on_model_loaded(&mut self, parts: Vec<ModelPart>) -> Result<(), ConfiguratorError> {
        if self.load_state != LoadState::Loading {
            warn!("Model load event ignored in state {:?}", self.load_state);
            return Err(ConfiguratorError::ModelNotReady);
        }

        let Some(bounds) = parts
            .iter()
            .map(|part| part.bounds)
            .reduce(|a, b| a.union(&b))
        else {
            self.on_model_load_failed(&ConfiguratorError::EmptyModel);
            return Err(ConfiguratorError::EmptyModel);
        };

        info!("Model ready with {} parts", parts.len());
        self.parts = parts;
        self.model_bounds = Some(bounds.bounding_sphere());
        self.load_state = LoadState::Ready;

        let home = self.home_pose();
        self.animator.request(AnimationKind::Fit, home);
        Ok(())
    }

    pub fn on_model_load_failed(&mut self, error: &dyn std::fmt::Display) {
        error!("Error loading model: {}", error);
        self.load_state = LoadState::Failed(error.to_string());
    }

    /// Start over as if the page was reloaded.
    pub fn reload(&mut self) {
        info!("Reload configurator");
        self.load_state = LoadState::Loading;
        self.parts.clear();
        self.model_bounds = None;
        self.selected_part = None;
        self.selected_material = 0;
        self.selected_pattern = 0;
        self.selected_stitching = 0;
        self.applied.clear();
        self.zoomed = false;
        self.textures.clear();
        if let Some(loader) = self.texture_sets.as_mut() {
            loader.clear_cache();
        }
        self.animator.snap(self.config.camera.default_pose());
    }

    fn require_ready(&self) -> Result<(), ConfiguratorError> {
        match self.load_state {
            LoadState::Ready => Ok(()),
            _ => Err(ConfiguratorError::ModelNotReady),
        }
    }

    fn find_part(&self, name: &str) -> Result<&ModelPart, ConfiguratorError> {
        self.parts
            .iter()
            .find(|part| part.name == name)
            .ok_or_else(|| ConfiguratorError::UnknownPart { name: name.to_owned() })
    }

    // ---------------------------------------------------------------------
    // selection

    /// Pointer click on a mesh.
    pub fn click_part(&mut self, name: &str) -> Result<(), ConfiguratorError> {
        self.select_part(name)
    }

    /// Select a part and, when zoom on click is on, focus the camera on it.
    pub fn select_part(&mut self, name: &str) -> Result<(), ConfiguratorError> {
        self.require_ready()?;
        let bounds = match self.find_part(name) {
            Ok(part) => part.bounds,
            Err(e) => {
                warn!("{}", e);
                return Err(e);
            }
        };

        info!("Selected part {}", name);
        self.selected_part = Some(name.to_owned());

        if self.zoom_on_click {
            let pose = self.fitter.focus_on_part(&bounds);
            self.animator.request(AnimationKind::Focus, pose);
        }
        Ok(())
    }

    pub fn select_material(&mut self, name: &str) -> Result<(), ConfiguratorError> {
        self.selected_material = self
            .catalog
            .material_index(name)
            .ok_or_else(|| ConfiguratorError::UnknownMaterial { name: name.to_owned() })?;
        self.apply_selection_to_selected_part();
        Ok(())
    }

    pub fn select_pattern(&mut self, name: &str) -> Result<(), ConfiguratorError> {
        self.selected_pattern = self
            .catalog
            .pattern_index(name)
            .ok_or_else(|| ConfiguratorError::UnknownPattern { name: name.to_owned() })?;
        self.apply_selection_to_selected_part();
        Ok(())
    }

    pub fn select_stitching(&mut self, name: &str) -> Result<(), ConfiguratorError> {
        self.selected_stitching = self
            .catalog
            .stitching_index(name)
            .ok_or_else(|| ConfiguratorError::UnknownStitching { name: name.to_owned() })?;
        self.apply_selection_to_selected_part();
        Ok(())
    }

    fn apply_selection_to_selected_part(&mut self) {
        if let Some(part) = self.selected_part.clone() {
            let descriptor = self.selected_material().clone();
            self.apply_material(&part, &descriptor);
        }
    }

    // ---------------------------------------------------------------------
    // materials

    fn surface_request(&self, descriptor: &MaterialDescriptor) -> SurfaceRequest {
        SurfaceRequest {
            finish: descriptor.finish.clone(),
            base_color: descriptor.base_color,
            pattern: self.selected_pattern().kind,
            stitching: self.selected_stitching().kind,
            metallic: descriptor.metallic,
        }
    }

    fn surface_image(&mut self, request: SurfaceRequest) -> Arc<SurfaceImage> {
        let key = TextureKey::new(request, self.synthesizer.width(), self.config.texture.seed);
        let synthesizer = self.synthesizer;
        self.textures.get_or_insert_with(key.clone(), || {
            let mut rng = StdRng::seed_from_u64(key.seed());
            synthesizer.synthesize(&key.request, &mut rng)
        })
    }

    /// Albedo of a catalog material with the current pattern and stitching.
    pub fn material_preview(&mut self, name: &str) -> Result<Arc<SurfaceImage>, ConfiguratorError> {
        let index = self
            .catalog
            .material_index(name)
            .ok_or_else(|| ConfiguratorError::UnknownMaterial { name: name.to_owned() })?;
        let request = self.surface_request(&self.catalog.materials[index]);
        Ok(self.surface_image(request))
    }

    fn build_material(&mut self, part: &str, descriptor: &MaterialDescriptor) -> Result<SurfaceMaterial, ConfiguratorError> {
        self.require_ready()?;
        self.find_part(part)?;

        let request = self.surface_request(descriptor);
        let color_map = self.surface_image(request).shared_image();
        let mut material = SurfaceMaterial::from_descriptor(descriptor, Some(color_map), self.config.texture.map_repeat);

        if let (Some(loader), Some(set)) = (self.texture_sets.as_mut(), self.material_sets.get(&descriptor.name)) {
            material = material.with_texture_set(&loader.load(set)?);
        }
        Ok(material)
    }

    /// Bind `descriptor` to `part`. Failures are logged and leave the part's
    /// current material in place.
    pub fn apply_material(&mut self, part: &str, descriptor: &MaterialDescriptor) -> bool {
        match self.build_material(part, descriptor) {
            Ok(material) => {
                info!("Applied {} to {}", descriptor.name, part);
                self.applied.insert(part.to_lowercase(), material);
                true
            }
            Err(e) => {
                error!("Error applying material {} to {}: {}", descriptor.name, part, e);
                false
            }
        }
    }

    pub fn applied_material(&self, part: &str) -> Option<&SurfaceMaterial> {
        self.applied.get(&part.to_lowercase())
    }

    // ---------------------------------------------------------------------
    // resets

    /// Clear the selection, keep the camera where it is.
    pub fn reset_selection(&mut self) {
        self.selected_part = None;
    }

    /// Back to the full view. Interrupts any running camera animation.
    pub fn reset_zoom(&mut self) {
        self.selected_part = None;
        self.zoomed = false;
        let home = self.home_pose();
        self.animator.request(AnimationKind::Reset, home);
    }

    pub fn reset_materials(&mut self) {
        self.applied.clear();
    }

    pub fn reset_all(&mut self) {
        self.reset_materials();
        self.reset_zoom();
        self.selected_material = 0;
        self.selected_pattern = 0;
        self.selected_stitching = 0;
    }

    pub fn set_zoom_on_click(&mut self, enabled: bool) {
        self.zoom_on_click = enabled;
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.auto_rotate = enabled;
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.camera.set_aspect_ratio(aspect_ratio);
    }

    /// User orbit controls. Ignored while the camera is animating.
    pub fn orbit_camera(&mut self, pose: CameraPose) -> bool {
        self.animator.set_pose(pose)
    }

    // ---------------------------------------------------------------------
    // frame

    /// Per-frame callback from the render loop.
    pub fn frame(&mut self, delta_time: f32) -> AnimationStep {
        let step = self.animator.advance();
        match step {
            AnimationStep::Finished(AnimationKind::Focus) => self.zoomed = true,
            AnimationStep::Finished(AnimationKind::Reset | AnimationKind::Fit) => self.zoomed = false,
            AnimationStep::Idle if self.auto_rotate => {
                self.animator.orbit(Radians::from(self.config.camera.auto_rotate_speed * delta_time));
            }
            _ => {}
        }

        self.camera.set_pose(self.animator.pose());
        step
    }

    // ---------------------------------------------------------------------
    // queries

    /// Whole model fit when a model is loaded, otherwise the configured default.
    pub fn home_pose(&self) -> CameraPose {
        match &self.model_bounds {
            Some(sphere) => self.fitter.fit_to_bounds(sphere),
            None => self.config.camera.default_pose(),
        }
    }

    pub fn config(&self) -> &ConfiguratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn parts(&self) -> &[ModelPart] {
        &self.parts
    }

    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(|part| part.name.as_str()).collect()
    }

    /// `seat_back` is listed as `Seat Back`.
    pub fn part_display_names(&self) -> Vec<String> {
        self.parts.iter().map(|part| display_name(&part.name)).collect()
    }

    pub fn model_bounds(&self) -> Option<BoundingSphere> {
        self.model_bounds
    }

    pub fn selected_part(&self) -> Option<&str> {
        self.selected_part.as_deref()
    }

    pub fn selected_material(&self) -> &MaterialDescriptor {
        &self.catalog.materials[self.selected_material]
    }

    pub fn selected_pattern(&self) -> &PatternDescriptor {
        &self.catalog.patterns[self.selected_pattern]
    }

    pub fn selected_stitching(&self) -> &StitchingDescriptor {
        &self.catalog.stitchings[self.selected_stitching]
    }

    /// Name and finish description of the selected material.
    pub fn material_info(&self) -> (&str, &'static str) {
        let material = self.selected_material();
        (&material.name, material.finish.description())
    }

    pub fn highlight(&self, part: &str) -> Highlight {
        if self.selected_part.as_deref() == Some(part) {
            Highlight::SELECTED
        } else {
            Highlight::NONE
        }
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn zoom_on_click(&self) -> bool {
        self.zoom_on_click
    }

    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_pose(&self) -> CameraPose {
        self.animator.pose()
    }

    pub fn animator(&self) -> &CameraAnimator {
        &self.animator
    }

    pub fn texture_cache(&self) -> &TextureCache<TextureKey, SurfaceImage> {
        &self.textures
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use atelier_core::math::Aabb;
    use atelier_texture::SynthesisPass;
    use super::*;

    fn config() -> ConfiguratorConfig {
        let mut config = ConfiguratorConfig::default();
        config.texture.resolution = 64;
        config
    }

    fn chair_parts() -> Vec<ModelPart> {
        vec![
            ModelPart::new("seat", Aabb::from_min_max(Vec3::new(-0.5, 0.4, -0.5), Vec3::new(0.5, 0.6, 0.5))),
            ModelPart::new("backrest", Aabb::from_min_max(Vec3::new(-0.5, 0.6, -0.6), Vec3::new(0.5, 1.4, -0.4))),
            ModelPart::new("leg_front_left", Aabb::from_min_max(Vec3::new(-0.5, 0.0, 0.4), Vec3::new(-0.4, 0.4, 0.5))),
        ]
    }

    fn loaded() -> Configurator {
        let mut configurator = Configurator::from_config(config());
        configurator.on_model_loaded(chair_parts()).unwrap();
        settle(&mut configurator);
        configurator
    }

    fn settle(configurator: &mut Configurator) -> Option<AnimationKind> {
        for _ in 0..1000 {
            match configurator.frame(1.0 / 60.0) {
                AnimationStep::Finished(kind) => return Some(kind),
                AnimationStep::Idle => return None,
                AnimationStep::Moved { .. } => {}
            }
        }
        panic!("camera never settled");
    }

    #[test]
    fn model_load_fits_whole_model() {
        let mut configurator = Configurator::from_config(config());
        assert!(configurator.is_loading());
        assert!(matches!(configurator.select_part("seat"), Err(ConfiguratorError::ModelNotReady)));

        configurator.on_model_loaded(chair_parts()).unwrap();
        assert_eq!(configurator.load_state(), &LoadState::Ready);
        assert_eq!(configurator.part_names(), vec!["seat", "backrest", "leg_front_left"]);
        assert_eq!(configurator.part_display_names()[2], "Leg Front Left");
        assert_eq!(settle(&mut configurator), Some(AnimationKind::Fit));

        let sphere = configurator.model_bounds().unwrap();
        let fitter = CameraFitter::from_config(&configurator.config().camera);
        assert!(configurator.camera_pose().abs_diff_eq(&fitter.fit_to_bounds(&sphere), 1e-5));
        assert_eq!(configurator.camera().location(), configurator.camera_pose().position);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let empty_materials = Catalog { materials: Vec::new(), ..Catalog::default() };
        let result = Configurator::new(config(), empty_materials, TextureCache::new(4));
        assert!(matches!(result, Err(ConfiguratorError::EmptyCatalog)));

        let empty_stitchings = Catalog { stitchings: Vec::new(), ..Catalog::default() };
        assert!(Configurator::new(config(), empty_stitchings, TextureCache::new(4)).is_err());

        let mut configurator = Configurator::new(config(), Catalog::default(), TextureCache::new(4)).unwrap();
        assert_eq!(configurator.material_info().0, "Anchorage");
        configurator.reset_all();
        assert_eq!(configurator.selected_stitching().name, "None");
    }

    #[test]
    fn empty_model_fails_until_reload() {
        let mut configurator = Configurator::from_config(config());
        assert!(matches!(configurator.on_model_loaded(Vec::new()), Err(ConfiguratorError::EmptyModel)));
        assert!(matches!(configurator.load_state(), LoadState::Failed(_)));
        assert!(configurator.on_model_loaded(chair_parts()).is_err());

        configurator.reload();
        assert!(configurator.is_loading());
        configurator.on_model_loaded(chair_parts()).unwrap();
        assert_eq!(configurator.load_state(), &LoadState::Ready);
    }

    #[test]
    fn click_seat_then_reset_zoom() {
        let mut configurator = loaded();
        let home = configurator.camera_pose();

        configurator.click_part("seat").unwrap();
        assert_eq!(configurator.selected_part(), Some("seat"));
        assert_eq!(configurator.highlight("seat"), Highlight::SELECTED);
        assert_eq!(configurator.highlight("backrest"), Highlight::NONE);

        let seat = chair_parts()[0].bounds;
        let focus = CameraFitter::from_config(&configurator.config().camera).focus_on_part(&seat);
        assert_eq!(configurator.animator().destination(), Some(focus));

        // first frame moves toward the seat
        configurator.frame(1.0 / 60.0);
        let moved = configurator.camera_pose();
        assert!(moved.position.distance(focus.position) < home.position.distance(focus.position));

        assert_eq!(settle(&mut configurator), Some(AnimationKind::Focus));
        assert!(configurator.is_zoomed());
        assert_eq!(configurator.camera_pose(), focus);

        configurator.reset_zoom();
        assert_eq!(configurator.selected_part(), None);
        assert_eq!(settle(&mut configurator), Some(AnimationKind::Reset));
        assert!(!configurator.is_zoomed());
        assert!(configurator.camera_pose().abs_diff_eq(&home, 1e-5));
    }

    #[test]
    fn click_without_zoom_only_selects() {
        let mut configurator = loaded();
        let home = configurator.camera_pose();
        configurator.set_zoom_on_click(false);

        configurator.click_part("backrest").unwrap();
        assert_eq!(configurator.selected_part(), Some("backrest"));
        assert!(!configurator.animator().is_animating());
        assert_eq!(settle(&mut configurator), None);
        assert_eq!(configurator.camera_pose(), home);
    }

    #[test]
    fn reset_zoom_interrupts_focus() {
        let mut configurator = loaded();
        configurator.click_part("seat").unwrap();
        for _ in 0..5 {
            configurator.frame(1.0 / 60.0);
        }

        // a second focus while busy is dropped, a reset is not
        configurator.click_part("backrest").unwrap();
        assert_eq!(configurator.animator().destination().unwrap().target, chair_parts()[0].bounds.center);

        configurator.reset_zoom();
        assert_eq!(configurator.animator().destination(), Some(configurator.home_pose()));
        assert_eq!(settle(&mut configurator), Some(AnimationKind::Reset));
    }

    #[test]
    fn unknown_part_is_rejected() {
        let mut configurator = loaded();
        assert!(matches!(configurator.click_part("ottoman"), Err(ConfiguratorError::UnknownPart { .. })));
        assert_eq!(configurator.selected_part(), None);
    }

    #[test]
    fn selecting_material_applies_to_selected_part() {
        let mut configurator = loaded();

        // nothing selected, nothing applied
        configurator.select_material("Marlin").unwrap();
        assert!(configurator.applied_material("seat").is_none());

        configurator.click_part("seat").unwrap();
        configurator.select_material("Burgundy").unwrap();

        let material = configurator.applied_material("SEAT").unwrap();
        assert_eq!(material.color, Rgb::new(0x7c, 0x2d, 0x12));
        assert_eq!(material.roughness, 0.3);
        assert_eq!(material.map_repeat, [2.0, 2.0]);
        assert_eq!(configurator.material_info(), ("Burgundy", "High-performance faux leather with classic grain"));
        assert!(configurator.applied_material("backrest").is_none());
    }

    #[test]
    fn applying_same_descriptor_is_idempotent() {
        let mut configurator = loaded();
        let descriptor = configurator.catalog().materials[2].clone();

        assert!(configurator.apply_material("seat", &descriptor));
        let first = configurator.applied_material("seat").unwrap().clone();
        assert!(configurator.apply_material("seat", &descriptor));
        let second = configurator.applied_material("seat").unwrap();

        assert!(first.looks_like(second));
        assert_eq!(configurator.texture_cache().len(), 1);
    }

    #[test]
    fn failed_apply_keeps_previous_material() {
        let mut configurator = loaded();
        let marlin = configurator.catalog().materials[2].clone();
        assert!(configurator.apply_material("seat", &marlin));
        assert!(!configurator.apply_material("ottoman", &marlin));
        assert!(configurator.applied_material("ottoman").is_none());

        configurator.reload();
        assert!(!configurator.apply_material("seat", &marlin));
    }

    #[test]
    fn pattern_change_only_touches_selected_part() {
        let mut configurator = loaded();
        let leon = configurator.catalog().materials[1].clone();
        assert!(configurator.apply_material("seat", &leon));
        assert!(configurator.apply_material("backrest", &leon));
        let backrest_before = configurator.applied_material("backrest").unwrap().clone();
        let seat_before = configurator.applied_material("seat").unwrap().clone();

        configurator.click_part("seat").unwrap();
        configurator.select_material("Leon").unwrap();
        configurator.select_pattern("Quilted").unwrap();

        let seat_after = configurator.applied_material("seat").unwrap();
        let backrest_after = configurator.applied_material("backrest").unwrap();
        assert!(!seat_after.looks_like(&seat_before));
        assert!(Arc::ptr_eq(
            backrest_after.color_map.as_ref().unwrap(),
            backrest_before.color_map.as_ref().unwrap(),
        ));
        assert_eq!(
            backrest_after.color_map.as_ref().unwrap().as_raw(),
            backrest_before.color_map.as_ref().unwrap().as_raw(),
        );
    }

    #[test]
    fn leather_diamond_cross_preview() {
        let mut configurator = loaded();
        configurator.select_pattern("Diamond").unwrap();
        configurator.select_stitching("Cross").unwrap();

        let preview = configurator.material_preview("Marlin").unwrap();
        assert_eq!(preview.passes(), &[SynthesisPass::Finish, SynthesisPass::Pattern, SynthesisPass::Stitching]);
        assert!(!preview.is_uniform());
        assert_eq!(preview.width(), 64);

        assert!(matches!(configurator.select_pattern("Plaid"), Err(ConfiguratorError::UnknownPattern { .. })));
        assert_eq!(configurator.selected_pattern().name, "Diamond");
    }

    #[test]
    fn reset_all_restores_defaults() {
        let mut configurator = loaded();
        configurator.click_part("seat").unwrap();
        configurator.select_material("Cream").unwrap();
        configurator.select_pattern("Perforated").unwrap();
        configurator.select_stitching("Zigzag").unwrap();
        assert!(configurator.applied_material("seat").is_some());

        configurator.reset_all();
        assert!(configurator.applied_material("seat").is_none());
        assert_eq!(configurator.selected_part(), None);
        assert_eq!(configurator.selected_material().name, "Anchorage");
        assert_eq!(configurator.selected_pattern().name, "None");
        assert_eq!(configurator.selected_stitching().name, "None");
        assert_eq!(settle(&mut configurator), Some(AnimationKind::Reset));
    }

    #[test]
    fn reset_selection_and_materials_are_independent() {
        let mut configurator = loaded();
        configurator.set_zoom_on_click(false);
        configurator.click_part("seat").unwrap();
        configurator.select_material("Leon").unwrap();

        configurator.reset_materials();
        assert!(configurator.applied_material("seat").is_none());
        assert_eq!(configurator.selected_part(), Some("seat"));

        configurator.reset_selection();
        assert_eq!(configurator.selected_part(), None);
    }

    #[test]
    fn auto_rotate_orbits_when_idle() {
        let mut configurator = loaded();
        let before = configurator.camera_pose();

        configurator.set_auto_rotate(true);
        configurator.frame(0.5);
        let after = configurator.camera_pose();

        assert_ne!(after.position, before.position);
        assert_eq!(after.target, before.target);
        assert!((after.distance() - before.distance()).abs() < 1e-4);

        assert!(configurator.orbit_camera(before));
        assert_eq!(configurator.camera_pose(), before);
        configurator.click_part("seat").unwrap();
        assert!(!configurator.orbit_camera(before));
    }

    #[test]
    fn texture_set_maps_merge_into_material() {
        use image::{Rgba, RgbaImage};
        use atelier_texture::MapKind;

        let root = std::env::temp_dir().join(format!("atelier-scene-sets-{}", std::process::id()));
        let dir = root.join("oak");
        std::fs::create_dir_all(&dir).unwrap();
        for map in [MapKind::Color, MapKind::Normal] {
            RgbaImage::from_pixel(4, 4, Rgba([120, 120, 255, 255])).save(dir.join(map.file_name())).unwrap();
        }

        let mut configurator = Configurator::from_config(config())
            .with_texture_sets(TextureSetLoader::new(&root, TextureCache::new(8)), [("Leon".to_owned(), "oak".to_owned())]);
        configurator.on_model_loaded(chair_parts()).unwrap();

        let leon = configurator.catalog().materials[1].clone();
        let marlin = configurator.catalog().materials[2].clone();
        assert!(configurator.apply_material("seat", &leon));
        assert!(configurator.apply_material("backrest", &marlin));

        let seat = configurator.applied_material("seat").unwrap();
        assert!(seat.normal_map.is_some());
        assert_eq!(seat.color_map.as_ref().unwrap().width(), 64);
        assert!(configurator.applied_material("backrest").unwrap().normal_map.is_none());

        std::fs::remove_dir_all(root).unwrap();
    }
}
