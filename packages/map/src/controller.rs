//! Load-once layer setup and visualisation switching.

use geojson::FeatureCollection;
use gorod_aggregation::{BoundaryFeature, EnrichedLayers, boundaries_only_collection};
use gorod_geometry::bounds_all;

use crate::{
    BOUNDARY_SOURCE, ColorRamp, FIT_MAX_ZOOM, FIT_PADDING, LayerId, MapError, MapSurface,
    POINT_SOURCE, VisualizationMode, layer,
};

/// What the map is loaded with.
#[derive(Debug, Clone, Copy)]
pub enum MapData<'a> {
    /// Joined boundaries and counts.
    Enriched(&'a EnrichedLayers),
    /// Boundaries only, because the counts never arrived.
    BoundariesOnly(&'a [BoundaryFeature]),
}

/// Whether the layers have been added yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Waiting for the first successful load event.
    Uninitialized,
    /// Every source and layer is on the surface.
    Loaded,
}

/// Adds the district layers once and toggles their visibility afterwards.
#[derive(Debug)]
pub struct LayerController {
    state: ControllerState,
    mode: VisualizationMode,
    ramp: ColorRamp,
    sources: Vec<&'static str>,
    layers: Vec<LayerId>,
}

impl Default for LayerController {
    fn default() -> Self {
        Self::new(ColorRamp::heat())
    }
}

impl LayerController {
    /// Creates an unloaded controller in point mode that colours the
    /// districts with `ramp`.
    #[must_use]
    pub const fn new(ramp: ColorRamp) -> Self {
        Self {
            state: ControllerState::Uninitialized,
            mode: VisualizationMode::Point,
            ramp,
            sources: Vec::new(),
            layers: Vec::new(),
        }
    }

    /// Whether [`Self::on_load`] has completed.
    #[must_use]
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// The current visualisation, applied or pending.
    #[must_use]
    pub const fn mode(&self) -> VisualizationMode {
        self.mode
    }

    /// Layers added so far, in add order.
    #[must_use]
    pub fn layers(&self) -> &[LayerId] {
        &self.layers
    }

    /// Handles the surface's load event.
    ///
    /// The first call adds the sources and layers (fill, outline, heatmap,
    /// point, label; only fill and outline for [`MapData::BoundariesOnly`])
    /// and fits the viewport. Later calls do nothing and return `false`.
    ///
    /// If the surface rejects something partway, whatever was already added
    /// stays recorded and the next call continues from there.
    ///
    /// # Errors
    ///
    /// * If the surface rejects a source or layer
    pub fn on_load(
        &mut self,
        surface: &mut impl MapSurface,
        data: MapData<'_>,
    ) -> Result<bool, MapError> {
        if self.state == ControllerState::Loaded {
            log::debug!("Map already loaded, ignoring repeated load event");
            return Ok(false);
        }

        let bounds = match data {
            MapData::Enriched(layers) => {
                let max = layers.max_value();
                self.add_source(surface, BOUNDARY_SOURCE, || layers.boundaries_collection())?;
                self.add_source(surface, POINT_SOURCE, || layers.labels_collection())?;
                self.add(surface, layer::fill_layer(Some((&self.ramp, max))))?;
                self.add(surface, layer::outline_layer())?;
                self.add(surface, layer::heatmap_layer(&self.ramp, max, self.mode))?;
                self.add(surface, layer::point_layer(self.mode))?;
                self.add(surface, layer::label_layer(self.mode))?;
                layers.bounds()
            }
            MapData::BoundariesOnly(boundaries) => {
                log::warn!("Loading map without counts; boundaries only");
                self.add_source(surface, BOUNDARY_SOURCE, || {
                    boundaries_only_collection(boundaries)
                })?;
                self.add(surface, layer::fill_layer(None))?;
                self.add(surface, layer::outline_layer())?;
                bounds_all(boundaries.iter().map(|b| &b.shape))
            }
        };

        match bounds {
            Some(bounds) => surface.fit_bounds(bounds, FIT_PADDING, FIT_MAX_ZOOM),
            None => log::warn!("No boundary coordinates, viewport left unchanged"),
        }

        self.state = ControllerState::Loaded;
        log::info!("Map loaded with {} layers in {} mode", self.layers.len(), self.mode);
        Ok(true)
    }

    /// Switches the visualisation. Before load only the mode is recorded;
    /// it is applied when the layers are added.
    ///
    /// # Errors
    ///
    /// * If the surface rejects a visibility change
    pub fn set_mode(
        &mut self,
        surface: &mut impl MapSurface,
        mode: VisualizationMode,
    ) -> Result<(), MapError> {
        self.mode = mode;
        if self.state == ControllerState::Uninitialized {
            return Ok(());
        }
        for id in &self.layers {
            surface.set_visibility(*id, id.visibility_in(mode))?;
        }
        Ok(())
    }

    /// Switches to the other visualisation and returns it.
    ///
    /// # Errors
    ///
    /// * If the surface rejects a visibility change
    pub fn toggle(&mut self, surface: &mut impl MapSurface) -> Result<VisualizationMode, MapError> {
        let mode = self.mode.toggled();
        self.set_mode(surface, mode)?;
        Ok(mode)
    }

    fn add_source(
        &mut self,
        surface: &mut impl MapSurface,
        id: &'static str,
        data: impl FnOnce() -> FeatureCollection,
    ) -> Result<(), MapError> {
        if self.sources.contains(&id) {
            log::debug!("Source '{id}' already added, skipping");
            return Ok(());
        }
        surface.add_source(id, data())?;
        self.sources.push(id);
        Ok(())
    }

    fn add(&mut self, surface: &mut impl MapSurface, spec: layer::LayerSpec) -> Result<(), MapError> {
        let id = spec.id;
        if self.layers.contains(&id) {
            log::debug!("Layer '{id}' already added, skipping");
            return Ok(());
        }
        surface.add_layer(spec)?;
        self.layers.push(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gorod_aggregation::DistrictTable;
    use gorod_district_models::{District, DistrictCounts};
    use gorod_geometry::{CentroidStrategy, Shape};

    use super::*;
    use crate::{StyleSurface, Visibility};

    fn boundaries() -> Vec<BoundaryFeature> {
        vec![
            BoundaryFeature::new(
                "Литейный округ",
                Shape::Polygon(vec![vec![[30.0, 59.0], [30.0, 60.0], [31.0, 60.0], [31.0, 59.0]]]),
            ),
            BoundaryFeature::new(
                "Нет такого",
                Shape::Polygon(vec![vec![[29.5, 59.5], [29.5, 59.8], [29.8, 59.8]]]),
            ),
        ]
    }

    fn enriched() -> EnrichedLayers {
        let counts: DistrictCounts = [(District::Tsentralny, 10)].into_iter().collect();
        EnrichedLayers::build(
            &DistrictTable::builtin(),
            &boundaries(),
            &counts,
            CentroidStrategy::default(),
        )
    }

    fn visibilities(surface: &StyleSurface) -> Vec<(LayerId, Visibility)> {
        surface.layers().iter().map(|l| (l.id, l.visibility())).collect()
    }

    #[test]
    fn load_adds_layers_in_order_and_fits_viewport() {
        let layers = enriched();
        let mut surface = StyleSurface::default();
        let mut controller = LayerController::default();

        assert!(controller.on_load(&mut surface, MapData::Enriched(&layers)).unwrap());

        let ids: Vec<_> = surface.layers().iter().map(|l| l.id).collect();
        assert_eq!(ids, LayerId::ALL);
        let viewport = surface.viewport().unwrap();
        assert_eq!(viewport.padding, FIT_PADDING);
        assert!((viewport.max_zoom - FIT_MAX_ZOOM).abs() < f64::EPSILON);
        assert!((viewport.bounds.west - 29.5).abs() < f64::EPSILON);
        assert!((viewport.bounds.north - 60.0).abs() < f64::EPSILON);
        assert_eq!(controller.state(), ControllerState::Loaded);
    }

    #[test]
    fn second_load_is_a_no_op() {
        let layers = enriched();
        let mut surface = StyleSurface::default();
        let mut controller = LayerController::default();
        controller.on_load(&mut surface, MapData::Enriched(&layers)).unwrap();

        assert!(!controller.on_load(&mut surface, MapData::Enriched(&layers)).unwrap());
        assert_eq!(surface.layers().len(), 5);
    }

    #[test]
    fn boundaries_only_adds_fill_and_outline() {
        let boundaries = boundaries();
        let mut surface = StyleSurface::default();
        let mut controller = LayerController::default();
        controller
            .on_load(&mut surface, MapData::BoundariesOnly(&boundaries))
            .unwrap();

        let ids: Vec<_> = surface.layers().iter().map(|l| l.id).collect();
        assert_eq!(ids, [LayerId::Fill, LayerId::Outline]);
        assert!(surface.layers()[0].paint["fill-color"].is_string());

        // Toggling still works with the reduced layer set.
        controller.toggle(&mut surface).unwrap();
        assert_eq!(surface.layers().len(), 2);
    }

    #[test]
    fn point_mode_shows_markers_and_hides_heat() {
        let layers = enriched();
        let mut surface = StyleSurface::default();
        let mut controller = LayerController::default();
        controller.on_load(&mut surface, MapData::Enriched(&layers)).unwrap();

        let vis = visibilities(&surface);
        assert_eq!(vis[2], (LayerId::Heatmap, Visibility::Hidden));
        assert_eq!(vis[3], (LayerId::Point, Visibility::Visible));
        assert_eq!(vis[4], (LayerId::Label, Visibility::Visible));

        controller.set_mode(&mut surface, VisualizationMode::Heatmap).unwrap();
        let vis = visibilities(&surface);
        assert_eq!(vis[2], (LayerId::Heatmap, Visibility::Visible));
        assert_eq!(vis[3], (LayerId::Point, Visibility::Hidden));
        assert_eq!(vis[4], (LayerId::Label, Visibility::Hidden));
        assert_eq!(vis[0], (LayerId::Fill, Visibility::Visible));
    }

    #[test]
    fn toggling_twice_restores_every_layer() {
        let layers = enriched();
        let mut surface = StyleSurface::default();
        let mut controller = LayerController::default();
        controller.on_load(&mut surface, MapData::Enriched(&layers)).unwrap();
        let before = visibilities(&surface);

        for _ in 0..2 {
            assert_eq!(controller.toggle(&mut surface).unwrap(), VisualizationMode::Heatmap);
            assert_eq!(controller.toggle(&mut surface).unwrap(), VisualizationMode::Point);
        }

        assert_eq!(visibilities(&surface), before);
        assert_eq!(surface.layers().len(), 5);
    }

    /// Wraps a [`StyleSurface`] and rejects the nth add (sources and
    /// layers counted together) exactly once.
    struct FlakySurface {
        inner: StyleSurface,
        adds: usize,
        fail_on: usize,
    }

    impl FlakySurface {
        fn failing_on(fail_on: usize) -> Self {
            Self {
                inner: StyleSurface::default(),
                adds: 0,
                fail_on,
            }
        }

        fn tick(&mut self) -> Result<(), MapError> {
            self.adds += 1;
            if self.adds == self.fail_on {
                return Err(MapError::Io(std::io::Error::other("surface busy")));
            }
            Ok(())
        }
    }

    impl MapSurface for FlakySurface {
        fn add_source(&mut self, id: &str, data: FeatureCollection) -> Result<(), MapError> {
            self.tick()?;
            self.inner.add_source(id, data)
        }

        fn add_layer(&mut self, layer: layer::LayerSpec) -> Result<(), MapError> {
            self.tick()?;
            self.inner.add_layer(layer)
        }

        fn set_visibility(&mut self, layer: LayerId, visibility: Visibility) -> Result<(), MapError> {
            self.inner.set_visibility(layer, visibility)
        }

        fn fit_bounds(&mut self, bounds: gorod_geometry::BoundingBox, padding: u32, max_zoom: f64) {
            self.inner.fit_bounds(bounds, padding, max_zoom);
        }
    }

    #[test]
    fn failed_load_resumes_on_retry() {
        let layers = enriched();
        let mut surface = FlakySurface::failing_on(3);
        let mut controller = LayerController::default();

        assert!(controller.on_load(&mut surface, MapData::Enriched(&layers)).is_err());
        assert_eq!(controller.state(), ControllerState::Uninitialized);
        assert_eq!(surface.inner.sources().len(), 2);
        assert!(surface.inner.layers().is_empty());

        assert!(controller.on_load(&mut surface, MapData::Enriched(&layers)).unwrap());
        assert_eq!(controller.state(), ControllerState::Loaded);
        assert_eq!(surface.inner.sources().len(), 2);
        let ids: Vec<_> = surface.inner.layers().iter().map(|l| l.id).collect();
        assert_eq!(ids, LayerId::ALL);
        assert_eq!(controller.layers(), LayerId::ALL);
        assert!(surface.inner.viewport().is_some());
    }

    #[test]
    fn failure_after_some_layers_does_not_duplicate_them() {
        let layers = enriched();
        let mut surface = FlakySurface::failing_on(5);
        let mut controller = LayerController::default();

        assert!(controller.on_load(&mut surface, MapData::Enriched(&layers)).is_err());
        assert_eq!(controller.layers(), [LayerId::Fill, LayerId::Outline]);

        controller.on_load(&mut surface, MapData::Enriched(&layers)).unwrap();
        assert_eq!(surface.inner.layers().len(), 5);
    }

    #[test]
    fn mode_chosen_before_load_is_applied_on_load() {
        let layers = enriched();
        let mut surface = StyleSurface::default();
        let mut controller = LayerController::default();
        controller.set_mode(&mut surface, VisualizationMode::Heatmap).unwrap();
        assert!(surface.layers().is_empty());

        controller.on_load(&mut surface, MapData::Enriched(&layers)).unwrap();
        assert_eq!(surface.layers()[2].visibility(), Visibility::Visible);
        assert_eq!(surface.layers()[3].visibility(), Visibility::Hidden);
    }
}
