// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine: view sync, render tier selection and gesture routing.

use globe_core::{
    GlobeConfig, Projection, ProjectionType, RenderExtent, ViewState, calculate_scale,
};
use globe_geodata::{GeoDataError, LoadState};
use globe_interaction::{
    GestureOutcome, InputResponse, PointerEvent, ResponsiveSizer, TouchEvent, TrackballController,
    WheelEvent, ZoomController,
};
use kurbo::Size;
use tracing::{debug, error, trace};

use crate::export::SvgExport;
use crate::mark::MarkDiff;
use crate::pipeline::RenderPipeline;
use crate::surface::{SvgSurface, VectorSurface};
use crate::theme::Theme;

/// Receives view changes produced by gestures.
///
/// The caller owns the [`ViewState`]; the engine never writes it directly. After reporting, the
/// caller passes the updated state back through [`Globe::sync`].
pub trait ViewStateSink {
    /// A drag moved the central meridian.
    fn on_meridian_change(&mut self, meridian: f64);
    /// A drag moved the central parallel.
    fn on_parallel_change(&mut self, parallel: f64);
    /// The wheel changed the zoom.
    fn on_zoom_change(&mut self, zoom: f64);
}

impl ViewStateSink for ViewState {
    fn on_meridian_change(&mut self, meridian: f64) {
        self.central_meridian = meridian;
    }

    fn on_parallel_change(&mut self, parallel: f64) {
        self.set_central_parallel(parallel);
    }

    fn on_zoom_change(&mut self, zoom: f64) {
        self.zoom = zoom;
    }
}

/// What [`Globe::sync`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderTier {
    /// Everything was rebuilt.
    Full,
    /// Only the rotation changed; paths were rewritten in place.
    Fast,
    /// Nothing changed since the last render.
    Unchanged,
    /// Nothing could be drawn: no extent, no surface, or no geometry.
    Skipped,
}

/// Where the geometry load stands, for display.
#[derive(Clone, Copy, Debug)]
pub enum GlobeStatus<'a> {
    /// Waiting for geometry.
    Loading,
    /// The geometry could not be loaded; nothing is drawn.
    Error(&'a GeoDataError),
    /// Geometry is loaded.
    Ready,
}

/// Everything that forces a full render when it changes.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ShapeKey {
    extent: RenderExtent,
    theme: Theme,
    projection_type: ProjectionType,
    distance: Option<f64>,
    zoom: f64,
    geometry: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Rendered {
    shape: ShapeKey,
    orientation: [f64; 3],
}

/// An interactive globe drawing into a [`VectorSurface`].
///
/// Call [`Globe::sync`] once per cycle with the caller's view. Shape changes (extent, theme,
/// projection family, distance, zoom, geometry) rebuild the scene; orientation-only changes
/// patch the existing paths.
#[derive(Debug)]
pub struct Globe<S> {
    config: GlobeConfig,
    theme: Theme,
    view: ViewState,
    geometry: LoadState,
    geometry_version: u64,
    sizer: ResponsiveSizer,
    trackball: TrackballController,
    zoom: ZoomController,
    pipeline: RenderPipeline,
    rendered: Option<Rendered>,
    surface: Option<S>,
}

impl<S: VectorSurface> Globe<S> {
    /// Creates an engine with no surface, extent or geometry.
    #[must_use]
    pub fn new(config: GlobeConfig) -> Self {
        Self {
            config,
            theme: Theme::default(),
            view: ViewState::default().clamped(&config),
            geometry: LoadState::Loading,
            geometry_version: 0,
            sizer: ResponsiveSizer::new(config.fill_ratio),
            trackball: TrackballController::new(),
            zoom: ZoomController::new(config.zoom),
            pipeline: RenderPipeline::new(),
            rendered: None,
            surface: None,
        }
    }

    /// Sets the surface to draw into.
    #[must_use]
    pub fn with_surface(mut self, surface: S) -> Self {
        self.attach_surface(surface);
        self
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &GlobeConfig {
        &self.config
    }

    /// The view of the last [`Globe::sync`], clamped.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The current render extent.
    #[must_use]
    pub fn extent(&self) -> Option<RenderExtent> {
        self.sizer.extent()
    }

    /// The active theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches the palette. The next [`Globe::sync`] rebuilds the scene.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// The render pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    /// The surface, if attached.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Attaches a surface. The next [`Globe::sync`] draws everything into it.
    pub fn attach_surface(&mut self, mut surface: S) {
        if let Some(extent) = self.sizer.extent() {
            surface.set_extent(extent);
        }
        self.surface = Some(surface);
        self.rendered = None;
    }

    /// Detaches the surface and returns it.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.rendered = None;
        self.surface.take()
    }

    /// Reports a container size. Returns the new extent when the size is measurable.
    ///
    /// Zero-sized containers are ignored and keep the previous extent, as are observations
    /// made while detached.
    pub fn observe_container(&mut self, container: Size) -> Option<RenderExtent> {
        let extent = self.sizer.observe(container)?;
        if let Some(surface) = &mut self.surface {
            surface.set_extent(extent);
        }
        Some(extent)
    }

    /// Resumes following container size changes.
    pub fn attach(&mut self) {
        self.sizer.attach();
    }

    /// Stops following container size changes and ends any drag in progress.
    pub fn detach(&mut self) {
        self.sizer.detach();
        self.trackball.end();
    }

    /// Replaces the geometry. The next [`Globe::sync`] rebuilds the scene, or clears it when
    /// the load failed.
    pub fn set_geometry(&mut self, state: impl Into<LoadState>) {
        self.geometry = state.into();
        self.geometry_version += 1;
        if let LoadState::Failed(err) = &self.geometry {
            error!(error = %err, "geometry unavailable");
            let diffs = self.pipeline.clear();
            self.apply(&diffs);
            self.rendered = None;
        }
    }

    /// Where the geometry load stands.
    #[must_use]
    pub fn status(&self) -> GlobeStatus<'_> {
        match &self.geometry {
            LoadState::Loading => GlobeStatus::Loading,
            LoadState::Failed(err) => GlobeStatus::Error(err),
            LoadState::Ready(_) => GlobeStatus::Ready,
        }
    }

    /// Brings the scene up to date with `view`.
    pub fn sync(&mut self, view: &ViewState) -> RenderTier {
        let view = view.clamped(&self.config);
        self.view = view;
        self.zoom.sync(view.zoom);

        let Some(extent) = self.sizer.extent() else {
            return RenderTier::Skipped;
        };
        if self.surface.is_none() {
            return RenderTier::Skipped;
        }
        let Some(features) = self.geometry.collection().cloned() else {
            return RenderTier::Skipped;
        };

        let next = Rendered {
            shape: ShapeKey {
                extent,
                theme: self.theme,
                projection_type: view.projection_type,
                distance: (view.projection_type == ProjectionType::Satellite)
                    .then_some(view.distance),
                zoom: view.zoom,
                geometry: self.geometry_version,
            },
            orientation: view.rotation().angles(),
        };
        match self.rendered {
            Some(rendered) if rendered == next => RenderTier::Unchanged,
            Some(rendered) if rendered.shape == next.shape => {
                let diffs = self.pipeline.fast_update(view.rotation());
                self.apply(&diffs);
                self.rendered = Some(next);
                RenderTier::Fast
            }
            _ => {
                let projection = Projection::from_view(&view, extent, &self.config);
                let diffs = self.pipeline.full_render(
                    projection,
                    self.config.sphere_tolerance,
                    &features,
                    &self.theme.colors(),
                );
                debug!(width = extent.width, height = extent.height, "scene rebuilt");
                self.apply(&diffs);
                self.rendered = Some(next);
                RenderTier::Full
            }
        }
    }

    /// Routes a mouse event. Drag steps are reported to `sink`.
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        sink: &mut dyn ViewStateSink,
    ) -> InputResponse {
        let extent = self.sizer.extent().unwrap_or_default();
        let outcome = self.trackball.handle_pointer(event, &self.view, extent);
        report(outcome, sink)
    }

    /// Routes a touch event. Drag steps are reported to `sink`.
    pub fn handle_touch(
        &mut self,
        event: &TouchEvent,
        sink: &mut dyn ViewStateSink,
    ) -> InputResponse {
        let extent = self.sizer.extent().unwrap_or_default();
        let outcome = self.trackball.handle_touch(event, &self.view, extent);
        report(outcome, sink)
    }

    /// Applies a wheel event.
    ///
    /// The existing projection is rescaled in place and every path rewritten; the new zoom is
    /// reported to `sink`. The page's default scroll is always suppressed.
    pub fn handle_wheel(
        &mut self,
        event: &WheelEvent,
        sink: &mut dyn ViewStateSink,
    ) -> InputResponse {
        let zoom = self.zoom.apply_wheel(event);
        if let (Some(extent), Some(projection)) = (self.sizer.extent(), self.pipeline.projection())
        {
            let scale = calculate_scale(
                projection.projection_type(),
                extent.base_size(),
                zoom,
                &self.config.projection,
            );
            let diffs = self.pipeline.rescale(scale);
            self.apply(&diffs);
            if let Some(rendered) = &mut self.rendered {
                rendered.shape.zoom = zoom;
            }
        }
        trace!(zoom, "wheel zoom");
        self.view.zoom = zoom;
        sink.on_zoom_change(zoom);
        InputResponse::PREVENT_DEFAULT
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.trackball.is_dragging()
    }

    fn apply(&mut self, diffs: &[MarkDiff]) {
        if diffs.is_empty() {
            return;
        }
        if let Some(surface) = &mut self.surface {
            surface.apply_diffs(diffs);
        }
    }
}

impl Globe<SvgSurface> {
    /// Serializes the current drawing, named after the current view.
    ///
    /// Returns `None` when no surface is attached.
    #[must_use]
    pub fn export_svg(&self) -> Option<SvgExport> {
        let surface = self.surface.as_ref()?;
        Some(SvgExport::from_surface(surface, &self.view))
    }
}

fn report(outcome: GestureOutcome, sink: &mut dyn ViewStateSink) -> InputResponse {
    if let Some(update) = outcome.update {
        sink.on_meridian_change(update.meridian);
        sink.on_parallel_change(update.parallel);
    }
    outcome.response
}
