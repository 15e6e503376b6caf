// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full and fast rendering.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

use globe_core::{FeatureCollection, Geometry, PathGenerator, Projection, Rotation};
use kurbo::BezPath;
use tracing::{debug, trace};

use crate::mark::{MarkClass, MarkDiff, MarkId, MarkScene, PathMark};
use crate::theme::ThemeColors;

/// Owns the projection, the path generator and the drawn marks.
///
/// A full render throws everything away and rebuilds it. Fast updates mutate the existing
/// projection (rotation or scale) and rewrite the path of each mark in place, so element
/// identities survive across frames.
#[derive(Debug, Default)]
pub struct RenderPipeline {
    generator: Option<PathGenerator>,
    features: Option<Arc<FeatureCollection>>,
    scene: MarkScene,
}

impl RenderPipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The projection of the last full render.
    #[must_use]
    pub fn projection(&self) -> Option<&Projection> {
        self.generator.as_ref().map(PathGenerator::projection)
    }

    /// The drawn marks.
    #[must_use]
    pub fn scene(&self) -> &MarkScene {
        &self.scene
    }

    /// Returns `true` once a full render has happened.
    #[must_use]
    pub fn is_built(&self) -> bool {
        self.generator.is_some()
    }

    /// Discards every mark and rebuilds the scene: sphere first, then each feature in order.
    pub fn full_render(
        &mut self,
        projection: Projection,
        sphere_tolerance: f64,
        features: &Arc<FeatureCollection>,
        colors: &ThemeColors,
    ) -> Vec<MarkDiff> {
        let mut diffs = self.scene.clear();
        let generator = PathGenerator::new(projection).with_sphere_tolerance(sphere_tolerance);

        diffs.push(self.scene.enter(
            MarkId::SPHERE,
            PathMark {
                class: MarkClass::Sphere,
                path: generate(&generator, &Geometry::Sphere),
                fill: colors.ocean_fill.into(),
                stroke: colors.ocean_stroke.into(),
                stroke_width: colors.ocean_stroke_width,
            },
        ));
        for (index, feature) in features.features.iter().enumerate() {
            diffs.push(self.scene.enter(
                MarkId::feature(index),
                PathMark {
                    class: MarkClass::Country,
                    path: generate(&generator, &feature.geometry),
                    fill: colors.country_fill.into(),
                    stroke: colors.country_stroke.into(),
                    stroke_width: colors.country_stroke_width,
                },
            ));
        }
        debug!(
            features = features.len(),
            projection = %generator.projection().projection_type(),
            scale = generator.projection().scale(),
            "full render"
        );

        self.generator = Some(generator);
        self.features = Some(Arc::clone(features));
        diffs
    }

    /// Sets a new rotation and rewrites every path.
    ///
    /// Emits only updates, and only for marks whose path changed. Does nothing before the first
    /// full render.
    pub fn fast_update(&mut self, rotation: Rotation) -> Vec<MarkDiff> {
        let Some(generator) = &mut self.generator else {
            return Vec::new();
        };
        generator.projection_mut().set_rotation(rotation);
        let diffs = self.regenerate();
        trace!(updated = diffs.len(), "fast update");
        diffs
    }

    /// Sets a new scale on the existing projection and rewrites every path.
    pub fn rescale(&mut self, scale: f64) -> Vec<MarkDiff> {
        let Some(generator) = &mut self.generator else {
            return Vec::new();
        };
        generator.projection_mut().set_scale(scale);
        let diffs = self.regenerate();
        trace!(scale, updated = diffs.len(), "rescale");
        diffs
    }

    /// Drops the projection and removes every mark.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        self.generator = None;
        self.features = None;
        self.scene.clear()
    }

    fn regenerate(&mut self) -> Vec<MarkDiff> {
        let (Some(generator), Some(features)) = (&self.generator, &self.features) else {
            return Vec::new();
        };
        let mut diffs = Vec::new();
        diffs.extend(
            self.scene
                .set_path(MarkId::SPHERE, generate(generator, &Geometry::Sphere)),
        );
        for (index, feature) in features.features.iter().enumerate() {
            diffs.extend(
                self.scene
                    .set_path(MarkId::feature(index), generate(generator, &feature.geometry)),
            );
        }
        diffs
    }
}

fn generate(generator: &PathGenerator, geometry: &Geometry) -> BezPath {
    generator.path(geometry).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use globe_core::{Feature, GlobeConfig, LonLat, Polygon, RenderExtent, ViewState};

    use super::*;
    use crate::theme::Theme;

    fn square(lon: f64, lat: f64, size: f64) -> Feature {
        Feature {
            name: None,
            geometry: Geometry::Polygon(Polygon::new([alloc::vec![
                LonLat::new(lon, lat),
                LonLat::new(lon + size, lat),
                LonLat::new(lon + size, lat + size),
                LonLat::new(lon, lat + size),
            ]])),
        }
    }

    fn features() -> Arc<FeatureCollection> {
        Arc::new(FeatureCollection {
            features: alloc::vec![square(0.0, 0.0, 10.0), square(170.0, 0.0, 5.0)],
        })
    }

    fn projection(view: &ViewState) -> Projection {
        Projection::from_view(view, RenderExtent::square(400), &GlobeConfig::default())
    }

    #[test]
    fn full_render_enters_sphere_then_features() {
        let mut pipeline = RenderPipeline::new();
        let diffs = pipeline.full_render(
            projection(&ViewState::default()),
            0.1,
            &features(),
            &Theme::Light.colors(),
        );
        let [
            MarkDiff::Enter { id: sphere, new: ocean, .. },
            MarkDiff::Enter { id: first, new: near, .. },
            MarkDiff::Enter { id: second, new: far, .. },
        ] = &diffs[..]
        else {
            panic!("expected three enter diffs");
        };
        assert_eq!(*sphere, MarkId::SPHERE);
        assert_eq!(ocean.class, MarkClass::Sphere);
        assert_eq!(*first, MarkId::from_raw(1));
        assert_eq!(*second, MarkId::from_raw(2));
        assert!(!near.is_empty());
        // Behind the globe, so it keeps its identity with an empty path.
        assert!(far.is_empty());
        assert_eq!(near.stroke_width, 0.5);
    }

    #[test]
    fn second_full_render_exits_first() {
        let mut pipeline = RenderPipeline::new();
        let colors = Theme::Light.colors();
        pipeline.full_render(projection(&ViewState::default()), 0.1, &features(), &colors);
        let diffs =
            pipeline.full_render(projection(&ViewState::default()), 0.1, &features(), &colors);
        assert_eq!(diffs.len(), 6);
        assert!(diffs[..3].iter().all(|d| matches!(d, MarkDiff::Exit { .. })));
        assert!(diffs[3..].iter().all(|d| matches!(d, MarkDiff::Enter { .. })));
    }

    #[test]
    fn fast_update_only_updates() {
        let mut pipeline = RenderPipeline::new();
        let colors = Theme::Light.colors();
        pipeline.full_render(projection(&ViewState::default()), 0.1, &features(), &colors);
        let turned = ViewState {
            central_meridian: 175.0,
            ..ViewState::default()
        };
        let diffs = pipeline.fast_update(turned.rotation());
        // The sphere outline does not move; both countries do.
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Update { .. })));
        let Some(far) = pipeline.scene().get(MarkId::from_raw(2)) else {
            panic!("missing mark");
        };
        assert!(!far.is_empty());
    }

    #[test]
    fn updates_before_a_full_render_are_ignored() {
        let mut pipeline = RenderPipeline::new();
        assert!(pipeline.fast_update(Rotation::default()).is_empty());
        assert!(pipeline.rescale(100.0).is_empty());
        assert!(!pipeline.is_built());
    }

    #[test]
    fn rescale_keeps_projection_and_grows_sphere() {
        let mut pipeline = RenderPipeline::new();
        let colors = Theme::Light.colors();
        pipeline.full_render(projection(&ViewState::default()), 0.1, &features(), &colors);
        let before = pipeline.projection().map(Projection::scale).unwrap();
        let diffs = pipeline.rescale(before * 2.0);
        let Some(MarkDiff::Update {
            old_bounds: Some(old),
            new_bounds: Some(new),
            ..
        }) = diffs.first()
        else {
            panic!("expected the sphere to update first");
        };
        assert!(new.width() > old.width() * 1.9);
        assert_eq!(pipeline.projection().map(Projection::scale), Some(before * 2.0));
    }
}
