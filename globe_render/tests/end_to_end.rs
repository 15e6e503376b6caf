// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! GeoJSON in, SVG out.

use globe_core::{GlobeConfig, ProjectionType, ViewState};
use globe_geodata::{GeometryCache, InMemorySource, Resolution};
use globe_interaction::{PointerEvent, PointerKind, WheelEvent};
use globe_render::{
    Globe, GlobeStatus, MarkId, PathMark, RenderTier, SvgSurface, Theme, view_proj_string,
};
use kurbo::{Point, Shape, Size};

const ISLANDS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "name": "Meridia" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-10, -10], [10, -10], [10, 10], [-10, 10], [-10, -10]]]
            }
        },
        {
            "type": "Feature",
            "properties": { "name": "Antipodes" },
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[170, 0], [175, 0], [175, 5], [170, 5], [170, 0]]],
                    [[[-175, -5], [-170, -5], [-170, 0], [-175, 0], [-175, -5]]]
                ]
            }
        }
    ]
}"#;

fn loaded_globe() -> Globe<SvgSurface> {
    let mut cache =
        GeometryCache::new(InMemorySource::new().with_document(Resolution::Low, ISLANDS));
    let mut globe = Globe::new(GlobeConfig::default()).with_surface(SvgSurface::new());
    globe.observe_container(Size::new(1000.0, 750.0));
    globe.set_geometry(cache.load(Resolution::Low));
    globe
}

#[test]
fn renders_visible_and_hidden_features() {
    let mut globe = loaded_globe();
    assert!(matches!(globe.status(), GlobeStatus::Ready));
    assert_eq!(globe.sync(&ViewState::default()), RenderTier::Full);

    let export = globe.export_svg().expect("surface attached");
    assert!(export.document.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
    assert!(export.document.contains("viewBox=\"0 0 600 600\""));
    // Meridia faces the viewer; the Antipodes are on the far side and carry no path data.
    assert_eq!(export.document.matches(" d=\"").count(), 2);
    assert_eq!(export.document.matches("fill=\"#bbbbbb\"").count(), 2);
}

#[test]
fn centered_country_fills_only_itself() {
    let mut globe = loaded_globe();
    assert_eq!(globe.sync(&ViewState::default()), RenderTier::Full);
    let surface = globe.surface().expect("surface attached");
    let sphere = surface
        .mark(MarkId::SPHERE)
        .and_then(PathMark::bounds)
        .expect("sphere drawn");
    let meridia = surface.mark(MarkId::feature(0)).expect("Meridia drawn");
    let bounds = meridia.bounds().expect("Meridia visible");
    assert!(bounds.width() < sphere.width() / 4.0);

    let center = sphere.center();
    assert_ne!(meridia.path.winding(center), 0);
    let open_ocean = Point::new(center.x + sphere.width() / 4.0, center.y);
    assert_eq!(meridia.path.winding(open_ocean), 0);
}

#[test]
fn spin_to_the_far_side_and_zoom() {
    let mut globe = loaded_globe();
    let mut view = ViewState::default();
    globe.sync(&view);

    globe.handle_pointer(&PointerEvent::new(PointerKind::Down, (300.0, 300.0)), &mut view);
    // Center to rim is nearly a quarter turn.
    globe.handle_pointer(&PointerEvent::new(PointerKind::Move, (599.9, 300.0)), &mut view);
    globe.handle_pointer(&PointerEvent::new(PointerKind::Up, (599.9, 300.0)), &mut view);
    assert!(view.central_meridian < -80.0);
    assert_eq!(globe.sync(&view), RenderTier::Fast);

    view.central_meridian = 180.0;
    assert_eq!(globe.sync(&view), RenderTier::Fast);
    let document = globe.export_svg().expect("surface attached").document;
    // Now the Antipodes are drawn and Meridia is hidden.
    assert_eq!(document.matches(" d=\"").count(), 2);

    globe.handle_wheel(&WheelEvent::new(-1000.0), &mut view);
    assert_eq!(view.zoom, 2.0);
    assert_eq!(globe.sync(&view), RenderTier::Unchanged);

    let export = globe.export_svg().expect("surface attached");
    assert_eq!(export.filename, "globe-180.0-0.0-0.0-2.0x.svg");
}

#[test]
fn satellite_view_has_a_proj_definition() {
    let mut globe = loaded_globe();
    let view = ViewState {
        central_meridian: 4.36,
        central_parallel: 50.86,
        projection_type: ProjectionType::Satellite,
        distance: 2.0,
        ..ViewState::default()
    };
    assert_eq!(globe.sync(&view), RenderTier::Full);
    assert_eq!(
        view_proj_string(globe.view()),
        "+proj=nsper +lat_0=50.9 +lon_0=4.4 +h=6378137 +datum=WGS84 +units=m +no_defs"
    );

    globe.set_theme(Theme::Dark);
    assert_eq!(globe.sync(&view), RenderTier::Full);
    let document = globe.export_svg().expect("surface attached").document;
    assert!(document.contains("fill=\"#333333\""));
}
