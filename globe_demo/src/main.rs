// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless globe demo.
//!
//! Usage: `globe_demo [DATA_DIR] [OUT_DIR]`
//!
//! With a data directory holding `countries110.geojson`, those outlines are drawn; otherwise a
//! coarse built-in sample is used. The demo drags the globe, zooms with the wheel, switches to
//! a satellite view and writes the result as an SVG into `OUT_DIR` (default: the current
//! directory). Set `RUST_LOG=debug` for per-frame detail.

use std::path::PathBuf;

use anyhow::{Context, bail};
use globe_core::{GlobeConfig, ProjectionType, ViewState};
use globe_geodata::{DirectorySource, GeometryCache, InMemorySource, LoadState, Resolution};
use globe_interaction::{EventScope, PointerEvent, PointerKind, WheelEvent};
use globe_render::{Globe, GlobeStatus, SvgSurface, view_proj_string};
use kurbo::{Point, Size};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE: &str = include_str!("../data/sample.geojson");

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let data_dir = args.next().map(PathBuf::from);
    let out_dir = args.next().map_or_else(|| PathBuf::from("."), PathBuf::from);
    let resolution = Resolution::Low;

    let geometry = load(data_dir, resolution);
    let mut globe = Globe::new(GlobeConfig::default()).with_surface(SvgSurface::new());
    let extent = globe
        .observe_container(Size::new(1000.0, 750.0))
        .context("container is not measurable")?;
    globe.set_geometry(geometry);
    if let GlobeStatus::Error(err) = globe.status() {
        bail!("cannot draw the globe: {err}");
    }

    let mut view = ViewState {
        central_meridian: 20.0,
        central_parallel: 10.0,
        ..ViewState::default()
    };
    let tier = globe.sync(&view);
    info!(?tier, "initial render");

    // Drag from the center towards the upper left, as a user would with the mouse.
    let center = extent.center();
    globe.handle_pointer(&PointerEvent::new(PointerKind::Down, center), &mut view);
    for step in 1..=12 {
        let offset = f64::from(step) * 10.0;
        let position = Point::new(center.x - offset, center.y - offset / 2.0);
        let event =
            PointerEvent::new(PointerKind::Move, position).with_scope(EventScope::Document);
        globe.handle_pointer(&event, &mut view);
        globe.sync(&view);
    }
    let release = PointerEvent::new(PointerKind::Up, center).with_scope(EventScope::Document);
    globe.handle_pointer(&release, &mut view);
    info!(
        meridian = view.central_meridian,
        parallel = view.central_parallel,
        "drag finished"
    );

    for _ in 0..5 {
        globe.handle_wheel(&WheelEvent::new(-120.0), &mut view);
    }
    let tier = globe.sync(&view);
    info!(zoom = view.zoom, ?tier, "zoomed");

    view.projection_type = ProjectionType::Satellite;
    view.distance = 4.0;
    let tier = globe.sync(&view);
    info!(?tier, "switched to satellite");

    let export = globe.export_svg().context("no surface attached")?;
    let path = out_dir.join(&export.filename);
    std::fs::write(&path, &export.document)
        .with_context(|| format!("failed to write `{}`", path.display()))?;
    info!(path = %path.display(), bytes = export.document.len(), "exported");

    println!("{}", view_proj_string(globe.view()));
    Ok(())
}

fn load(data_dir: Option<PathBuf>, resolution: Resolution) -> LoadState {
    match data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), %resolution, "loading outlines");
            GeometryCache::new(DirectorySource::new(dir)).load(resolution)
        }
        None => {
            info!("no data directory given, using the built-in sample");
            GeometryCache::new(InMemorySource::new().with_document(resolution, SAMPLE))
                .load(resolution)
        }
    }
}
