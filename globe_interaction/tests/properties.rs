// Copyright 2025 the Globe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the gesture controllers.

use globe_core::{RenderExtent, ViewState};
use globe_interaction::{
    TrackballController, WheelEvent, ZoomController, point_to_sphere, rotation_between,
};
use kurbo::Point;
use proptest::prelude::*;

proptest! {
    #[test]
    fn drags_keep_parallel_in_range(
        start_parallel in -90.0_f64..=90.0,
        steps in prop::collection::vec((-500.0_f64..500.0, -500.0_f64..500.0), 1..20),
    ) {
        let extent = RenderExtent::square(400);
        let mut view = ViewState { central_parallel: start_parallel, ..ViewState::default() };
        let mut trackball = TrackballController::new();
        for (x, y) in steps {
            trackball.begin(Point::new(200.0, 200.0), &view);
            if let Some(update) = trackball.drag(Point::new(200.0 + x, 200.0 + y), extent) {
                view.central_meridian = update.meridian;
                view.central_parallel = update.parallel;
            }
            trackball.end();
            prop_assert!((-90.0..=90.0).contains(&view.central_parallel));
        }
    }

    #[test]
    fn inside_points_lie_on_the_unit_sphere(x in 0.0_f64..300.0, y in 0.0_f64..300.0) {
        let v = point_to_sphere(x, y, 300.0, 300.0);
        prop_assert!((v.length() - 1.0).abs() < 1e-9);
        prop_assert!(v.z >= 0.0);
    }

    #[test]
    fn same_point_gives_zero_rotation(x in 0.0_f64..300.0, y in 0.0_f64..300.0) {
        let v = point_to_sphere(x, y, 300.0, 300.0);
        let delta = rotation_between(v, v);
        prop_assert_eq!(delta.longitude, 0.0);
        prop_assert_eq!(delta.latitude, 0.0);
        prop_assert_eq!(delta.roll, 0.0);
    }

    #[test]
    fn wheel_in_one_direction_converges_to_a_bound(
        start in 1.0_f64..=8.0,
        delta in 1.0_f64..400.0,
        zoom_in in any::<bool>(),
    ) {
        let mut zoom = ZoomController::default();
        zoom.sync(start);
        let delta = if zoom_in { -delta } else { delta };
        let mut last = zoom.current();
        for _ in 0..10_000 {
            let next = zoom.apply_wheel(&WheelEvent::new(delta));
            prop_assert!((1.0..=8.0).contains(&next));
            if zoom_in {
                prop_assert!(next >= last);
            } else {
                prop_assert!(next <= last);
            }
            last = next;
        }
        prop_assert_eq!(last, if zoom_in { 8.0 } else { 1.0 });
    }
}
