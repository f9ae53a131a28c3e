//! Initial view fitting in Web Mercator.
//!
//! Mirrors how slippy maps fit bounds: the bounds are projected, the
//! largest integer zoom at which they fit inside the padded map area is
//! chosen, and the result is capped at the configured maximum zoom.

use std::f64::consts::PI;

use carbon_map_geometry_models::{LatLng, LatLngBounds};
use carbon_map_render_models::Viewport;

use crate::config::ViewportConfig;

/// Edge length of a map tile at zoom 0, in pixels.
const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection.
const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

/// Fits the view to `points`, or returns the configured default view when
/// there are none.
#[must_use]
pub fn fit(points: &[LatLng], config: &ViewportConfig) -> Viewport {
    let Some(bounds) = LatLngBounds::from_points(points) else {
        log::debug!("Nothing rendered, using default view");
        return default_view(config);
    };
    let (center, zoom) = fit_bounds(&bounds, config);
    Viewport {
        center,
        zoom,
        bounds: Some(bounds),
    }
}

/// The configured default view.
#[must_use]
pub fn default_view(config: &ViewportConfig) -> Viewport {
    Viewport {
        center: LatLng::from(config.default_center),
        zoom: config.default_zoom,
        bounds: None,
    }
}

/// Center and zoom that fit `bounds` inside the padded map area.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn fit_bounds(bounds: &LatLngBounds, config: &ViewportConfig) -> (LatLng, u8) {
    let (west, north) = project(LatLng::new(bounds.north_east.lat, bounds.south_west.lng));
    let (east, south) = project(LatLng::new(bounds.south_west.lat, bounds.north_east.lng));

    let width_px = (east - west) * TILE_SIZE;
    let height_px = (south - north) * TILE_SIZE;
    let available_w = 2.0f64.mul_add(-config.padding, config.width).max(1.0);
    let available_h = 2.0f64.mul_add(-config.padding, config.height).max(1.0);

    let scale = (available_w / width_px).min(available_h / height_px);
    let max_zoom = f64::from(config.max_zoom);
    let zoom = if scale.is_finite() {
        scale.log2().floor().clamp(0.0, max_zoom)
    } else {
        max_zoom
    };

    let center = unproject(f64::midpoint(west, east), f64::midpoint(north, south));
    (center, zoom as u8)
}

/// Projects to normalized Web Mercator coordinates in `0.0..=1.0`, with
/// `y` growing southwards.
fn project(point: LatLng) -> (f64, f64) {
    let lat = point
        .lat
        .clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE)
        .to_radians();
    let x = (point.lng + 180.0) / 360.0;
    let y = 0.5 - lat.tan().asinh() / (2.0 * PI);
    (x, y)
}

fn unproject(x: f64, y: f64) -> LatLng {
    let lat = ((0.5 - y) * 2.0 * PI).sinh().atan().to_degrees();
    LatLng::new(lat, x.mul_add(360.0, -180.0))
}
