// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Affine, Point, Rect};
use unifilar_model::{GeoPoint, LookupError};

use crate::Canvas;

/// Smallest bounding-box span used when computing the scale.
pub const MIN_SPAN: f64 = 1e-9;

/// Maps bus names to canvas points through one uniform, vertically flipped
/// affine transform.
///
/// Built once from every bus in the topology; see the crate docs for the
/// formula.
#[derive(Clone, Debug)]
pub struct Projector {
    canvas: Canvas,
    min: GeoPoint,
    span_lng: f64,
    span_lat: f64,
    scale: f64,
    geo_to_canvas: Affine,
    points: HashMap<String, Point>,
    bounds: Option<Rect>,
}

impl Projector {
    /// Builds a projector over `buses` for the given canvas.
    ///
    /// An empty bus set yields a projector anchored at the geographic origin
    /// that knows no names.
    pub fn new<'a, I>(buses: I, canvas: Canvas) -> Self
    where
        I: IntoIterator<Item = (&'a str, GeoPoint)>,
    {
        let buses: Vec<(&str, GeoPoint)> = buses.into_iter().collect();

        let (min, max) = match buses.first() {
            Some(&(_, first)) => buses.iter().fold((first, first), |(lo, hi), &(_, p)| {
                (
                    GeoPoint::new(lo.lng.min(p.lng), lo.lat.min(p.lat)),
                    GeoPoint::new(hi.lng.max(p.lng), hi.lat.max(p.lat)),
                )
            }),
            None => (GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)),
        };
        let span_lng = (max.lng - min.lng).max(MIN_SPAN);
        let span_lat = (max.lat - min.lat).max(MIN_SPAN);

        let m = canvas.margin;
        let scale = ((canvas.width - 2.0 * m) / span_lng).min((canvas.height - 2.0 * m) / span_lat);

        // x = s*lng + (M - s*minLng); y = -s*lat + (H - M + s*minLat)
        let geo_to_canvas = Affine::new([
            scale,
            0.0,
            0.0,
            -scale,
            m - scale * min.lng,
            canvas.height - m + scale * min.lat,
        ]);

        let mut proj = Self {
            canvas,
            min,
            span_lng,
            span_lat,
            scale,
            geo_to_canvas,
            points: HashMap::with_capacity(buses.len()),
            bounds: None,
        };
        for (name, geo) in buses {
            let pt = proj.project_geo(geo);
            proj.bounds = Some(match proj.bounds {
                Some(r) => r.union_pt(pt),
                None => Rect::from_points(pt, pt),
            });
            proj.points.insert(String::from(name), pt);
        }
        proj
    }

    /// Canvas position of the named bus.
    pub fn project(&self, bus: &str) -> Result<Point, LookupError> {
        self.points
            .get(bus)
            .copied()
            .ok_or_else(|| LookupError::UnknownBus(bus.into()))
    }

    /// Projects an arbitrary geographic point with the same transform.
    ///
    /// Points outside the buses' bounding box land outside the content area.
    #[must_use]
    pub fn project_geo(&self, geo: GeoPoint) -> Point {
        let m = self.canvas.margin;
        Point::new(
            m + (geo.lng - self.min.lng) * self.scale,
            self.canvas.height - (m + (geo.lat - self.min.lat) * self.scale),
        )
    }

    /// Maps a canvas point back to geographic coordinates.
    #[must_use]
    pub fn unproject(&self, pt: Point) -> GeoPoint {
        let m = self.canvas.margin;
        GeoPoint::new(
            self.min.lng + (pt.x - m) / self.scale,
            self.min.lat + (self.canvas.height - m - pt.y) / self.scale,
        )
    }

    /// Returns `true` if the projector was built with this bus.
    #[must_use]
    pub fn contains(&self, bus: &str) -> bool {
        self.points.contains_key(bus)
    }

    /// The geographic-to-canvas transform.
    ///
    /// Equal to [`Projector::project_geo`] up to rounding; prefer the latter
    /// for positions, since the folded translation loses precision when the
    /// scale is large.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.geo_to_canvas
    }

    /// The uniform scale factor, canvas units per degree.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// South-west corner of the bus bounding box.
    #[must_use]
    pub fn geo_origin(&self) -> GeoPoint {
        self.min
    }

    /// `(dLng, dLat)` after flooring to [`MIN_SPAN`].
    #[must_use]
    pub fn spans(&self) -> (f64, f64) {
        (self.span_lng, self.span_lat)
    }

    /// The canvas this projector targets.
    #[must_use]
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Bounding rectangle of all projected buses, or `None` with no buses.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn wide_network_is_limited_by_width() {
        let proj = Projector::new(
            [
                ("A", GeoPoint::new(0.0, 0.0)),
                ("B", GeoPoint::new(10.0, 1.0)),
            ],
            Canvas::default(),
        );
        // (1600 - 80) / 10 = 152 < (900 - 80) / 1 = 820
        assert_eq!(proj.scale(), 152.0);
        assert!(approx(proj.project("A").unwrap(), Point::new(40.0, 860.0)));
        assert!(approx(
            proj.project("B").unwrap(),
            Point::new(1560.0, 860.0 - 152.0)
        ));
    }

    #[test]
    fn tall_network_is_limited_by_height() {
        let proj = Projector::new(
            [
                ("A", GeoPoint::new(0.0, 0.0)),
                ("B", GeoPoint::new(1.0, 10.0)),
            ],
            Canvas::default(),
        );
        assert_eq!(proj.scale(), 82.0);
        assert!(approx(proj.project("B").unwrap(), Point::new(122.0, 40.0)));
    }

    #[test]
    fn single_bus_sits_on_the_bottom_left_margin() {
        let proj = Projector::new([("only", GeoPoint::new(-46.6, -23.5))], Canvas::default());
        assert_eq!(proj.spans(), (MIN_SPAN, MIN_SPAN));
        assert!(proj.scale().is_finite());
        assert!(approx(proj.project("only").unwrap(), Point::new(40.0, 860.0)));
    }

    #[test]
    fn empty_projector_knows_no_names() {
        let proj = Projector::new(core::iter::empty(), Canvas::default());
        assert_eq!(proj.geo_origin(), GeoPoint::new(0.0, 0.0));
        assert_eq!(proj.bounds(), None);
        assert_eq!(
            proj.project("A").unwrap_err(),
            LookupError::UnknownBus("A".into())
        );
    }

    #[test]
    fn unproject_inverts_project() {
        let proj = Projector::new(
            [
                ("A", GeoPoint::new(-46.7, -23.7)),
                ("B", GeoPoint::new(-46.5, -23.4)),
            ],
            Canvas::new(800.0, 600.0, 20.0),
        );
        let geo = GeoPoint::new(-46.6, -23.55);
        let back = proj.unproject(proj.project_geo(geo));
        assert!((back.lng - geo.lng).abs() < 1e-9);
        assert!((back.lat - geo.lat).abs() < 1e-9);
    }

    #[test]
    fn bounds_cover_projected_buses() {
        let proj = Projector::new(
            [
                ("A", GeoPoint::new(0.0, 0.0)),
                ("B", GeoPoint::new(10.0, 0.0)),
                ("C", GeoPoint::new(5.0, 2.0)),
            ],
            Canvas::default(),
        );
        let bounds = proj.bounds().unwrap();
        assert!((bounds.x0 - 40.0).abs() < 1e-9);
        assert!((bounds.x1 - 1560.0).abs() < 1e-9);
        assert!((bounds.y1 - 860.0).abs() < 1e-9);
        assert!(bounds.y0 < bounds.y1);
    }
}
