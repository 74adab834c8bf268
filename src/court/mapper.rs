use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::bounds::{CourtPoint, COURT_BOUNDS};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("Court surface is not mounted")]
    SurfaceNotMounted,

    #[error("Court surface has not been laid out ({width}x{height})")]
    SurfaceNotLaidOut { width: f64, height: f64 },
}

/// 2D affine matrix in SVG order: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Returns `None` for singular (or non-finite) matrices.
    pub fn inverse(&self) -> Option<AffineTransform> {
        let det = self.a * self.d - self.b * self.c;
        if !det.is_finite() || det.abs() < f64::EPSILON {
            return None;
        }

        Some(AffineTransform {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }
}

/// Pointer location in device (client) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// Location on the rendering surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// On-screen geometry of the rendered court.
///
/// `screen_transform` maps court space to device pixels when the renderer
/// can report it exactly (an SVG screen CTM, for instance). Without it the
/// bounding rectangle is assumed to show the whole court, stretched to fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub screen_transform: Option<AffineTransform>,
}

impl SurfaceBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            screen_transform: None,
        }
    }

    pub fn with_screen_transform(mut self, transform: AffineTransform) -> Self {
        self.screen_transform = Some(transform);
        self
    }

    fn ensure_laid_out(&self) -> Result<(), MappingError> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(MappingError::SurfaceNotLaidOut {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Converts between surface pixels and court space.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateMapper;

impl CoordinateMapper {
    pub fn new() -> Self {
        Self
    }

    /// Maps a pointer position to court space, clipped to the court.
    ///
    /// `surface` is `None` while the court diagram is not mounted.
    pub fn to_court_space(
        &self,
        pointer: PointerPosition,
        surface: Option<&SurfaceBounds>,
    ) -> Result<CourtPoint, MappingError> {
        let surface = surface.ok_or(MappingError::SurfaceNotMounted)?;
        surface.ensure_laid_out()?;

        let exact = surface
            .screen_transform
            .and_then(|transform| transform.inverse())
            .map(|inverse| inverse.apply(pointer.x, pointer.y));

        let (x, y) = match exact {
            Some(logical) => logical,
            None => {
                let rel_x = (pointer.x - surface.left) / surface.width;
                let rel_y = (pointer.y - surface.top) / surface.height;
                (
                    rel_x * COURT_BOUNDS.width() + COURT_BOUNDS.min_x,
                    rel_y * COURT_BOUNDS.height() + COURT_BOUNDS.min_y,
                )
            }
        };

        Ok(CourtPoint::new(x, y))
    }

    /// Maps a court point back onto the surface, e.g. to draw an event marker.
    pub fn to_surface_space(
        &self,
        point: CourtPoint,
        surface: Option<&SurfaceBounds>,
    ) -> Result<ScreenPoint, MappingError> {
        let surface = surface.ok_or(MappingError::SurfaceNotMounted)?;
        surface.ensure_laid_out()?;

        let (x, y) = match surface.screen_transform {
            Some(transform) if transform.inverse().is_some() => {
                transform.apply(point.x(), point.y())
            }
            _ => (
                surface.left
                    + (point.x() - COURT_BOUNDS.min_x) / COURT_BOUNDS.width() * surface.width,
                surface.top
                    + (point.y() - COURT_BOUNDS.min_y) / COURT_BOUNDS.height() * surface.height,
            ),
        };

        Ok(ScreenPoint { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pointer(x: f64, y: f64) -> PointerPosition {
        PointerPosition { x, y }
    }

    // Surface drawn at 2x scale, offset by (10, 20) on the page.
    fn scaled_transform() -> AffineTransform {
        AffineTransform {
            a: 2.0,
            b: 0.0,
            c: 0.0,
            d: 2.0,
            e: 10.0 + 500.0,
            f: 20.0 + 95.0,
        }
    }

    #[test]
    fn far_click_on_small_surface_clips_to_corner() {
        let mapper = CoordinateMapper::new();
        let surface = SurfaceBounds::new(0.0, 0.0, 500.0, 375.0);

        let point = mapper
            .to_court_space(pointer(1000.0, 1000.0), Some(&surface))
            .unwrap();

        assert_eq!(point, CourtPoint::new(250.0, 422.5));
        assert_eq!(point.x(), 250.0);
        assert_eq!(point.y(), 422.5);
    }

    #[rstest]
    #[case(-5000.0, -5000.0)]
    #[case(-1.0, 0.0)]
    #[case(0.0, 0.0)]
    #[case(123.4, 56.7)]
    #[case(499.9, 374.9)]
    #[case(640.0, 480.0)]
    #[case(1e9, -1e9)]
    fn mapped_points_stay_on_court(#[case] x: f64, #[case] y: f64) {
        let mapper = CoordinateMapper::new();
        let plain = SurfaceBounds::new(30.0, 40.0, 500.0, 375.0);
        let exact = plain.with_screen_transform(scaled_transform());

        for surface in [plain, exact] {
            let point = mapper.to_court_space(pointer(x, y), Some(&surface)).unwrap();
            assert!((-250.0..=250.0).contains(&point.x()), "x = {}", point.x());
            assert!((-47.5..=422.5).contains(&point.y()), "y = {}", point.y());
        }
    }

    #[test]
    fn proportional_mapping_is_independent_of_surface_size() {
        let mapper = CoordinateMapper::new();
        let small = SurfaceBounds::new(0.0, 0.0, 250.0, 235.0);
        let large = SurfaceBounds::new(100.0, 50.0, 1000.0, 940.0);

        let from_small = mapper
            .to_court_space(pointer(125.0, 23.75), Some(&small))
            .unwrap();
        let from_large = mapper
            .to_court_space(pointer(600.0, 145.0), Some(&large))
            .unwrap();

        assert_eq!(from_small, CourtPoint::new(0.0, 0.0));
        assert_eq!(from_large, from_small);
    }

    #[test]
    fn prefers_exact_transform_when_available() {
        let mapper = CoordinateMapper::new();
        // The rectangle disagrees with the transform on purpose.
        let surface = SurfaceBounds::new(0.0, 0.0, 100.0, 100.0)
            .with_screen_transform(scaled_transform());

        let point = mapper
            .to_court_space(pointer(510.0, 115.0), Some(&surface))
            .unwrap();

        assert_eq!(point, CourtPoint::new(0.0, 0.0));
    }

    #[test]
    fn singular_transform_falls_back_to_rectangle() {
        let mapper = CoordinateMapper::new();
        let singular = AffineTransform {
            a: 0.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 5.0,
            f: 5.0,
        };
        let surface =
            SurfaceBounds::new(0.0, 0.0, 500.0, 470.0).with_screen_transform(singular);

        let point = mapper
            .to_court_space(pointer(250.0, 47.5), Some(&surface))
            .unwrap();

        assert_eq!(point, CourtPoint::new(0.0, 0.0));
    }

    #[test]
    fn unmounted_surface_is_a_mapping_error() {
        let mapper = CoordinateMapper::new();
        let result = mapper.to_court_space(pointer(1.0, 1.0), None);
        assert_eq!(result, Err(MappingError::SurfaceNotMounted));
    }

    #[rstest]
    #[case(0.0, 375.0)]
    #[case(500.0, 0.0)]
    #[case(f64::NAN, 375.0)]
    fn collapsed_surface_is_a_mapping_error(#[case] width: f64, #[case] height: f64) {
        let mapper = CoordinateMapper::new();
        let surface = SurfaceBounds::new(0.0, 0.0, width, height);
        let result = mapper.to_court_space(pointer(1.0, 1.0), Some(&surface));
        assert!(matches!(result, Err(MappingError::SurfaceNotLaidOut { .. })));
    }

    #[test]
    fn surface_space_inverts_court_space() {
        let mapper = CoordinateMapper::new();
        let plain = SurfaceBounds::new(30.0, 40.0, 500.0, 375.0);
        let exact = plain.with_screen_transform(scaled_transform());

        for surface in [plain, exact] {
            let court = CourtPoint::new(-120.0, 210.0);
            let screen = mapper.to_surface_space(court, Some(&surface)).unwrap();
            let back = mapper
                .to_court_space(pointer(screen.x, screen.y), Some(&surface))
                .unwrap();
            assert_eq!(back, court);
        }
    }

    #[test]
    fn inverse_of_inverse_is_identity() {
        let transform = AffineTransform {
            a: 1.5,
            b: 0.25,
            c: -0.5,
            d: 2.0,
            e: 12.0,
            f: -7.0,
        };
        let round_trip = transform.inverse().unwrap().inverse().unwrap();
        let (x, y) = round_trip.apply(3.0, 4.0);
        let (ex, ey) = transform.apply(3.0, 4.0);
        assert!((x - ex).abs() < 1e-9);
        assert!((y - ey).abs() < 1e-9);
    }
}
