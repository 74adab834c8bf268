use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle describing the logical court.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourtBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// The half court as drawn by the court diagram and the heatmap service:
/// basket at the origin, baseline at -47.5, half-court line at 422.5.
pub const COURT_BOUNDS: CourtBounds = CourtBounds {
    min_x: -250.0,
    max_x: 250.0,
    min_y: -47.5,
    max_y: 422.5,
};

/// Where quick actions land when no court location was clicked.
pub const DEFAULT_ACTION_POINT: CourtPoint = CourtPoint { x: 0.0, y: 100.0 };

impl CourtBounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    fn clip_axis(value: f64, min: f64, max: f64) -> f64 {
        if value.is_nan() {
            return min;
        }
        value.clamp(min, max)
    }
}

/// A location in court space.
///
/// Construction always clips to [`COURT_BOUNDS`] and rounds to two decimals,
/// so a `CourtPoint` can never describe a spot off the court.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawCourtPoint", into = "RawCourtPoint")]
pub struct CourtPoint {
    x: f64,
    y: f64,
}

#[derive(Serialize, Deserialize)]
struct RawCourtPoint {
    x: f64,
    y: f64,
}

impl From<RawCourtPoint> for CourtPoint {
    fn from(raw: RawCourtPoint) -> Self {
        CourtPoint::new(raw.x, raw.y)
    }
}

impl From<CourtPoint> for RawCourtPoint {
    fn from(point: CourtPoint) -> Self {
        RawCourtPoint {
            x: point.x,
            y: point.y,
        }
    }
}

impl CourtPoint {
    pub fn new(x: f64, y: f64) -> Self {
        let bounds = COURT_BOUNDS;
        let x = CourtBounds::clip_axis(x, bounds.min_x, bounds.max_x);
        let y = CourtBounds::clip_axis(y, bounds.min_y, bounds.max_y);
        Self {
            x: round_hundredths(x),
            y: round_hundredths(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
