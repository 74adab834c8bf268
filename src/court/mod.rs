// Court geometry and pointer mapping
//
// Everything recorded during a live game lives in court space: a fixed
// logical coordinate system shared with the heatmap renderer.

// Public API - what other modules can use
pub use bounds::{CourtBounds, CourtPoint, COURT_BOUNDS, DEFAULT_ACTION_POINT};
pub use mapper::{
    AffineTransform, CoordinateMapper, MappingError, PointerPosition, ScreenPoint, SurfaceBounds,
};

// Internal modules
mod bounds;
mod mapper;
