//! Hand tracking with velocity smoothing
//!
//! Raw joint samples arrive at sensor cadence, which is neither the update
//! cadence nor free of dropped frames. Each tracked joint keeps an
//! exponentially smoothed velocity so the update loop can extrapolate a
//! position for any tick, fresh sample or not.

mod hands;
mod tracked_point;

pub use hands::{HandPoints, HandTracking};
pub use tracked_point::TrackedPoint;
