//! Geometry engine: dates to pixels, task boxes, header ticks and connectors.

pub mod clock;
pub mod lines;
pub mod pass;
pub mod position;
pub mod scale;

pub use clock::{Clock, FixedClock, SystemClock};
pub use lines::{dependency_line, DependencyLine};
pub use pass::{HeaderTick, LayoutPass, TimelineLayout};
pub use position::{
    clamp, date_from_position, duration, point_in_box, position, task_box, Bounds, TaskBox,
    TaskPosition,
};
pub use scale::{scale_labels, time_scale, ScaleTick, TimeScale};
