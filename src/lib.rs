//! Layout and dependency engine behind the timeline view.
//!
//! The library is pure: every function takes a caller-owned snapshot of the
//! tasks and rows and returns freshly derived values. The `rust-timeline-view`
//! binary is one host for it.

pub mod error;
pub mod format;
pub mod graph;
pub mod io;
pub mod layout;
pub mod model;
pub mod validation;

pub use error::{Result, TimelineError};
pub use model::{LayoutConfig, Row, Task, TaskMap, Timeline, TimelineViewport, ViewMode};
