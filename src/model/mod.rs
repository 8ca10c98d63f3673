pub mod config;
pub mod row;
pub mod task;
pub mod timeline;
pub mod viewport;

pub use config::LayoutConfig;
pub use row::Row;
pub use task::Task;
pub use timeline::{TaskMap, Timeline, DEFAULT_TASK_COLORS};
pub use viewport::{TimelineViewport, ViewMode, ViewModeConfig};
