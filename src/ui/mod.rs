pub mod task_panel;
pub mod theme;
pub mod timeline_chart;
pub mod toolbar;
