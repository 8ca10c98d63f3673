use serde::{Deserialize, Serialize};

/// Pixel constants the layout pass works with.
///
/// Every field has a default so a timeline file may override only the
/// values it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    pub row_height: f32,
    pub task_height: f32,
    pub milestone_height: f32,
    /// Width of the row-label column to the left of the chart.
    pub left_panel_width: f32,
    pub min_task_width: f32,
    /// Gap between the top of a row and the top of its task bars.
    pub task_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: 60.0,
            task_height: 40.0,
            milestone_height: 24.0,
            left_panel_width: 200.0,
            min_task_width: 20.0,
            task_padding: 8.0,
        }
    }
}

impl LayoutConfig {
    /// Top edge of the row at `index`.
    pub fn row_top(&self, index: usize) -> f32 {
        index as f32 * self.row_height
    }
}
