use chrono::Duration;
use rust_timeline_view::layout::{Clock, LayoutPass, SystemClock};
use rust_timeline_view::{Task, Timeline, TimelineViewport, ViewMode};
use tracing::{debug, info, warn};

use crate::ui;
use crate::ui::task_panel::PanelAction;

/// Main application state.
pub struct TimelineApp {
    pub timeline: Timeline,
    pub viewport: TimelineViewport,
    pub selected_task: Option<String>,
    /// Working copy of the selected task; edits land here until saved.
    pub draft: Option<Task>,
    pub hovered_task: Option<String>,

    // Status message
    pub status_message: String,

    pub clock: SystemClock,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>, timeline: Timeline, mode: ViewMode) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);

        let clock = SystemClock;
        let viewport = initial_viewport(&timeline, mode, &clock);
        debug!(start = %viewport.start, end = %viewport.end, ?mode, "initial viewport");

        Self {
            timeline,
            viewport,
            selected_task: None,
            draft: None,
            hovered_task: None,
            status_message: "Ready".to_string(),
            clock,
        }
    }

    fn select_task(&mut self, id: &str) {
        self.selected_task = Some(id.to_string());
        self.draft = self.timeline.tasks.get(id).cloned();
        if let Some(task) = &self.draft {
            self.status_message = format!("Selected '{}'", task.title);
        }
    }

    /// Open a draft for a new task on the selected task's row, or the first row.
    pub fn new_task(&mut self) {
        let row_id = self
            .selected_task
            .as_deref()
            .and_then(|id| self.timeline.tasks.get(id))
            .map(|t| t.row_id.clone())
            .or_else(|| self.timeline.rows.first().map(|r| r.id.clone()));
        let Some(row_id) = row_id else {
            self.status_message = "No rows to add a task to".to_string();
            return;
        };

        let Some(task) = self.timeline.draft_task(&row_id, self.clock.now().date()) else {
            return;
        };
        debug!(task = %task.id, row = %task.row_id, "new task draft");
        self.selected_task = None;
        self.draft = Some(task);
        self.status_message = "New task: save to add it".to_string();
    }

    fn clear_selection(&mut self) {
        self.selected_task = None;
        self.draft = None;
    }

    fn save_draft(&mut self) {
        let Some(draft) = self.draft.clone() else {
            return;
        };
        let title = draft.title.clone();
        match self.timeline.apply_update(draft) {
            Ok(()) => {
                info!(task = %title, "task saved");
                self.status_message = format!("Saved '{}'", title);
                self.clear_selection();
            }
            Err(errors) => {
                warn!(task = %title, count = errors.len(), "task update rejected");
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                self.status_message = format!("Not saved: {}", messages.join("; "));
            }
        }
    }
}

/// Span of the loaded tasks padded a week before and two weeks after, or
/// the months around today when there is nothing to show.
fn initial_viewport(timeline: &Timeline, mode: ViewMode, clock: &dyn Clock) -> TimelineViewport {
    match timeline.date_span() {
        Some((start, end)) => TimelineViewport::new(
            start.checked_sub_signed(Duration::days(7)).unwrap_or(start),
            end.checked_add_signed(Duration::days(14)).unwrap_or(end),
            mode,
        ),
        None => TimelineViewport::around(clock.now().date(), mode),
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let layout = LayoutPass::new(&self.viewport, &self.timeline.layout)
            .with_clock(&self.clock)
            .run(&self.timeline);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.timeline.tasks.len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        ui.label(
                            egui::RichText::new(format!("View: {}", self.viewport.mode.label()))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Right panel: details of the selected task
        let mut panel_action = PanelAction::None;
        if let Some(draft) = self.draft.as_mut() {
            egui::SidePanel::right("task_panel")
                .default_width(ui::theme::SIDE_PANEL_WIDTH)
                .min_width(220.0)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(8.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    panel_action = ui::task_panel::show_task_panel(draft, &self.timeline, ui);
                });
        }
        match panel_action {
            PanelAction::Save => self.save_draft(),
            PanelAction::Close => self.clear_selection(),
            PanelAction::Rejected(err) => {
                debug!(%err, "dependency edit refused");
                self.status_message = err.to_string();
            }
            PanelAction::None => {}
        }

        // Central panel: timeline chart
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::timeline_chart::show_timeline_chart(
                    &self.timeline,
                    &mut self.viewport,
                    &layout,
                    self.selected_task.as_deref(),
                    self.hovered_task.as_deref(),
                    ui,
                )
            })
            .inner;

        self.hovered_task = interaction.hovered_task;
        if let Some(id) = interaction.clicked_task {
            self.select_task(&id);
        } else if interaction.clicked_empty {
            self.clear_selection();
        }
    }
}
