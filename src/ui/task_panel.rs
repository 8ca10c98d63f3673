use egui::{Color32, Id, RichText, Ui};
use rust_timeline_view::format;
use rust_timeline_view::graph;
use rust_timeline_view::model::DEFAULT_TASK_COLORS;
use rust_timeline_view::validation::{self, ValidationError};
use rust_timeline_view::{Row, Task, TaskMap, Timeline};

use crate::ui::theme;

/// Actions the detail panel can request.
pub enum PanelAction {
    None,
    Save,
    Close,
    /// A dependency edit was refused.
    Rejected(ValidationError),
}

fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(10.0).color(theme::TEXT_DIM).strong());
}

fn task_title(tasks: &TaskMap, id: &str) -> String {
    tasks
        .get(id)
        .map(|t| t.title.clone())
        .unwrap_or_else(|| format!("{} (missing)", id))
}

/// Edit an optional text field through a scratch buffer.
fn optional_text(ui: &mut Ui, value: &mut Option<String>, hint: &str, multiline: bool) {
    let mut buffer = value.clone().unwrap_or_default();
    let edit = if multiline {
        egui::TextEdit::multiline(&mut buffer)
    } else {
        egui::TextEdit::singleline(&mut buffer)
    };
    let resp = ui.add_sized(
        [ui.available_width(), if multiline { 60.0 } else { 24.0 }],
        edit.hint_text(hint).font(egui::FontId::proportional(12.0)),
    );
    if resp.changed() {
        *value = (!buffer.trim().is_empty()).then_some(buffer);
    }
}

/// Render the detail panel for the task being edited.
///
/// Edits go to `draft`; nothing reaches the timeline until the caller acts
/// on [`PanelAction::Save`].
pub fn show_task_panel(draft: &mut Task, timeline: &Timeline, ui: &mut Ui) -> PanelAction {
    let mut action = PanelAction::None;
    let tasks = &timeline.tasks;
    let is_new = !tasks.contains_key(&draft.id);

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let heading = if is_new { "New Task" } else { "Task Details" };
        ui.label(RichText::new(heading).strong().size(14.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let close = ui.add(
                egui::Button::new(RichText::new(egui_phosphor::regular::X).size(12.0)).frame(false),
            );
            if close.on_hover_text("Close (Esc)").clicked() {
                action = PanelAction::Close;
            }
        });
    });
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.spacing_mut().item_spacing.y = 6.0;

        section_label(ui, "Task Name");
        ui.add_sized(
            [ui.available_width(), 24.0],
            egui::TextEdit::singleline(&mut draft.title)
                .hint_text("Enter task name")
                .font(egui::FontId::proportional(12.0)),
        );

        section_label(ui, "Row");
        row_picker(ui, &mut draft.row_id, &timeline.rows);

        section_label(ui, "Date Range");
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format::format_date_range(draft.start.date(), draft.end.date()))
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
            ui.label(
                RichText::new(format!("({})", format::format_duration(draft.start, draft.end)))
                    .size(10.0)
                    .color(theme::TEXT_DIM),
            );
        });

        if !draft.is_milestone {
            section_label(ui, "Progress");
            let slider = egui::Slider::new(&mut draft.progress, 0..=100)
                .step_by(5.0)
                .suffix("%");
            ui.add_sized([ui.available_width(), 20.0], slider);
        }

        section_label(ui, "Assignee");
        optional_text(ui, &mut draft.assignee, "Enter assignee name", false);

        section_label(ui, "Color");
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
            for color in DEFAULT_TASK_COLORS {
                let is_current = draft.color == Some(color);
                let size = if is_current { 22.0 } else { 18.0 };
                let (rect, resp) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
                ui.painter().rect_filled(rect, egui::Rounding::same(4.0), color);
                if is_current {
                    ui.painter().rect_stroke(
                        rect.expand(1.0),
                        egui::Rounding::same(5.0),
                        egui::Stroke::new(2.0, Color32::WHITE),
                    );
                }
                if resp.on_hover_text("Click to set color").clicked() {
                    draft.color = Some(color);
                }
            }
        });

        section_label(ui, "Description");
        optional_text(ui, &mut draft.description, "Enter task description", true);

        ui.separator();
        if let Some(rejected) = show_dependencies(draft, tasks, ui) {
            action = PanelAction::Rejected(rejected);
        }

        ui.separator();
        ui.horizontal(|ui| {
            let save_label = if is_new { "Add Task" } else { "Save Changes" };
            let save = egui::Button::new(RichText::new(save_label).color(Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add(save).clicked() {
                action = PanelAction::Save;
            }
            if ui.button("Cancel").clicked() {
                action = PanelAction::Close;
            }
        });

        let problems = validation::validate_task(draft);
        for problem in problems {
            ui.label(RichText::new(problem.to_string()).size(10.0).color(theme::ERROR_TEXT));
        }
    });

    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        action = PanelAction::Close;
    }

    action
}

fn row_picker(ui: &mut Ui, row_id: &mut String, rows: &[Row]) {
    let current = rows
        .iter()
        .find(|r| r.id == *row_id)
        .map(|r| r.label.clone())
        .unwrap_or_else(|| format!("{} (missing)", row_id));
    egui::ComboBox::from_id_salt("task-row")
        .selected_text(RichText::new(current).size(11.0))
        .width(ui.available_width().min(220.0))
        .show_ui(ui, |ui| {
            for row in rows {
                ui.selectable_value(&mut *row_id, row.id.clone(), &row.label);
            }
        });
}

/// Dependency list, dependents, chain and the add picker.
fn show_dependencies(draft: &mut Task, tasks: &TaskMap, ui: &mut Ui) -> Option<ValidationError> {
    let mut rejected = None;
    let task_id = draft.id.clone();

    section_label(ui, "Dependencies");
    if draft.dependencies.is_empty() {
        ui.label(RichText::new("No dependencies").size(9.5).color(theme::TEXT_DIM));
    }
    let mut remove = None;
    for (idx, dep) in draft.dependencies.iter().enumerate() {
        let missing = !tasks.contains_key(dep);
        ui.horizontal(|ui| {
            let color = if missing { theme::TEXT_DIM } else { theme::TEXT_SECONDARY };
            ui.label(
                RichText::new(format!("{} {}", egui_phosphor::regular::ARROW_LEFT, task_title(tasks, dep)))
                    .size(11.0)
                    .color(color),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let del = ui.add(
                    egui::Button::new(RichText::new(egui_phosphor::regular::X).size(9.0)).frame(false),
                );
                if del.on_hover_text("Remove dependency").clicked() {
                    remove = Some(idx);
                }
            });
        });
    }
    if let Some(idx) = remove {
        draft.dependencies.remove(idx);
    }

    let dependents = graph::direct_dependents(&task_id, tasks);
    if !dependents.is_empty() {
        section_label(ui, "Blocks");
        for id in dependents {
            ui.label(
                RichText::new(format!("{} {}", egui_phosphor::regular::ARROW_RIGHT, task_title(tasks, id)))
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
        }
    }

    let chain = graph::dependency_chain(&task_id, tasks);
    if chain.len() > 1 {
        section_label(ui, "Chain");
        let titles: Vec<String> = chain.iter().map(|id| task_title(tasks, id)).collect();
        let arrow = format!(" {} ", egui_phosphor::regular::ARROW_RIGHT);
        ui.label(
            RichText::new(titles.join(arrow.as_str()))
                .size(10.5)
                .color(theme::TEXT_SECONDARY),
        );
    }

    // Add-dependency picker; the selection lives in egui temp data between frames.
    let candidates: Vec<(&str, &str)> = tasks
        .values()
        .filter(|t| t.id != task_id && !draft.dependencies.contains(&t.id))
        .map(|t| (t.id.as_str(), t.title.as_str()))
        .collect();
    if candidates.is_empty() {
        return rejected;
    }

    let picker_id = Id::new(("dep-picker", task_id.as_str()));
    let mut picked: Option<String> = ui.ctx().data_mut(|d| d.get_temp::<Option<String>>(picker_id)).flatten();
    let picked_label = picked
        .as_deref()
        .and_then(|id| candidates.iter().find(|(cid, _)| *cid == id))
        .map(|(_, title)| title.to_string())
        .unwrap_or_else(|| "- pick task -".to_string());

    section_label(ui, "Add dependency");
    ui.horizontal(|ui| {
        let combo_w = (ui.available_width() - 36.0).clamp(60.0, 220.0);
        egui::ComboBox::from_id_salt("new-dep-target")
            .selected_text(RichText::new(&picked_label).size(11.0))
            .width(combo_w)
            .show_ui(ui, |ui| {
                for (cid, title) in &candidates {
                    if ui.selectable_label(picked.as_deref() == Some(*cid), *title).clicked() {
                        picked = Some(cid.to_string());
                    }
                }
            });

        let can_add = picked.is_some();
        let btn = egui::Button::new(RichText::new(egui_phosphor::regular::PLUS).color(Color32::WHITE))
            .fill(if can_add { theme::ACCENT } else { theme::BG_FIELD })
            .rounding(egui::Rounding::same(4.0));
        if ui.add_enabled(can_add, btn).clicked() {
            if let Some(target) = picked.take() {
                match validation::check_dependency(&task_id, &target, tasks) {
                    Ok(()) => draft.dependencies.push(target),
                    Err(err) => rejected = Some(err),
                }
            }
        }
    });

    ui.ctx().data_mut(|d| d.insert_temp(picker_id, picked));
    rejected
}
