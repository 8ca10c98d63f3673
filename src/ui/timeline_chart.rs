use chrono::Datelike;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use rust_timeline_view::format;
use rust_timeline_view::layout::{DependencyLine, TaskPosition, TimelineLayout};
use rust_timeline_view::{Task, Timeline, TimelineViewport, ViewMode};

use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;

/// What happened in the chart this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub clicked_task: Option<String>,
    /// A click that landed on no task.
    pub clicked_empty: bool,
    pub hovered_task: Option<String>,
}

/// Render the row labels and the chart area.
pub fn show_timeline_chart(
    timeline: &Timeline,
    viewport: &mut TimelineViewport,
    layout: &TimelineLayout,
    selected_task: Option<&str>,
    hovered_task: Option<&str>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let cfg = &timeline.layout;
    let available = ui.available_size();
    let chart_width = (cfg.left_panel_width + layout.total_width).max(available.x);
    let chart_height = (HEADER_HEIGHT + layout.total_height + 40.0).max(available.y);

    // Ctrl+scroll steps the view mode
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll > 0.0 {
            viewport.zoom_in();
        } else if scroll < 0.0 {
            viewport.zoom_out();
        }
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(chart_width, chart_height), Sense::click());
            let origin = response.rect.min;
            // Top-left corner of the task area.
            let area = Pos2::new(origin.x + cfg.left_panel_width, origin.y + HEADER_HEIGHT);
            let to_screen = |pos: &TaskPosition| {
                Rect::from_min_size(
                    Pos2::new(area.x + pos.left, area.y + pos.top),
                    Vec2::new(pos.width, pos.height),
                )
            };

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            draw_rows(&painter, origin, area, timeline, chart_width);
            draw_header(&painter, origin, area, layout, viewport.mode, chart_width, chart_height);

            if let Some(x) = layout.today_x {
                draw_today_line(&painter, Pos2::new(area.x + x, area.y), chart_height);
            }

            for line in &layout.lines {
                let highlighted = hovered_task.is_some_and(|id| line.involves(id));
                draw_dependency(&painter, area, line, highlighted);
            }

            for id in &layout.order {
                let (Some(task), Some(pos)) = (timeline.tasks.get(id), layout.positions.get(id))
                else {
                    continue;
                };
                let rect = to_screen(pos);
                let is_selected = selected_task == Some(id.as_str());
                if task.is_milestone {
                    draw_milestone(&painter, task, rect, is_selected);
                } else {
                    draw_task_bar(&painter, task, rect, is_selected);
                }
            }

            draw_row_labels(&painter, origin, timeline, chart_height);

            let local = |p: Pos2| (p.x - area.x, p.y - area.y);

            if let Some(pointer) = response.hover_pos() {
                let (x, y) = local(pointer);
                if let Some(id) = layout.hit_test(x, y) {
                    interaction.hovered_task = Some(id.to_string());
                    if let Some(task) = timeline.tasks.get(id) {
                        show_task_tooltip(ui, task);
                        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    }
                }
            }

            if response.clicked() {
                let hit = response
                    .interact_pointer_pos()
                    .map(local)
                    .and_then(|(x, y)| layout.hit_test(x, y));
                match hit {
                    Some(id) => interaction.clicked_task = Some(id.to_string()),
                    None => interaction.clicked_empty = true,
                }
            }
        });

    interaction
}

fn show_task_tooltip(ui: &Ui, task: &Task) {
    egui::show_tooltip_at_pointer(
        ui.ctx(),
        ui.layer_id(),
        egui::Id::new(("task-tip", task.id.as_str())),
        |ui| {
            ui.strong(&task.title);
            ui.label(format::format_date_range(task.start.date(), task.end.date()));
            ui.label(format!("Progress: {}", format::format_progress(task.progress)));
            if let Some(assignee) = &task.assignee {
                ui.label(assignee);
            }
        },
    );
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    area: Pos2,
    layout: &TimelineLayout,
    mode: ViewMode,
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, area.y),
            Pos2::new(origin.x + width, area.y),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for (i, tick) in layout.ticks.iter().enumerate() {
        let x = area.x + tick.x;
        painter.line_segment(
            [Pos2::new(x, area.y), Pos2::new(x, origin.y + height)],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let date = tick.date.date();
        let is_weekend = date.weekday().num_days_from_monday() >= 5;
        let color = if mode == ViewMode::Day && is_weekend {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };

        match mode {
            ViewMode::Month => {
                painter.text(
                    Pos2::new(x + 5.0, origin.y + 22.0),
                    egui::Align2::LEFT_CENTER,
                    &tick.label,
                    theme::font_header(),
                    theme::TEXT_PRIMARY,
                );
            }
            ViewMode::Day | ViewMode::Week => {
                if i == 0 || date.day() == 1 || (mode == ViewMode::Week && date.day() <= 7) {
                    painter.text(
                        Pos2::new(x + 3.0, origin.y + 12.0),
                        egui::Align2::LEFT_CENTER,
                        date.format("%b %Y").to_string(),
                        theme::font_header(),
                        theme::TEXT_PRIMARY,
                    );
                }
                let label = if mode == ViewMode::Day {
                    date.format("%d").to_string()
                } else {
                    format!("{}  W{}", tick.label, format::iso_week_number(date))
                };
                painter.text(
                    Pos2::new(x + 3.0, origin.y + 30.0),
                    egui::Align2::LEFT_CENTER,
                    label,
                    theme::font_sub(),
                    color,
                );
            }
        }
    }
}

fn draw_rows(painter: &egui::Painter, origin: Pos2, area: Pos2, timeline: &Timeline, width: f32) {
    let cfg = &timeline.layout;
    for (i, _row) in timeline.rows.iter().enumerate() {
        let y = area.y + cfg.row_top(i);
        let row_bg = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK };
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(width, cfg.row_height)),
            0.0,
            row_bg,
        );
        painter.line_segment(
            [
                Pos2::new(origin.x, y + cfg.row_height),
                Pos2::new(origin.x + width, y + cfg.row_height),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_row_labels(painter: &egui::Painter, origin: Pos2, timeline: &Timeline, height: f32) {
    let cfg = &timeline.layout;
    let panel = Rect::from_min_size(origin, Vec2::new(cfg.left_panel_width, height));
    painter.rect_filled(panel, 0.0, theme::BG_LABELS);
    painter.line_segment(
        [panel.right_top(), panel.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    for (i, row) in timeline.rows.iter().enumerate() {
        let center_y = origin.y + HEADER_HEIGHT + cfg.row_top(i) + cfg.row_height / 2.0;
        let avatar = Pos2::new(origin.x + 16.0 + theme::AVATAR_RADIUS, center_y);
        painter.circle_filled(avatar, theme::AVATAR_RADIUS, theme::AVATAR_BG);
        painter.text(
            avatar,
            egui::Align2::CENTER_CENTER,
            format::initials(&row.label),
            theme::font_small(),
            Color32::WHITE,
        );
        painter.text(
            Pos2::new(avatar.x + theme::AVATAR_RADIUS + 10.0, center_y),
            egui::Align2::LEFT_CENTER,
            format::truncate_text(&row.label, 18),
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
    }
}

fn draw_today_line(painter: &egui::Painter, top: Pos2, height: f32) {
    painter.line_segment(
        [top, Pos2::new(top.x, top.y + height)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(top.x - badge_w / 2.0, top.y - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_dependency(painter: &egui::Painter, area: Pos2, line: &DependencyLine, highlighted: bool) {
    let (color, width) = if highlighted {
        (theme::DEPENDENCY_HIGHLIGHT, 3.0)
    } else {
        (theme::DEPENDENCY_LINE, 2.0)
    };
    let stroke = Stroke::new(width, color);

    let points: Vec<Pos2> = line
        .curve_points(theme::CURVE_SEGMENTS)
        .into_iter()
        .map(|(x, y)| Pos2::new(area.x + x, area.y + y))
        .collect();
    for pair in points.windows(2) {
        painter.line_segment([pair[0], pair[1]], stroke);
    }

    // Arrowhead pointing into the successor
    let tip = Pos2::new(area.x + line.x2, area.y + line.y2);
    let s = theme::ARROW_SIZE;
    painter.add(egui::Shape::convex_polygon(
        vec![
            tip,
            Pos2::new(tip.x - s, tip.y - s * 0.6),
            Pos2::new(tip.x - s, tip.y + s * 0.6),
        ],
        color,
        Stroke::NONE,
    ));
}

fn draw_task_bar(painter: &egui::Painter, task: &Task, bar_rect: Rect, is_selected: bool) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let color = task.color.unwrap_or(theme::DEFAULT_TASK_COLOR);

    // Soft shadow
    let shadow_rect = bar_rect.translate(Vec2::new(1.0, 2.0));
    painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

    painter.rect_filled(bar_rect, rounding, color);

    if task.progress > 0 {
        let fraction = task.progress.clamp(0, 100) as f32 / 100.0;
        let progress_rect = Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_rect.width() * fraction, bar_rect.height()),
        );
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Title and progress on the bar, clipped to its bounds
    if bar_rect.width() > 30.0 {
        let text = format!("{}  {}", task.title, format::format_progress(task.progress));
        let galley = painter.layout_no_wrap(text, theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

fn draw_milestone(painter: &egui::Painter, task: &Task, rect: Rect, is_selected: bool) {
    let size = rect.height() / 2.0;
    let center = Pos2::new(rect.left() + size, rect.center().y);
    let color = task.color.unwrap_or(theme::DEFAULT_TASK_COLOR);

    let points = vec![
        Pos2::new(center.x, center.y - size),
        Pos2::new(center.x + size, center.y),
        Pos2::new(center.x, center.y + size),
        Pos2::new(center.x - size, center.y),
    ];
    painter.add(egui::Shape::convex_polygon(points.clone(), color, Stroke::NONE));

    if is_selected {
        painter.add(egui::Shape::convex_polygon(
            points,
            Color32::TRANSPARENT,
            Stroke::new(2.0, theme::BORDER_ACCENT),
        ));
    }

    painter.text(
        Pos2::new(center.x + size + 6.0, center.y),
        egui::Align2::LEFT_CENTER,
        &task.title,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );
}
