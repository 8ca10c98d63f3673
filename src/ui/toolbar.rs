use egui::{menu, RichText, Ui};
use rust_timeline_view::layout::Clock;
use rust_timeline_view::ViewMode;

use crate::app::TimelineApp;
use crate::ui::theme;

/// Render the top menu bar.
pub fn show_toolbar(app: &mut TimelineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  View  ").size(13.0), |ui| {
            let zoom_in = egui::Button::new("  Zoom In        Ctrl+Scroll ↑");
            if ui.add_enabled(app.viewport.mode.can_zoom_in(), zoom_in).clicked() {
                app.viewport.zoom_in();
                ui.close_menu();
            }
            let zoom_out = egui::Button::new("  Zoom Out      Ctrl+Scroll ↓");
            if ui.add_enabled(app.viewport.mode.can_zoom_out(), zoom_out).clicked() {
                app.viewport.zoom_out();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Timeline Scale").small().weak());
            for mode in ViewMode::ALL {
                if ui
                    .radio_value(&mut app.viewport.mode, mode, mode.label())
                    .clicked()
                {
                    ui.close_menu();
                }
            }
        });

        ui.separator();

        let add = egui::Button::new(format!("{} New Task", egui_phosphor::regular::PLUS));
        if ui.add_enabled(!app.timeline.rows.is_empty(), add).clicked() {
            app.new_task();
        }

        if ui.button(format!("{} Today", egui_phosphor::regular::CALENDAR)).clicked() {
            let today = app.clock.now().date();
            app.viewport.scroll_to_today(today);
            app.status_message = format!("Jumped to {}", today.format("%b %d, %Y"));
        }

        // Quick mode switch mirrors the menu radios
        for mode in ViewMode::ALL {
            ui.selectable_value(&mut app.viewport.mode, mode, mode.label());
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(&app.timeline.name)
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
        });
    });
}
