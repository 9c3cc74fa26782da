//! egui overlay: binding help text and the stamp editor.

use crate::config::SPAWN_PATTERN_RADIUS;
use crate::controller::{Action, InteractionController};
use crate::grid::CellColor;

const EDITOR_CELL: f32 = 16.0;

fn color32(color: CellColor) -> egui::Color32 {
    let [r, g, b, a] = color.0;
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Stamp editor rows, top row first (dy = +R down to -R).
pub fn editor_rows() -> impl Iterator<Item = Vec<(i32, i32)>> {
    let r = SPAWN_PATTERN_RADIUS;
    (-r..=r).rev().map(move |dy| (-r..=r).map(|dx| (dx, dy)).collect())
}

/// Draws the overlay and returns the actions triggered by clicks.
pub fn overlay(ctx: &egui::Context, controller: &InteractionController) -> Vec<Action> {
    let mut actions = Vec::new();
    if !controller.show_ui {
        return actions;
    }

    let theme = controller.theme();
    let (fg, bg, disabled) = (color32(theme.foreground), color32(theme.background), color32(theme.disabled));

    egui::Area::new(egui::Id::new("status_overlay"))
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(bg)
                .inner_margin(egui::Margin::same(10.0))
                .show(ui, |ui| {
                    let text = controller.status_lines().join("\n");
                    ui.label(egui::RichText::new(text).monospace().size(14.0).color(fg));
                    ui.add_space(10.0);

                    ui.spacing_mut().item_spacing = egui::vec2(1.0, 1.0);
                    for row in editor_rows() {
                        ui.horizontal(|ui| {
                            for (dx, dy) in row {
                                let fill = if controller.pattern.contains(dx, dy) { fg } else { disabled };
                                let button = egui::Button::new("")
                                    .fill(fill)
                                    .min_size(egui::vec2(EDITOR_CELL, EDITOR_CELL));
                                if ui.add(button).clicked() {
                                    actions.push(Action::TogglePatternCell { dx, dy });
                                }
                            }
                        });
                    }
                });
        });

    actions
}
