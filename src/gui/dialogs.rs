//! Modal windows: remote alerts, delete confirmation, loading and the icon picker

use egui::{RichText, Vec2};

use super::animations::animated_button;
use super::theme::{ACCENT_CYAN, ACCENT_GREEN, ACCENT_RED, ACCENT_YELLOW, TEXT_DIM, TEXT_PRIMARY};
use crate::views::{AdminAction, DELETE_CONFIRMATION, LoadingIndicator, RemoteAlert, icon_rows};

pub fn render_alert(ctx: &egui::Context, alert: &RemoteAlert, actions: &mut Vec<AdminAction>) {
    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .fixed_size(Vec2::new(420.0, 160.0))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("⚠ {}", alert.title))
                    .size(16.0)
                    .color(ACCENT_RED),
            );
            ui.add_space(12.0);
            ui.label(RichText::new(&alert.body).color(TEXT_PRIMARY));
            ui.add_space(16.0);
            if animated_button(ui, "Dismiss", TEXT_DIM, "alert_dismiss_btn").clicked() {
                actions.push(AdminAction::DismissAlert);
            }
        });
}

pub fn render_delete_confirmation(
    ctx: &egui::Context,
    value: &str,
    actions: &mut Vec<AdminAction>,
) {
    egui::Window::new("Confirm Delete")
        .collapsible(false)
        .resizable(false)
        .fixed_size(Vec2::new(380.0, 150.0))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("⚠ Delete \"{}\"?", value))
                    .size(16.0)
                    .color(ACCENT_YELLOW),
            );
            ui.add_space(12.0);
            ui.label(RichText::new(DELETE_CONFIRMATION).color(TEXT_PRIMARY));
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                if animated_button(ui, "Delete", ACCENT_RED, "confirm_delete_btn").clicked() {
                    actions.push(AdminAction::ConfirmDelete);
                }
                ui.add_space(8.0);
                if animated_button(ui, "Cancel", TEXT_DIM, "cancel_delete_btn").clicked() {
                    actions.push(AdminAction::CancelDelete);
                }
            });
        });
}

pub fn render_loading(ctx: &egui::Context, loading: &LoadingIndicator) {
    if !loading.is_visible() {
        return;
    }
    egui::Window::new("Loading")
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading...").color(TEXT_PRIMARY));
            });
            for label in loading.labels() {
                let (marker, color) = if label.done {
                    ("✓", ACCENT_GREEN)
                } else {
                    ("…", TEXT_DIM)
                };
                ui.label(RichText::new(format!("{} {}", marker, label.name)).color(color));
            }
        });
}

pub fn render_icon_picker(ctx: &egui::Context, current: &str, actions: &mut Vec<AdminAction>) {
    let mut open = true;
    egui::Window::new("Choose an icon")
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                egui::Grid::new("icon_picker_grid")
                    .num_columns(icon_rows().first().map_or(0, |row| row.len()))
                    .spacing([8.0, 6.0])
                    .show(ui, |ui| {
                        for row in icon_rows() {
                            for &name in row.iter() {
                                let color = if name == current { ACCENT_CYAN } else { TEXT_DIM };
                                if ui
                                    .selectable_label(name == current, RichText::new(name).color(color))
                                    .clicked()
                                {
                                    actions.push(AdminAction::SelectIcon(name.to_string()));
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
        });
    if !open {
        actions.push(AdminAction::CloseIconPicker);
    }
}
