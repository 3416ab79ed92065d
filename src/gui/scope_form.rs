//! Scope form rendering

use egui::RichText;

use super::animations::animated_button;
use super::theme::{ACCENT_CYAN, ACCENT_GREEN, TEXT_DIM, TEXT_MUTED, TEXT_PRIMARY};
use crate::views::{AdminAction, ScopeFormView};

const LABEL_WIDTH: f32 = 180.0;

pub fn render_scope_form(
    ui: &mut egui::Ui,
    form: &mut ScopeFormView,
    actions: &mut Vec<AdminAction>,
) {
    let title = form.title();
    let saving = form.saving().is_some();
    let structured_visible = form.is_structured_param_visible();

    ui.label(
        RichText::new(title)
            .monospace()
            .size(18.0)
            .color(TEXT_PRIMARY),
    );
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(12.0);

    ui.add_enabled_ui(!saving, |ui| {
        let fields = form.fields_mut();

        egui::Grid::new("scope_form_grid")
            .num_columns(2)
            .spacing([12.0, 10.0])
            .min_col_width(LABEL_WIDTH)
            .show(ui, |ui| {
                ui.label(RichText::new("Scope").color(TEXT_DIM));
                ui.add(
                    egui::TextEdit::singleline(&mut fields.value)
                        .hint_text("e.g. profile")
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label(RichText::new("Description").color(TEXT_DIM));
                ui.add(
                    egui::TextEdit::multiline(&mut fields.description)
                        .desired_rows(2)
                        .desired_width(320.0),
                );
                ui.end_row();

                ui.label(RichText::new("Icon").color(TEXT_DIM));
                ui.horizontal(|ui| {
                    let shown = if fields.icon.is_empty() {
                        RichText::new("(none)").color(TEXT_MUTED)
                    } else {
                        RichText::new(&fields.icon).color(ACCENT_CYAN)
                    };
                    ui.label(shown);
                    if animated_button(ui, "Choose", TEXT_DIM, "icon_choose_btn").clicked() {
                        actions.push(AdminAction::OpenIconPicker);
                    }
                });
                ui.end_row();

                ui.label(RichText::new("Default").color(TEXT_DIM));
                ui.checkbox(&mut fields.default_scope, "Granted to new clients by default");
                ui.end_row();

                ui.label(RichText::new("Dynamic registration").color(TEXT_DIM));
                ui.checkbox(
                    &mut fields.allow_dyn_reg,
                    "Allow dynamically registered clients to request this scope",
                );
                ui.end_row();

                ui.label(RichText::new("Structured").color(TEXT_DIM));
                let mut structured = fields.structured;
                if ui
                    .checkbox(&mut structured, "Takes a parameter (scope:value)")
                    .changed()
                {
                    actions.push(AdminAction::SetStructured(structured));
                }
                ui.end_row();

                if structured_visible {
                    ui.label(RichText::new("Parameter description").color(TEXT_DIM));
                    ui.add(
                        egui::TextEdit::singleline(&mut fields.structured_param_description)
                            .desired_width(320.0),
                    );
                    ui.end_row();
                }
            });
    });

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        if saving {
            ui.spinner();
            ui.label(RichText::new("Saving...").color(TEXT_DIM));
        } else if animated_button(ui, "Save", ACCENT_GREEN, "scope_save_btn").clicked() {
            actions.push(AdminAction::SaveForm);
        }
        ui.add_space(8.0);
        if animated_button(ui, "Cancel", TEXT_DIM, "scope_cancel_btn").clicked() {
            actions.push(AdminAction::CancelForm);
        }
    });
}
