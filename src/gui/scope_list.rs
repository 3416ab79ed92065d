//! Scope table rendering

use std::time::Instant;

use egui::RichText;
use egui_extras::{Column, TableBuilder};

use super::animations::{animated_button, with_alpha};
use super::theme::{
    ACCENT_CYAN, ACCENT_GREEN, ACCENT_PURPLE, ACCENT_RED, BG_SECONDARY, TEXT_DIM, TEXT_MUTED,
    TEXT_PRIMARY,
};
use crate::views::{AdminAction, RowContent, ScopeListView, TableVisibility};

const ROW_HEIGHT: f32 = 28.0;

/// Render the list screen: toolbar, then the table or the placeholder
pub fn render_scope_list(
    ui: &mut egui::Ui,
    list: &ScopeListView,
    now: Instant,
    actions: &mut Vec<AdminAction>,
) {
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("SYSTEM SCOPES")
                .monospace()
                .size(18.0)
                .color(TEXT_PRIMARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if animated_button(ui, "+ New Scope", ACCENT_CYAN, "scope_new_btn").clicked() {
                actions.push(AdminAction::NewScope);
            }
            ui.add_space(8.0);
            if animated_button(ui, "Refresh", TEXT_DIM, "scope_refresh_btn").clicked() {
                actions.push(AdminAction::RefreshList);
            }
        });
    });
    ui.add_space(12.0);
    ui.separator();
    ui.add_space(12.0);

    match list.visibility() {
        TableVisibility::Hidden => {}
        TableVisibility::Placeholder => render_placeholder(ui),
        TableVisibility::Table => render_table(ui, list, now, actions),
    }
}

fn render_placeholder(ui: &mut egui::Ui) {
    egui::Frame::NONE
        .fill(BG_SECONDARY)
        .corner_radius(4.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.label(RichText::new("There are no system scopes defined.").color(TEXT_DIM));
            ui.label(
                RichText::new("Clients will only be able to request scopes registered here.")
                    .small()
                    .color(TEXT_MUTED),
            );
        });
}

fn render_table(
    ui: &mut egui::Ui,
    list: &ScopeListView,
    now: Instant,
    actions: &mut Vec<AdminAction>,
) {
    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::exact(90.0))
        .column(Column::initial(200.0).at_least(120.0))
        .column(Column::remainder().at_least(160.0))
        .column(Column::exact(110.0))
        .column(Column::exact(130.0))
        .header(22.0, |mut header| {
            for title in ["Icon", "Scope", "Description", "Flags", ""] {
                header.col(|ui| {
                    ui.label(RichText::new(title).small().color(TEXT_MUTED));
                });
            }
        })
        .body(|mut body| {
            for row_view in list.rows() {
                let frame = row_view.removal_frame(now);
                let opacity = frame.map_or(1.0, |f| f.opacity);
                let height = frame.map_or(ROW_HEIGHT, |f| (ROW_HEIGHT * f.height).max(1.0));
                let content = row_view.content();
                let busy = row_view.pending_delete().is_some() || frame.is_some();

                body.row(height, |mut row| {
                    row.col(|ui| {
                        let icon = content.icon.as_deref().unwrap_or("");
                        ui.label(RichText::new(icon).small().color(with_alpha(TEXT_DIM, opacity)));
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(&content.value)
                                .monospace()
                                .color(with_alpha(ACCENT_CYAN, opacity)),
                        );
                    });
                    row.col(|ui| {
                        ui.label(
                            RichText::new(&content.description)
                                .color(with_alpha(TEXT_PRIMARY, opacity)),
                        );
                    });
                    row.col(|ui| render_flags(ui, &content, opacity));
                    row.col(|ui| {
                        if frame.is_some() {
                            return;
                        }
                        let Some(id) = content.id else {
                            return;
                        };
                        ui.add_enabled_ui(!busy, |ui| {
                            if animated_button(ui, "Edit", TEXT_DIM, ("scope_edit", id)).clicked() {
                                actions.push(AdminAction::EditScope(id));
                            }
                            if animated_button(ui, "Delete", ACCENT_RED, ("scope_delete", id))
                                .clicked()
                            {
                                actions.push(AdminAction::RequestDelete(id));
                            }
                        });
                    });
                });
            }
        });
}

fn render_flags(ui: &mut egui::Ui, content: &RowContent, opacity: f32) {
    if content.default_scope {
        ui.label(
            RichText::new("default")
                .small()
                .color(with_alpha(ACCENT_GREEN, opacity)),
        )
        .on_hover_text("Granted to new clients by default");
    }
    if let Some(tooltip) = content.dyn_reg_tooltip {
        ui.label(
            RichText::new("dyn-reg")
                .small()
                .color(with_alpha(ACCENT_PURPLE, opacity)),
        )
        .on_hover_text(tooltip);
    }
    if content.structured {
        ui.label(RichText::new("param").small().color(with_alpha(TEXT_DIM, opacity)));
    }
}
