//! eframe::App implementation for the scope admin
//!
//! Each frame pumps finished requests into the views, draws the current
//! route and applies whatever the user did.

use std::time::Instant;

use egui::RichText;

use super::dialogs::{render_alert, render_delete_confirmation, render_icon_picker, render_loading};
use super::scope_form::render_scope_form;
use super::scope_list::render_scope_list;
use super::theme::{ACCENT_CYAN, TEXT_MUTED, apply_theme};
use crate::views::{Route, ScopeAdmin};

pub struct ScopeAdminApp {
    admin: ScopeAdmin,
    theme_applied: bool,
}

impl ScopeAdminApp {
    pub fn new(admin: ScopeAdmin) -> Self {
        Self {
            admin,
            theme_applied: false,
        }
    }
}

impl eframe::App for ScopeAdminApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.theme_applied {
            apply_theme(ctx);
            self.theme_applied = true;
        }

        self.admin.pump();
        let now = Instant::now();
        let animating = self.admin.tick(now);

        let mut actions = Vec::new();
        let blocked = self.admin.alert().is_some() || self.admin.list().loading().is_visible();

        egui::TopBottomPanel::top("route_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("scope-admin").monospace().color(ACCENT_CYAN));
                ui.label(
                    RichText::new(format!("#{}", self.admin.route()))
                        .monospace()
                        .color(TEXT_MUTED),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| match self.admin.route() {
                Route::List => render_scope_list(ui, self.admin.list(), now, &mut actions),
                Route::New | Route::Edit(_) => {
                    if let Some(form) = self.admin.form_mut() {
                        render_scope_form(ui, form, &mut actions);
                    }
                }
            });
        });

        if let Some(form) = self.admin.form() {
            if form.is_icon_picker_open() && !blocked {
                render_icon_picker(ctx, &form.fields().icon, &mut actions);
            }
        }

        if let Some(id) = self.admin.list().confirming() {
            let value = self
                .admin
                .list()
                .row(id)
                .map(|row| row.content().value.clone())
                .unwrap_or_default();
            render_delete_confirmation(ctx, &value, &mut actions);
        }

        render_loading(ctx, self.admin.list().loading());

        if let Some(alert) = self.admin.alert() {
            render_alert(ctx, alert, &mut actions);
        }

        for action in actions {
            self.admin.apply(action);
        }

        if animating {
            ctx.request_repaint();
        } else if self.admin.is_busy() {
            // The dispatcher waker repaints on completion; this only keeps spinners moving
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

