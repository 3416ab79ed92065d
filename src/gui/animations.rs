//! Animation helpers: hover-glow buttons and row fades

use egui::{Color32, Id, Response, RichText, Ui};

/// Seconds a hover glow takes to appear or vanish
const HOVER_FADE_SECS: f32 = 0.15;

/// Button that glows in its own color while hovered
pub fn animated_button(
    ui: &mut Ui,
    text: impl Into<RichText>,
    base_color: Color32,
    id_salt: impl std::hash::Hash,
) -> Response {
    let id = Id::new(id_salt);

    let was_hovered = ui
        .ctx()
        .memory(|mem| mem.data.get_temp::<bool>(id).unwrap_or(false));
    let glow = ui
        .ctx()
        .animate_bool_with_time(id.with("glow"), was_hovered, HOVER_FADE_SECS);

    let button = egui::Button::new(text.into().color(base_color))
        .fill(with_alpha(base_color, glow * 0.16))
        .stroke(egui::Stroke::new(1.0, with_alpha(base_color, glow * 0.6)));
    let response = ui.add(button);

    let is_hovered = response.hovered();
    ui.ctx().memory_mut(|mem| mem.data.insert_temp(id, is_hovered));
    if is_hovered != was_hovered || (glow > 0.01 && glow < 0.99) {
        ui.ctx().request_repaint();
    }

    response
}

/// Same color at `opacity` (0.0 - 1.0) of full alpha
pub fn with_alpha(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0) as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(with_alpha(Color32::WHITE, 2.0).a(), 255);
        assert_eq!(with_alpha(Color32::WHITE, -1.0).a(), 0);
    }
}
