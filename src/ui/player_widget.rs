use eframe::egui;

use crate::player::controller::AudioPlayer;

// Layout constants
const BUTTON_SIZE: f32 = 36.0;
const TRACK_HEIGHT: f32 = 6.0;
const TRACK_HEIGHT_HOVERED: f32 = 9.0;
const HIT_HEIGHT: f32 = 24.0;

/// The landing page audio player: play/pause button, seek track, time label.
pub struct PlayerWidget<'a> {
    player: &'a mut AudioPlayer,
}

impl<'a> PlayerWidget<'a> {
    pub fn new(player: &'a mut AudioPlayer) -> Self {
        Self { player }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let glyph = if self.player.is_playing() {
                "⏸"
            } else {
                "▶"
            };
            let button = egui::Button::new(egui::RichText::new(glyph).size(18.0))
                .min_size(egui::vec2(BUTTON_SIZE, BUTTON_SIZE));
            if ui.add(button).clicked() {
                self.player.toggle();
            }

            // Time label sits at the right edge; the track takes what's left.
            let label = format!(
                "{} / {}",
                format_time(self.player.state.current_time),
                format_time(self.player.state.duration)
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(egui::RichText::new(label).size(13.0));
                ui.add_space(6.0);

                // The hit rect is taller than the drawn track, the hover-grown
                // hit area of the original.
                let desired = egui::vec2(ui.available_width(), HIT_HEIGHT);
                let (rect, response) =
                    ui.allocate_exact_size(desired, egui::Sense::click_and_drag());

                self.handle_pointer(rect, &response);
                draw_track(
                    ui,
                    rect,
                    self.player.state.progress_fraction(),
                    response.hovered() || self.player.state.is_dragging,
                );
            });
        });
    }

    // egui keeps delivering drag positions after the pointer leaves the rect,
    // which stands in for the original's document-level mouse listeners.
    fn handle_pointer(&mut self, rect: egui::Rect, response: &egui::Response) {
        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.player.begin_scrub(pointer_fraction(rect, pos.x));
            }
        }
        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.player.scrub_to(pointer_fraction(rect, pos.x));
            }
        }
        if response.drag_stopped() {
            self.player.end_scrub();
        }
        // Press-and-release without movement: seek once and let go.
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.player.begin_scrub(pointer_fraction(rect, pos.x));
                self.player.end_scrub();
            }
        }
    }
}

fn draw_track(ui: &egui::Ui, rect: egui::Rect, fraction: f32, hovered: bool) {
    let height = if hovered {
        TRACK_HEIGHT_HOVERED
    } else {
        TRACK_HEIGHT
    };
    let track_rect =
        egui::Rect::from_center_size(rect.center(), egui::vec2(rect.width(), height));
    let rounding = height / 2.0;

    let painter = ui.painter();
    painter.rect_filled(track_rect, rounding, egui::Color32::from_black_alpha(26));

    if fraction > 0.0 {
        let fill_rect = egui::Rect::from_min_size(
            track_rect.min,
            egui::vec2(track_rect.width() * fraction, track_rect.height()),
        );
        let fill_color = if hovered {
            egui::Color32::from_gray(40)
        } else {
            egui::Color32::BLACK
        };
        painter.rect_filled(fill_rect, rounding, fill_color);
    }
}

/// Maps a pointer x position to a seek fraction of the track, clamped to `[0, 1]`.
fn pointer_fraction(rect: egui::Rect, x: f32) -> f32 {
    if rect.width() <= 0.0 {
        return 0.0;
    }
    ((x - rect.left()) / rect.width()).clamp(0.0, 1.0)
}

/// Formats seconds as `m:ss` for the time label.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(65.0), "1:05");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(59.9), "0:59");
        assert_eq!(format_time(-2.0), "0:00");
    }

    #[test]
    fn test_pointer_fraction_clamps_outside_track() {
        let rect = egui::Rect::from_min_size(egui::pos2(100.0, 0.0), egui::vec2(400.0, 24.0));
        assert_eq!(pointer_fraction(rect, 50.0), 0.0);
        assert_eq!(pointer_fraction(rect, 100.0), 0.0);
        assert_eq!(pointer_fraction(rect, 200.0), 0.25);
        assert_eq!(pointer_fraction(rect, 500.0), 1.0);
        assert_eq!(pointer_fraction(rect, 900.0), 1.0);
    }

    #[test]
    fn test_pointer_fraction_degenerate_track() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(0.0, 24.0));
        assert_eq!(pointer_fraction(rect, 10.0), 0.0);
    }
}
