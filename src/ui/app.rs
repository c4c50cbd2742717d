use eframe::egui;

use crate::player::controller::AudioPlayer;
use crate::renderer::background::BackgroundVideo;
use crate::types::config::LandingConfig;
use crate::ui::player_widget::PlayerWidget;

const PLAYER_WIDTH: f32 = 500.0;

pub struct LandingApp {
    pub config: LandingConfig,
    pub player: AudioPlayer,
    pub background: Option<BackgroundVideo>,
    bg_texture: Option<egui::TextureHandle>,
}

impl LandingApp {
    pub fn new(
        config: LandingConfig,
        player: AudioPlayer,
        background: Option<BackgroundVideo>,
    ) -> Self {
        Self {
            config,
            player,
            background,
            bg_texture: None,
        }
    }

    /// Update the egui texture from the latest decoded background frame.
    fn update_background(&mut self, ctx: &egui::Context) {
        let Some(background) = self.background.as_mut() else {
            return;
        };
        if let Some(frame) = background.poll_frame() {
            let color_img = egui::ColorImage::from_rgba_unmultiplied(
                [frame.width as usize, frame.height as usize],
                &frame.data,
            );
            self.bg_texture = Some(ctx.load_texture(
                "landing_background",
                color_img,
                egui::TextureOptions::LINEAR,
            ));
        }
    }

    // Cover-fit at half opacity: scale the frame until it fills the window,
    // cropping the overflow, then tint it down over the light base fill.
    fn paint_background(&self, ui: &egui::Ui) {
        let Some(texture) = &self.bg_texture else {
            return;
        };
        let screen = ui.ctx().screen_rect();
        let tex_size = texture.size_vec2();
        if tex_size.x <= 0.0 || tex_size.y <= 0.0 {
            return;
        }
        let scale = (screen.width() / tex_size.x).max(screen.height() / tex_size.y);
        let rect = egui::Rect::from_center_size(screen.center(), tex_size * scale);
        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::from_white_alpha(128),
        );
    }

    fn show_content(&mut self, ui: &mut egui::Ui) {
        let screen_height = ui.ctx().screen_rect().height();
        let side_margin = ui.available_width() * 0.2;

        ui.add_space(screen_height * 0.2);

        // Heading block, left-aligned inside the content margins
        ui.horizontal(|ui| {
            ui.add_space(side_margin);
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&self.config.heading)
                            .size(56.0)
                            .strong()
                            .color(egui::Color32::BLACK),
                    );
                    ui.label(
                        egui::RichText::new(&self.config.version_tag)
                            .size(18.0)
                            .color(egui::Color32::GRAY),
                    );
                });
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(&self.config.tagline)
                        .size(28.0)
                        .strong()
                        .color(egui::Color32::BLACK),
                );
            });
        });

        ui.add_space(screen_height * 0.3);

        // Caption and player, centered
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new(&self.config.caption)
                    .size(15.0)
                    .color(egui::Color32::from_gray(40)),
            );
        });
        ui.add_space(12.0);

        let player_width = PLAYER_WIDTH.min(ui.available_width());
        let pad = ((ui.available_width() - player_width) / 2.0).max(0.0);
        ui.horizontal(|ui| {
            ui.add_space(pad);
            ui.allocate_ui(egui::vec2(player_width, 48.0), |ui| {
                ui.set_width(player_width);
                PlayerWidget::new(&mut self.player).show(ui);
            });
        });
    }
}

impl eframe::App for LandingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.player.tick();
        self.update_background(ctx);

        let frame = egui::Frame::default().fill(egui::Color32::from_gray(235));
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            self.paint_background(ui);
            self.show_content(ui);
        });

        // Keep repainting while media is running; otherwise stay idle.
        if self.player.is_playing() || self.background.is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(16));
        }
    }
}
