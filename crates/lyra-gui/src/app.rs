use lyra_core::session::Session;

use crate::convert::frame_to_color_image;
use crate::input;
use crate::overlay;

const HUD_COLOR: egui::Color32 = egui::Color32::GREEN;

pub struct LyraApp {
    session: Session,
    texture: Option<egui::TextureHandle>,
    /// Session revision the texture was uploaded for; a stale value means
    /// the displayed entry changed underneath us.
    texture_revision: Option<u64>,
}

impl LyraApp {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            texture: None,
            texture_revision: None,
        }
    }

    /// Re-upload the current frame image when the session moved on.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let revision = self.session.revision();
        if self.texture.is_some() && self.texture_revision == Some(revision) {
            return;
        }
        let image = frame_to_color_image(&self.session.current().image);
        self.texture = Some(ctx.load_texture("frame", image, egui::TextureOptions::NEAREST));
        self.texture_revision = Some(revision);
    }
}

impl eframe::App for LyraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Commands run to completion on this thread; an extension blocks the
        // UI until its frame is generated.
        for command in input::map_input(ctx) {
            self.session.handle(command);
        }
        self.sync_texture(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_gray(10));

            if let Some(texture) = &self.texture {
                let tex_size = egui::vec2(texture.size()[0] as f32, texture.size()[1] as f32);
                let scale = (rect.width() / tex_size.x).min(rect.height() / tex_size.y);
                let img_rect =
                    egui::Rect::from_center_size(rect.center(), tex_size * scale);

                ui.painter().image(
                    texture.id(),
                    img_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );

                overlay::draw(ui.painter(), &self.session, img_rect, scale);
            }

            let hud = match self.session.current().record.attitude {
                Some(attitude) => attitude.to_string(),
                None => "Attitude is UNKNOWN".to_string(),
            };
            ui.painter().text(
                rect.left_top() + egui::vec2(6.0, 6.0),
                egui::Align2::LEFT_TOP,
                hud,
                egui::FontId::proportional(24.0),
                HUD_COLOR,
            );
        });
    }
}
