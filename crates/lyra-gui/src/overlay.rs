use lyra_core::session::Session;

const MATCHED: egui::Color32 = egui::Color32::GREEN;
const UNMATCHED: egui::Color32 = egui::Color32::RED;
const RAY: egui::Color32 = egui::Color32::from_rgb(0, 255, 255);

/// Draw detection boxes, identification rays, and name labels for the
/// currently displayed frame.
///
/// `img_rect` is where the frame image sits on screen and `scale` maps image
/// pixels to screen points.
pub fn draw(painter: &egui::Painter, session: &Session, img_rect: egui::Rect, scale: f32) {
    let record = &session.current().record;
    let star_index = session.star_index();
    let to_screen =
        |x: f32, y: f32| img_rect.min + egui::vec2(x * scale, y * scale);

    // Rays fan out from the mean position of the identified stars.
    let mut sum = egui::Vec2::ZERO;
    let mut matched_count = 0usize;
    for (i, star) in record.stars.iter().enumerate() {
        if star_index.get(i).copied().flatten().is_some() {
            sum += egui::vec2(star.x, star.y);
            matched_count += 1;
        }
    }
    let center = (matched_count > 0)
        .then(|| to_screen(sum.x / matched_count as f32, sum.y / matched_count as f32));

    for (i, star) in record.stars.iter().enumerate() {
        let matched = star_index.get(i).copied().flatten();

        let box_min = to_screen(
            star.x - star.radius_x * 4.0,
            star.y - star.radius_y * 4.0,
        );
        let box_size = egui::vec2(star.radius_x * 8.0, star.radius_y * 8.0) * scale;
        let rect = egui::Rect::from_min_size(box_min, box_size);
        let color = if matched.is_some() { MATCHED } else { UNMATCHED };
        painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, color), egui::StrokeKind::Middle);

        if let (Some(catalog), Some(center)) = (matched, center) {
            painter.line_segment(
                [center, to_screen(star.x, star.y)],
                egui::Stroke::new(1.0, RAY),
            );

            let label = match session.names().get(catalog) {
                Some(name) => format!("{catalog} {name}"),
                None => format!("{catalog} ?"),
            };
            painter.text(
                rect.min - egui::vec2(4.0, 4.0),
                egui::Align2::RIGHT_TOP,
                label,
                egui::FontId::proportional(14.0),
                egui::Color32::WHITE,
            );
        }
    }
}
