use lyra_core::session::{SessionCommand, RA_DEC_STEP_DEG, ROLL_STEP_DEG};

/// Map this frame's key presses to session commands.
///
/// Right/Left step the cursor; A/D pan in right ascension (A increases RA),
/// W/S in declination (W decreases it), Q/E adjust roll.
pub fn map_input(ctx: &egui::Context) -> Vec<SessionCommand> {
    let mut commands = Vec::new();
    ctx.input(|i| {
        if i.key_pressed(egui::Key::ArrowRight) {
            commands.push(SessionCommand::NextFrame);
        }
        if i.key_pressed(egui::Key::ArrowLeft) {
            commands.push(SessionCommand::PrevFrame);
        }
        if i.key_pressed(egui::Key::A) {
            commands.push(SessionCommand::AdjustRa(RA_DEC_STEP_DEG));
        }
        if i.key_pressed(egui::Key::D) {
            commands.push(SessionCommand::AdjustRa(-RA_DEC_STEP_DEG));
        }
        if i.key_pressed(egui::Key::W) {
            commands.push(SessionCommand::AdjustDec(-RA_DEC_STEP_DEG));
        }
        if i.key_pressed(egui::Key::S) {
            commands.push(SessionCommand::AdjustDec(RA_DEC_STEP_DEG));
        }
        if i.key_pressed(egui::Key::Q) {
            commands.push(SessionCommand::AdjustRoll(-ROLL_STEP_DEG));
        }
        if i.key_pressed(egui::Key::E) {
            commands.push(SessionCommand::AdjustRoll(ROLL_STEP_DEG));
        }
    });
    commands
}
