use egui::Context as EguiContext;
use ferris_input::Action;
use ferris_sim::SimState;

/// Draw the HUD side panel. Returns actions triggered by its buttons.
pub fn draw(ctx: &EguiContext, sim: &SimState) -> Vec<Action> {
    let mut actions = Vec::new();

    egui::SidePanel::left("hud")
        .default_width(220.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Ferris Wheel");
            ui.separator();

            let anim = &sim.animation;
            ui.label(format!(
                "Angle: {:.0}°  ({})",
                anim.angle,
                if anim.animating { "running" } else { "paused" }
            ));
            ui.label(format!(
                "Sun: {}  Lamp: {}",
                on_off(sim.lighting.directional),
                on_off(sim.lighting.point)
            ));
            let cam = &sim.camera;
            ui.label(format!(
                "Camera: r={:.1} az={:.2} h={:.1}",
                cam.radius, cam.azimuth, cam.height
            ));
            ui.separator();

            if ui.button("Start / pause (a)").clicked() {
                actions.push(Action::ToggleAnimation);
            }
            ui.horizontal(|ui| {
                if ui.button("Sun (s)").clicked() {
                    actions.push(Action::ToggleDirectionalLight);
                }
                if ui.button("Lamp (l)").clicked() {
                    actions.push(Action::TogglePointLight);
                }
            });

            ui.separator();
            ui.small("Arrows: orbit / height | F1: hide | Esc: quit");
        });

    actions
}

fn on_off(flag: bool) -> &'static str {
    if flag { "on" } else { "off" }
}
