//! Read-only heads-up panel
//!
//! Shows what the keyboard is currently pointed at and what each key does.
//! Nothing here edits the scene; all changes go through the key bindings.

use crate::{
    context::ViewerContext,
    control::{rotation::Arrow, PartClass},
};

/// Lines describing the current selection, built without imgui so they can be
/// checked in tests
pub fn selection_lines(context: &ViewerContext) -> Vec<String> {
    let class = context.selected_class();
    let mut lines = vec![
        format!("Selected: {}", context.selected_name()),
        format!("Path: {}", context.scene().path(context.selected())),
        format!("Rotation class: {}", class.label()),
    ];
    lines.extend(arrow_lines(class));
    lines
}

fn arrow_lines(class: PartClass) -> impl Iterator<Item = String> {
    [Arrow::Up, Arrow::Down, Arrow::Left, Arrow::Right]
        .into_iter()
        .map(move |arrow| {
            let (axis, sign) = class.rotation_for(arrow);
            let sign = if sign > 0.0 { '+' } else { '-' };
            format!("  {:?}: {}{}", arrow, sign, axis)
        })
}

/// Selection and controls overlay in the top-left corner
pub fn hud_panel(ui: &imgui::Ui, context: &ViewerContext) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Robot")
        .position([10.0, 10.0], imgui::Condition::FirstUseEver)
        .size([300.0, 0.0], imgui::Condition::FirstUseEver)
        .bg_alpha(0.6)
        .collapsible(true)
        .resizable(false)
        .build(|| {
            for line in selection_lines(context) {
                ui.text(&line);
            }

            ui.separator();
            if ui.collapsing_header("Controls", imgui::TreeNodeFlags::empty()) {
                for (key, description) in context.input_map().describe() {
                    ui.text(format!("{:>10}  {}", key, description));
                }
                ui.text_disabled("Drag to orbit, shift-drag to pan, wheel to zoom");
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewerConfig;
    use crate::control::{KeyId, KeyPhase};

    #[test]
    fn test_lines_follow_selection() {
        let mut context = ViewerContext::new(&ViewerConfig::default());
        let lines = selection_lines(&context);
        assert_eq!(lines[0], "Selected: Robot");
        assert_eq!(lines[2], "Rotation class: default");
        assert_eq!(lines[3], "  Up: +X");

        for key in ['s', 's', 'd', 'd'] {
            context.handle_key(KeyId::Char(key), KeyPhase::Pressed, false);
        }
        let lines = selection_lines(&context);
        assert_eq!(lines[0], "Selected: left arm");
        assert_eq!(lines[2], "Rotation class: left arm");
        assert_eq!(lines[3], "  Up: +Z");
        assert_eq!(lines.len(), 7);
    }
}
