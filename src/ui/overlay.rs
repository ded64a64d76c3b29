//! Screen-space label drawing.

use crate::labels::LabelLayer;

const PADDING: [f32; 2] = [4.0, 2.0];

/// Draws every visible label whose anchor lies in front of the camera.
pub fn draw_labels(ui: &imgui::Ui, labels: &LabelLayer) {
    let draw_list = ui.get_foreground_draw_list();

    for label in labels.iter().filter(|l| l.is_visible() && l.in_depth_range()) {
        let size = ui.calc_text_size(&label.text);
        let [x, y] = label.draw_origin(size[0]);

        draw_list
            .add_rect(
                [x - PADDING[0], y - PADDING[1]],
                [x + size[0] + PADDING[0], y + size[1] + PADDING[1]],
                [0.0, 0.0, 0.0, 0.55],
            )
            .filled(true)
            .rounding(3.0)
            .build();
        draw_list.add_text([x, y], [1.0, 1.0, 1.0, 1.0], &label.text);
    }
}
