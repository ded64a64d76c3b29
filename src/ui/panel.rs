//! Draws a [`ControlPanel`] with imgui widgets.
//!
//! Drawing never mutates the state. Every widget the user touched produces a
//! [`ControlEdit`]; the caller applies them once the frame has been rendered.

use imgui::Condition;

use crate::controls::{Binding, ControlEdit, ControlPanel, ControlValue, ControllerId, Entry, Folder};

const PANEL_WIDTH: f32 = 320.0;

/// Draws `panel` as a window in the top-right corner and returns the edits
/// made this frame.
pub fn draw_control_panel<S>(ui: &imgui::Ui, panel: &ControlPanel<S>, state: &S) -> Vec<ControlEdit> {
    let mut edits = Vec::new();
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return edits;
    }

    ui.window(panel.title())
        .size([PANEL_WIDTH, display_size[1] * 0.8], Condition::FirstUseEver)
        .position(
            [(display_size[0] - PANEL_WIDTH - 10.0).max(0.0), 10.0],
            Condition::FirstUseEver,
        )
        .collapsible(true)
        .build(|| {
            draw_folder(ui, panel, panel.root_folder(), state, &mut edits);
        });

    edits
}

fn draw_folder<S>(
    ui: &imgui::Ui,
    panel: &ControlPanel<S>,
    folder: &Folder,
    state: &S,
    edits: &mut Vec<ControlEdit>,
) {
    for entry in folder.entries() {
        match *entry {
            Entry::Controller(id) => {
                if let Some(edit) = draw_controller(ui, panel, id, state) {
                    edits.push(edit);
                }
            }
            Entry::Folder(id) => {
                let Some(child) = panel.folder(id) else {
                    continue;
                };
                let label = format!("{}##folder{}", child.name, id.index());
                if let Some(_node) = ui
                    .tree_node_config(&label)
                    .opened(child.open, Condition::FirstUseEver)
                    .framed(true)
                    .push()
                {
                    draw_folder(ui, panel, child, state, edits);
                }
            }
        }
    }
}

fn draw_controller<S>(
    ui: &imgui::Ui,
    panel: &ControlPanel<S>,
    id: ControllerId,
    state: &S,
) -> Option<ControlEdit> {
    let controller = panel.controller(id)?;
    let label = format!("{}##ctl{}", controller.label(), id.index());

    let value = match (controller.binding(), controller.binding().read(state)) {
        (Binding::Number { range, .. }, ControlValue::Number(current)) => {
            let mut v = current;
            let format = format!("%.{}f", range.precision());
            ui.slider_config(&label, range.min, range.max)
                .display_format(&format)
                .build(&mut v)
                .then_some(ControlValue::Number(v))
        }
        (_, ControlValue::Toggle(current)) => {
            let mut v = current;
            ui.checkbox(&label, &mut v).then_some(ControlValue::Toggle(v))
        }
        (_, ControlValue::Color(current)) => {
            let mut v = current;
            ui.color_edit3(&label, &mut v).then_some(ControlValue::Color(v))
        }
        _ => None,
    }?;

    Some(ControlEdit {
        controller: id,
        value,
    })
}
