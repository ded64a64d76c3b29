//! The two bundled scenes.
//!
//! Each builder returns the initial [`AppState`] together with the control
//! panel bound to it; [`crate::app::run`] takes care of the rest.

pub mod cube;
pub mod materials;

use crate::{controls::ControlPanel, state::AppState};

/// An assembled scene and its debug panel.
pub struct Demo {
    pub state: AppState,
    pub panel: ControlPanel<AppState>,
}
