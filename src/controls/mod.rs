//! Debug controls bound to application state.
//!
//! Each [`Controller`] owns a typed getter/setter pair resolved when the
//! panel is built, so a write through the panel can only reach the one
//! property it was bound to.

pub mod binding;
pub mod panel;

pub use binding::{Accessor, Binding, ControlValue, NumberRange};
pub use panel::{
    ControlEdit, ControlPanel, Controller, ControllerBuilder, ControllerId, Entry, Folder,
    FolderBuilder, FolderId,
};
