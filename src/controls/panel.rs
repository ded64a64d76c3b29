//! Folder-organised control panel.
//!
//! The panel only describes controllers; the `ui` module draws them. Widget
//! interaction comes back as [`ControlEdit`]s which are applied through
//! [`ControlPanel::apply`] between frames.

use std::fmt;

use crate::error::ControlError;

use super::binding::{Accessor, Binding, ControlValue, NumberRange};

/// Reaction run after a controller wrote its property.
pub type Reaction<S> = Box<dyn Fn(&mut S)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerId(usize);

impl ControllerId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FolderId(usize);

impl FolderId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A pending write collected from the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlEdit {
    pub controller: ControllerId,
    pub value: ControlValue,
}

pub struct Controller<S> {
    label: String,
    binding: Binding<S>,
    on_change: Option<Reaction<S>>,
}

impl<S> Controller<S> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn binding(&self) -> &Binding<S> {
        &self.binding
    }

    /// Range of a numeric controller.
    pub fn range(&self) -> Option<NumberRange> {
        match &self.binding {
            Binding::Number { range, .. } => Some(*range),
            _ => None,
        }
    }
}

impl<S> fmt::Debug for Controller<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("label", &self.label)
            .field("binding", &self.binding)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

/// Entry of a folder, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    Controller(ControllerId),
    Folder(FolderId),
}

#[derive(Debug, Clone)]
pub struct Folder {
    pub name: String,
    /// Initially expanded.
    pub open: bool,
    entries: Vec<Entry>,
}

impl Folder {
    fn new(name: &str, open: bool) -> Self {
        Self {
            name: name.to_string(),
            open,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }
}

pub struct ControlPanel<S> {
    title: String,
    controllers: Vec<Controller<S>>,
    /// Index 0 is the root folder.
    folders: Vec<Folder>,
}

impl<S> ControlPanel<S> {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            controllers: Vec::new(),
            folders: vec![Folder::new(title, true)],
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Builder for controllers placed directly in the panel.
    pub fn root(&mut self) -> FolderBuilder<'_, S> {
        FolderBuilder {
            panel: self,
            folder: FolderId(0),
        }
    }

    /// Adds a top-level folder.
    pub fn add_folder(&mut self, name: &str) -> FolderBuilder<'_, S> {
        self.create_folder(FolderId(0), name)
    }

    fn create_folder(&mut self, parent: FolderId, name: &str) -> FolderBuilder<'_, S> {
        let id = FolderId(self.folders.len());
        self.folders.push(Folder::new(name, false));
        self.folders[parent.0].entries.push(Entry::Folder(id));
        FolderBuilder {
            panel: self,
            folder: id,
        }
    }

    fn push_controller(&mut self, folder: FolderId, label: &str, binding: Binding<S>) -> ControllerId {
        let id = ControllerId(self.controllers.len());
        self.controllers.push(Controller {
            label: label.to_string(),
            binding,
            on_change: None,
        });
        self.folders[folder.0].entries.push(Entry::Controller(id));
        id
    }

    pub fn root_folder(&self) -> &Folder {
        &self.folders[0]
    }

    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(id.0)
    }

    pub fn controller(&self, id: ControllerId) -> Option<&Controller<S>> {
        self.controllers.get(id.0)
    }

    /// All controllers, in creation order.
    pub fn controllers(&self) -> impl Iterator<Item = (ControllerId, &Controller<S>)> {
        self.controllers
            .iter()
            .enumerate()
            .map(|(i, c)| (ControllerId(i), c))
    }

    pub fn find(&self, label: &str) -> Option<ControllerId> {
        self.controllers
            .iter()
            .position(|c| c.label == label)
            .map(ControllerId)
    }

    /// Current value of the property behind `id`.
    pub fn value(&self, id: ControllerId, state: &S) -> Result<ControlValue, ControlError> {
        let controller = self
            .controllers
            .get(id.0)
            .ok_or(ControlError::UnknownController(id.0))?;
        Ok(controller.binding.read(state))
    }

    /// Writes `value` through the controller, then runs its reaction once.
    ///
    /// Numbers are clamped and snapped to the controller's range first. A
    /// value of the wrong kind leaves `state` untouched.
    pub fn set(
        &self,
        id: ControllerId,
        state: &mut S,
        value: ControlValue,
    ) -> Result<ControlValue, ControlError> {
        let controller = self
            .controllers
            .get(id.0)
            .ok_or(ControlError::UnknownController(id.0))?;

        let applied = controller
            .binding
            .write(state, value)
            .map_err(|(expected, found)| ControlError::KindMismatch {
                label: controller.label.clone(),
                expected,
                found,
            })?;
        log::trace!("{} = {:?}", controller.label, applied);

        if let Some(reaction) = &controller.on_change {
            reaction(state);
        }
        Ok(applied)
    }

    pub fn apply(&self, state: &mut S, edit: ControlEdit) -> Result<ControlValue, ControlError> {
        self.set(edit.controller, state, edit.value)
    }

    /// Applies edits in order, logging and skipping rejected ones.
    pub fn apply_all(&self, state: &mut S, edits: impl IntoIterator<Item = ControlEdit>) {
        for edit in edits {
            if let Err(e) = self.apply(state, edit) {
                log::warn!("Ignoring control edit: {}", e);
            }
        }
    }
}

/// Adds controllers to one folder.
pub struct FolderBuilder<'p, S> {
    panel: &'p mut ControlPanel<S>,
    folder: FolderId,
}

impl<'p, S> FolderBuilder<'p, S> {
    pub fn id(&self) -> FolderId {
        self.folder
    }

    /// Numeric slider over `range`.
    pub fn add(
        &mut self,
        label: &str,
        range: NumberRange,
        get: impl Fn(&S) -> f32 + 'static,
        set: impl Fn(&mut S, f32) + 'static,
    ) -> ControllerBuilder<'_, S> {
        let binding = Binding::Number {
            accessor: Accessor::new(get, set),
            range,
        };
        self.controller(label, binding)
    }

    pub fn add_toggle(
        &mut self,
        label: &str,
        get: impl Fn(&S) -> bool + 'static,
        set: impl Fn(&mut S, bool) + 'static,
    ) -> ControllerBuilder<'_, S> {
        self.controller(label, Binding::Toggle(Accessor::new(get, set)))
    }

    pub fn add_color(
        &mut self,
        label: &str,
        get: impl Fn(&S) -> [f32; 3] + 'static,
        set: impl Fn(&mut S, [f32; 3]) + 'static,
    ) -> ControllerBuilder<'_, S> {
        self.controller(label, Binding::Color(Accessor::new(get, set)))
    }

    /// Nested folder.
    pub fn add_folder(&mut self, name: &str) -> FolderBuilder<'_, S> {
        self.panel.create_folder(self.folder, name)
    }

    /// Expands the folder initially.
    pub fn open(&mut self) -> &mut Self {
        self.panel.folders[self.folder.0].open = true;
        self
    }

    fn controller(&mut self, label: &str, binding: Binding<S>) -> ControllerBuilder<'_, S> {
        let id = self.panel.push_controller(self.folder, label, binding);
        ControllerBuilder {
            panel: &mut *self.panel,
            id,
        }
    }
}

/// Returned by the `add*` methods to configure the new controller.
pub struct ControllerBuilder<'p, S> {
    panel: &'p mut ControlPanel<S>,
    id: ControllerId,
}

impl<'p, S> ControllerBuilder<'p, S> {
    /// Runs `reaction` after every write through this controller.
    pub fn on_change(self, reaction: impl Fn(&mut S) + 'static) -> Self {
        self.panel.controllers[self.id.0].on_change = Some(Box::new(reaction));
        self
    }

    /// Sets the step grid of a numeric controller. Ignored for other kinds.
    pub fn step(self, step: f32) -> Self {
        if let Binding::Number { range, .. } = &mut self.panel.controllers[self.id.0].binding {
            *range = range.with_step(step);
        }
        self
    }

    pub fn id(&self) -> ControllerId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Params {
        fov: f32,
        wireframe: bool,
        color: [f32; 3],
        refreshes: u32,
    }

    fn panel() -> ControlPanel<Params> {
        let mut panel: ControlPanel<Params> = ControlPanel::new("Debug");
        {
            let mut camera = panel.add_folder("Camera");
            camera
                .add("fov", NumberRange::new(0.0, 180.0), |p| p.fov, |p, v| p.fov = v)
                .step(0.01)
                .on_change(|p| p.refreshes += 1);
            camera.open();
        }
        {
            let mut material = panel.add_folder("Material");
            material.add_toggle("wireframe", |p| p.wireframe, |p, v| p.wireframe = v);
            material.add_color("color", |p| p.color, |p, v| p.color = v);
        }
        panel
    }

    #[test]
    fn test_set_writes_property_and_runs_reaction_once() {
        let panel = panel();
        let mut params = Params::default();
        let fov = panel.find("fov").expect("fov");

        let applied = panel
            .set(fov, &mut params, ControlValue::Number(75.0))
            .expect("set");

        assert_eq!(applied, ControlValue::Number(75.0));
        assert_eq!(params.fov, 75.0);
        assert_eq!(params.refreshes, 1);
        assert_eq!(panel.value(fov, &params), Ok(ControlValue::Number(75.0)));
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let panel = panel();
        let mut params = Params::default();
        let fov = panel.find("fov").expect("fov");

        panel
            .set(fov, &mut params, ControlValue::Number(500.0))
            .expect("set");

        assert_eq!(params.fov, 180.0);
        assert_eq!(panel.controller(fov).and_then(|c| c.range()).and_then(|r| r.step), Some(0.01));
    }

    #[test]
    fn test_kind_mismatch_leaves_state_untouched() {
        let panel = panel();
        let mut params = Params::default();
        let wireframe = panel.find("wireframe").expect("wireframe");

        let err = panel
            .set(wireframe, &mut params, ControlValue::Number(1.0))
            .unwrap_err();

        assert_eq!(
            err,
            ControlError::KindMismatch {
                label: "wireframe".to_string(),
                expected: "toggle",
                found: "number",
            }
        );
        assert!(!params.wireframe);
    }

    #[test]
    fn test_unknown_controller() {
        let panel = panel();
        let mut params = Params::default();
        let err = panel
            .set(ControllerId(99), &mut params, ControlValue::Toggle(true))
            .unwrap_err();
        assert_eq!(err, ControlError::UnknownController(99));
    }

    #[test]
    fn test_folders_keep_insertion_order() {
        let mut panel = panel();
        panel.root().add_toggle("labels", |p| p.wireframe, |p, v| p.wireframe = v);

        let root = panel.root_folder();
        assert_eq!(root.entries().len(), 3);
        let names: Vec<_> = root
            .entries()
            .iter()
            .filter_map(|e| match e {
                Entry::Folder(id) => panel.folder(*id).map(|f| f.name.clone()),
                Entry::Controller(_) => None,
            })
            .collect();
        assert_eq!(names, vec!["Camera", "Material"]);

        let camera = panel.folder(FolderId(1)).expect("camera folder");
        assert!(camera.open);
        assert!(!panel.folder(FolderId(2)).expect("material folder").open);
    }

    #[test]
    fn test_apply_all_skips_bad_edits() {
        let panel = panel();
        let mut params = Params::default();
        let color = panel.find("color").expect("color");
        let wireframe = panel.find("wireframe").expect("wireframe");

        panel.apply_all(
            &mut params,
            [
                ControlEdit {
                    controller: color,
                    value: ControlValue::Toggle(true),
                },
                ControlEdit {
                    controller: wireframe,
                    value: ControlValue::Toggle(true),
                },
                ControlEdit {
                    controller: color,
                    value: ControlValue::Color([0.5, 0.25, 1.0]),
                },
            ],
        );

        assert!(params.wireframe);
        assert_eq!(params.color, [0.5, 0.25, 1.0]);
    }

    #[test]
    fn test_nested_folder() {
        let mut panel: ControlPanel<Params> = ControlPanel::new("Debug");
        {
            let mut outer = panel.add_folder("Outer");
            let mut inner = outer.add_folder("Inner");
            inner.add_toggle("flag", |p| p.wireframe, |p, v| p.wireframe = v);
        }
        let outer = panel.folder(FolderId(1)).expect("outer");
        assert_eq!(outer.entries(), &[Entry::Folder(FolderId(2))]);
        assert_eq!(panel.folder(FolderId(2)).expect("inner").entries().len(), 1);
    }
}
