//! The per-frame update loop.
//!
//! [`RenderLoop::tick`] runs one iteration: reschedule, advance the orbit
//! controls, re-aim a locked camera, project the labels and render. Each
//! tick counts as one frame for the stats counter. The loop is single-threaded and never starts a frame before the
//! previous render returned. A [`CancelToken`] is the only way out.

mod resize;

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{error::RenderError, state::AppState};

pub use resize::{handle_resize, Viewport};

/// Something that can ask for another frame.
pub trait FrameScheduler {
    fn schedule_frame(&self);
}

impl FrameScheduler for winit::window::Window {
    fn schedule_frame(&self) {
        self.request_redraw();
    }
}

/// Draws the full scene from the current camera.
pub trait Renderer {
    fn render(&mut self, state: &AppState) -> Result<FrameReport, RenderError>;
    fn resize(&mut self, width: u32, height: u32);
}

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub draw_calls: u32,
    pub vertices: u32,
}

/// Shared stop flag for a [`RenderLoop`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Rendering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered { frame: u64, report: FrameReport },
    /// The render failed; the next frame is already scheduled.
    Skipped { frame: u64, error: RenderError },
    Cancelled,
}

#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    frame: u64,
    cancel: CancelToken,
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderLoop {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            frame: 0,
            cancel: CancelToken::new(),
        }
    }

    /// A handle that stops this loop when cancelled.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames started so far.
    pub fn frames(&self) -> u64 {
        self.frame
    }

    /// Runs one iteration of the loop.
    pub fn tick<S, R>(&mut self, app: &mut AppState, scheduler: &S, renderer: &mut R) -> TickOutcome
    where
        S: FrameScheduler + ?Sized,
        R: Renderer + ?Sized,
    {
        if self.cancel.is_cancelled() {
            log::debug!("Render loop cancelled after {} frames", self.frame);
            return TickOutcome::Cancelled;
        }

        self.state = LoopState::Rendering;
        let frame = self.frame;
        self.frame += 1;
        app.stats.update();

        scheduler.schedule_frame();

        if let Some(controls) = app.controls.as_mut() {
            controls.update(&mut app.camera);
        }
        if let Some(target) = app.look_at {
            app.camera.look_at(target);
        }
        app.camera.refresh_projection();

        app.labels.update(&app.scene, &app.camera, app.viewport);

        let result = renderer.render(app);
        self.state = LoopState::Idle;

        match result {
            Ok(report) => {
                app.stats.update_render_stats(report.draw_calls, report.vertices);
                TickOutcome::Rendered { frame, report }
            }
            Err(error) => {
                log::warn!("Frame {} skipped: {}", frame, error);
                TickOutcome::Skipped { frame, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        gfx::{
            camera::PerspectiveCamera,
            geometry::generate_box,
            resources::Material,
            scene::{Scene, SceneObject},
        },
        labels::LabelOverlay,
    };
    use cgmath::Point3;
    use std::{cell::RefCell, rc::Rc, thread, time::Duration};

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Schedule,
        Render { rotation_x: f32, labels_visible: bool },
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct RecordingScheduler(Log);

    impl FrameScheduler for RecordingScheduler {
        fn schedule_frame(&self) {
            self.0.borrow_mut().push(Event::Schedule);
        }
    }

    struct RecordingRenderer {
        log: Log,
        fail_with: Option<RenderError>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, state: &AppState) -> Result<FrameReport, RenderError> {
            let rotation_x = state.scene.objects().next().map_or(0.0, |(_, o)| o.rotation.x);
            let labels_visible = state.labels.iter().all(|l| l.is_visible());
            self.log.borrow_mut().push(Event::Render {
                rotation_x,
                labels_visible,
            });
            match self.fail_with {
                Some(error) => Err(error),
                None => Ok(FrameReport {
                    draw_calls: 1,
                    vertices: 24,
                }),
            }
        }

        fn resize(&mut self, _width: u32, _height: u32) {}
    }

    fn fixture() -> (AppState, Log, RecordingScheduler, RecordingRenderer) {
        let mut scene = Scene::new();
        let geometry = scene.add_geometry(generate_box(1.0, 1.0, 1.0));
        let material = scene.add_material(Material::normal("normal"));
        let cube = scene.add_object(SceneObject::new("cube", geometry, material));
        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0).with_position(0.0, 2.0, 3.0);
        let mut state = AppState::new(scene, camera);
        state.labels.push(LabelOverlay::new("cube", cube));

        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let scheduler = RecordingScheduler(log.clone());
        let renderer = RecordingRenderer {
            log: log.clone(),
            fail_with: None,
        };
        (state, log, scheduler, renderer)
    }

    #[test]
    fn test_schedule_precedes_render_each_frame() {
        let (mut state, log, scheduler, mut renderer) = fixture();
        let mut render_loop = RenderLoop::new();

        for _ in 0..3 {
            render_loop.tick(&mut state, &scheduler, &mut renderer);
        }

        let events = log.borrow();
        assert_eq!(events.len(), 6);
        for pair in events.chunks(2) {
            assert_eq!(pair[0], Event::Schedule);
            assert!(matches!(pair[1], Event::Render { .. }));
        }
        assert_eq!(render_loop.frames(), 3);
        assert_eq!(render_loop.state(), LoopState::Idle);
    }

    #[test]
    fn test_next_frame_observes_mutations() {
        let (mut state, log, scheduler, mut renderer) = fixture();
        let mut render_loop = RenderLoop::new();
        let cube = state.scene.find_object("cube").expect("cube");

        render_loop.tick(&mut state, &scheduler, &mut renderer);
        state.scene[cube].rotation.x = 1.25;
        state.labels.visible = false;
        render_loop.tick(&mut state, &scheduler, &mut renderer);

        let events = log.borrow();
        assert_eq!(
            events[1],
            Event::Render {
                rotation_x: 0.0,
                labels_visible: true
            }
        );
        assert_eq!(
            events[3],
            Event::Render {
                rotation_x: 1.25,
                labels_visible: false
            }
        );
    }

    #[test]
    fn test_cancelled_loop_neither_schedules_nor_renders() {
        let (mut state, log, scheduler, mut renderer) = fixture();
        let mut render_loop = RenderLoop::new();
        let token = render_loop.cancel_token();

        render_loop.tick(&mut state, &scheduler, &mut renderer);
        token.cancel();
        let outcome = render_loop.tick(&mut state, &scheduler, &mut renderer);

        assert_eq!(outcome, TickOutcome::Cancelled);
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(render_loop.frames(), 1);
    }

    #[test]
    fn test_look_at_is_reapplied_every_frame() {
        let (mut state, _log, scheduler, mut renderer) = fixture();
        let target = Point3::new(0.0, 0.5, 0.0);
        state.look_at = Some(target);
        let mut render_loop = RenderLoop::new();

        render_loop.tick(&mut state, &scheduler, &mut renderer);
        state.camera.position = Point3::new(4.0, 1.0, -2.0);
        render_loop.tick(&mut state, &scheduler, &mut renderer);

        assert_eq!(state.camera.target(), target);
        let ndc = state.camera.project(target);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn test_failed_render_is_skipped_and_loop_continues() {
        let (mut state, log, scheduler, mut renderer) = fixture();
        renderer.fail_with = Some(RenderError::Timeout);
        let mut render_loop = RenderLoop::new();

        let outcome = render_loop.tick(&mut state, &scheduler, &mut renderer);
        assert_eq!(
            outcome,
            TickOutcome::Skipped {
                frame: 0,
                error: RenderError::Timeout
            }
        );

        renderer.fail_with = None;
        let outcome = render_loop.tick(&mut state, &scheduler, &mut renderer);
        assert!(matches!(outcome, TickOutcome::Rendered { frame: 1, .. }));
        assert_eq!(log.borrow().len(), 4);
        assert_eq!(state.stats.draw_calls(), 1);
    }

    #[test]
    fn test_projection_refreshed_before_render() {
        let (mut state, _log, scheduler, mut renderer) = fixture();
        state.camera.fov = 30.0;
        state.camera.mark_projection_dirty();

        RenderLoop::new().tick(&mut state, &scheduler, &mut renderer);

        assert!(!state.camera.is_projection_dirty());
    }

    #[test]
    fn test_stats_count_idle_time_between_ticks() {
        let (mut state, _log, scheduler, mut renderer) = fixture();
        let mut render_loop = RenderLoop::new();

        // the renderer returns at once; the loop only runs every 25 ms
        for _ in 0..15 {
            render_loop.tick(&mut state, &scheduler, &mut renderer);
            thread::sleep(Duration::from_millis(25));
        }

        let metrics = state.stats.metrics();
        assert!(metrics.fps > 10.0 && metrics.fps <= 41.0, "fps {}", metrics.fps);
        assert!(metrics.frame_time_ms >= 24.0);
    }
}
