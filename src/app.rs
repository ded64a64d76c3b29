//! Window, GPU and event loop wiring for one demo.

use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    controls::{ControlEdit, ControlPanel},
    demos::Demo,
    error::{RenderError, VignetteError},
    frame::{handle_resize, FrameReport, Renderer, RenderLoop, TickOutcome, Viewport},
    gfx::rendering::RenderEngine,
    state::AppState,
    ui::{draw_control_panel, draw_labels, UiManager},
};

/// Opens a window and runs `demo` until the window closes or rendering
/// fails for good.
pub fn run(config: AppConfig, demo: Demo) -> Result<(), VignetteError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut runtime = Runtime::new(config, demo);
    event_loop.run_app(&mut runtime)?;

    match runtime.failure.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// GPU side, created once the event loop hands us a window.
struct Gpu {
    window: Arc<Window>,
    engine: RenderEngine,
    ui: UiManager,
}

struct Runtime {
    config: AppConfig,
    state: AppState,
    panel: ControlPanel<AppState>,
    render_loop: RenderLoop,
    gpu: Option<Gpu>,
    failure: Option<VignetteError>,
}

impl Runtime {
    fn new(config: AppConfig, demo: Demo) -> Self {
        Self {
            config,
            state: demo.state,
            panel: demo.panel,
            render_loop: RenderLoop::new(),
            gpu: None,
            failure: None,
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu, VignetteError> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let PhysicalSize { width, height } = window.inner_size();
        let engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width.max(1),
            height.max(1),
            self.config.vsync,
        ))?;

        let ui = UiManager::new(
            engine.device(),
            engine.queue(),
            engine.surface_format(),
            &window,
            self.config.ui_font_size,
        );

        Ok(Gpu { window, engine, ui })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: VignetteError) {
        log::error!("{}", error);
        self.render_loop.cancel_token().cancel();
        self.failure = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let mut renderer = FrameRenderer {
            engine: &mut gpu.engine,
            ui: &mut gpu.ui,
            window: &gpu.window,
            panel: &self.panel,
            edits: Vec::new(),
            show_stats: self.config.show_stats,
        };
        let outcome = self
            .render_loop
            .tick(&mut self.state, &*gpu.window, &mut renderer);
        let edits = renderer.edits;

        self.panel.apply_all(&mut self.state, edits);

        match outcome {
            TickOutcome::Skipped { error, .. } if error.is_fatal() => {
                self.fail(event_loop, VignetteError::Render(error));
            }
            TickOutcome::Cancelled => event_loop.exit(),
            _ => {}
        }
    }
}

impl ApplicationHandler for Runtime {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.init_gpu(event_loop) {
            Ok(mut gpu) => {
                let PhysicalSize { width, height } = gpu.window.inner_size();
                self.state.viewport = Viewport::new(width.max(1), height.max(1));
                handle_resize(&mut self.state, &mut gpu.engine, width, height);
                log::info!(
                    "{}: {}x{} surface, {:?}",
                    self.config.title,
                    width,
                    height,
                    gpu.engine.surface_format()
                );
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(error) => self.fail(event_loop, error),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let ui_captured = gpu.ui.handle_input(&gpu.window, window_id, &event);

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                self.render_loop.cancel_token().cancel();
                event_loop.exit();
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                handle_resize(&mut self.state, &mut gpu.engine, width, height);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {
                if ui_captured || gpu.ui.wants_pointer() {
                    return;
                }
                if let Some(controls) = self.state.controls.as_mut() {
                    controls.handle_window_event(&event, &self.state.camera);
                }
            }
        }
    }
}

/// Renders the scene and the imgui layer in one pass over the frame.
///
/// Widget edits are collected and applied by the caller once the frame is
/// done, since the renderer only ever sees the state read-only.
struct FrameRenderer<'a> {
    engine: &'a mut RenderEngine,
    ui: &'a mut UiManager,
    window: &'a Window,
    panel: &'a ControlPanel<AppState>,
    edits: Vec<ControlEdit>,
    show_stats: bool,
}

impl Renderer for FrameRenderer<'_> {
    fn render(&mut self, state: &AppState) -> Result<FrameReport, RenderError> {
        let panel = self.panel;
        let window = self.window;
        let show_stats = self.show_stats;
        let edits = &mut self.edits;
        let ui = &mut *self.ui;

        self.engine.render_frame(state, |device, queue, encoder, view| {
            ui.draw(device, queue, encoder, window, view, |frame| {
                edits.extend(draw_control_panel(frame, panel, state));
                draw_labels(frame, &state.labels);
                if show_stats {
                    state.stats.render_overlay(frame);
                }
            });
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
    }
}
