//! # Frame statistics
//!
//! A small FPS / frame-time counter in the spirit of stats.js. The render
//! loop calls [`PerformanceMonitor::update`] once per frame and each sample
//! is the wall-clock interval between two calls, idle time included. Drawn as
//! an imgui overlay in the top-left corner.
//!
//! ```rust
//! use std::time::Duration;
//! use vignette::performance::PerformanceMonitor;
//!
//! let mut monitor = PerformanceMonitor::new();
//! monitor.record_frame(Duration::from_millis(20));
//! assert!((monitor.metrics().fps - 50.0).abs() < 0.01);
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    pub fps: f32,
    /// Average interval between frames over the sample window
    pub frame_time_ms: f32,
    pub min_frame_time_ms: f32,
    pub max_frame_time_ms: f32,
    /// Draw calls issued by the last rendered frame
    pub draw_calls: u32,
    /// Vertices submitted by the last rendered frame
    pub vertex_count: u32,
}

impl Default for PerformanceMetrics {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time_ms: 0.0,
            min_frame_time_ms: f32::MAX,
            max_frame_time_ms: 0.0,
            draw_calls: 0,
            vertex_count: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    /// Ring buffer of recent frame times
    frame_times: VecDeque<Duration>,
    max_samples: usize,
    last_frame: Option<Instant>,
    current_metrics: PerformanceMetrics,
    last_update: Instant,
    /// Averages are recomputed at most this often
    update_interval: Duration,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::with_samples(120)
    }

    /// Monitor averaging over the last `max_samples` frames.
    pub fn with_samples(max_samples: usize) -> Self {
        let max_samples = max_samples.max(1);
        Self {
            frame_times: VecDeque::with_capacity(max_samples),
            max_samples,
            last_frame: None,
            current_metrics: PerformanceMetrics::default(),
            last_update: Instant::now(),
            update_interval: Duration::from_millis(250),
        }
    }

    /// Counts one frame. The first call only starts the clock.
    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    /// [`update`](Self::update) with an explicit timestamp.
    pub fn update_at(&mut self, now: Instant) {
        let Some(previous) = self.last_frame.replace(now) else {
            return;
        };
        self.add_frame_time(now.saturating_duration_since(previous));

        if now.saturating_duration_since(self.last_update) >= self.update_interval {
            self.update_metrics();
            self.last_update = now;
        }
    }

    /// Adds a measured frame time and refreshes the averages immediately.
    pub fn record_frame(&mut self, frame_time: Duration) {
        self.add_frame_time(frame_time);
        self.update_metrics();
    }

    fn add_frame_time(&mut self, frame_time: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);
    }

    fn update_metrics(&mut self) {
        let Some(&first) = self.frame_times.front() else {
            return;
        };

        let (total, min, max) = self.frame_times.iter().fold(
            (Duration::ZERO, first, first),
            |(total, min, max), &t| (total + t, min.min(t), max.max(t)),
        );
        let average_ms = to_ms(total) / self.frame_times.len() as f32;

        let metrics = &mut self.current_metrics;
        metrics.frame_time_ms = average_ms;
        metrics.fps = if average_ms > 0.0 { 1000.0 / average_ms } else { 0.0 };
        metrics.min_frame_time_ms = to_ms(min);
        metrics.max_frame_time_ms = to_ms(max);
    }

    pub fn update_render_stats(&mut self, draw_calls: u32, vertex_count: u32) {
        self.current_metrics.draw_calls = draw_calls;
        self.current_metrics.vertex_count = vertex_count;
    }

    pub fn metrics(&self) -> &PerformanceMetrics {
        &self.current_metrics
    }

    pub fn draw_calls(&self) -> u32 {
        self.current_metrics.draw_calls
    }

    pub fn sample_count(&self) -> usize {
        self.frame_times.len()
    }

    /// Frame times in milliseconds, oldest first.
    pub fn history_ms(&self) -> Vec<f32> {
        self.frame_times.iter().copied().map(to_ms).collect()
    }

    pub fn reset(&mut self) {
        self.frame_times.clear();
        self.current_metrics = PerformanceMetrics::default();
        self.last_frame = None;
        self.last_update = Instant::now();
    }

    /// Compact counter in the top-left corner.
    pub fn render_overlay(&self, ui: &imgui::Ui) {
        let metrics = &self.current_metrics;

        ui.window("Stats")
            .always_auto_resize(true)
            .position([10.0, 10.0], imgui::Condition::Always)
            .no_decoration()
            .no_inputs()
            .bg_alpha(0.35)
            .build(|| {
                ui.text(format!("{:.0} FPS", metrics.fps));
                ui.text(format!("{:.1} ms", metrics.frame_time_ms));
                ui.text(format!("{} calls / {} verts", metrics.draw_calls, metrics.vertex_count));

                let history = self.history_ms();
                if !history.is_empty() {
                    ui.plot_lines("##frame_times", &history)
                        .graph_size([130.0, 30.0])
                        .scale_min(0.0)
                        .scale_max(50.0)
                        .build();
                }
            });
    }
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_ms(duration: Duration) -> f32 {
    duration.as_secs_f32() * 1000.0
}
