//! Window creation and the driver loop via winit.
//!
//! Provides [`AppState`] which implements winit's [`ApplicationHandler`]
//! trait, and [`run_with_config`] to start the event loop. The compositor
//! is invoked once per `RedrawRequested` and the next redraw is requested
//! immediately, giving a continuous animation loop.

use std::sync::Arc;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowAttributes, WindowId};

use helio_camera::CameraControls;
use helio_compositor::{DisplayMetrics, FrameCompositor};
use helio_config::Config;
use helio_render::{DEFAULT_SCALE_FACTOR, RenderContext, SurfaceError, init_render_context_blocking};
use helio_scene::{MomentSource, Scene, SceneAssets};

/// Latitude/longitude step per arrow key press in degrees.
const PAN_STEP_DEG: f32 = 5.0;
/// Zoom step per key press.
const ZOOM_STEP: f32 = 0.05;
/// Moment scrub step per page key press: one hour.
const SCRUB_STEP_MS: i64 = 3_600_000;

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Build the moment source described by the time configuration.
fn moment_source_from_config(config: &Config) -> MomentSource {
    match config.time.start_unix_ms {
        Some(ms) if config.time.speed == 0.0 => MomentSource::fixed(ms),
        Some(ms) => MomentSource::running_from(ms, config.time.speed),
        None => MomentSource::running(config.time.speed),
    }
}

/// Application state: window, GPU context, scene, compositor, and the
/// camera controls the keyboard bindings mutate.
pub struct AppState {
    config: Config,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    scene: Option<Scene>,
    compositor: Option<FrameCompositor>,
    controls: CameraControls,
}

impl AppState {
    /// Create application state from a loaded configuration.
    pub fn new(config: Config) -> Self {
        let controls = CameraControls::new(
            config.controls.zoom,
            config.controls.latitude_deg,
            config.controls.longitude_deg,
            config.controls.sphere_mode,
        );
        Self {
            config,
            window: None,
            gpu: None,
            scene: None,
            compositor: None,
            controls,
        }
    }

    fn handle_key(&mut self, state: ElementState, logical_key: &Key) {
        if state != ElementState::Pressed {
            return;
        }
        match logical_key {
            Key::Named(NamedKey::ArrowLeft) => self.controls.pan_longitude(-PAN_STEP_DEG),
            Key::Named(NamedKey::ArrowRight) => self.controls.pan_longitude(PAN_STEP_DEG),
            Key::Named(NamedKey::ArrowUp) => self.controls.pan_latitude(PAN_STEP_DEG),
            Key::Named(NamedKey::ArrowDown) => self.controls.pan_latitude(-PAN_STEP_DEG),
            Key::Named(NamedKey::Tab) => {
                self.controls.toggle_mode();
                info!(
                    "Switched to {} mode",
                    if self.controls.sphere_mode {
                        "globe"
                    } else {
                        "map"
                    }
                );
            }
            Key::Named(NamedKey::PageUp) => self.scrub_moment(SCRUB_STEP_MS),
            Key::Named(NamedKey::PageDown) => self.scrub_moment(-SCRUB_STEP_MS),
            Key::Named(NamedKey::Space) => self.toggle_time(),
            Key::Character(c) => match c.as_str() {
                "+" | "=" => self.controls.zoom_by(ZOOM_STEP),
                "-" => self.controls.zoom_by(-ZOOM_STEP),
                _ => {}
            },
            _ => {}
        }
    }

    fn scrub_moment(&mut self, delta_ms: i64) {
        if let Some(scene) = &mut self.scene {
            scene.moment_mut().shift(delta_ms);
        }
    }

    fn toggle_time(&mut self) {
        if let Some(scene) = &mut self.scene {
            let moment = scene.moment_mut();
            if moment.is_running() {
                moment.pause();
                info!("Time paused");
            } else {
                moment.resume(self.config.time.speed.max(1.0));
                info!("Time resumed");
            }
        }
    }

    fn render_frame(&mut self) {
        let (Some(window), Some(gpu), Some(scene), Some(compositor)) = (
            self.window.as_ref(),
            self.gpu.as_mut(),
            self.scene.as_ref(),
            self.compositor.as_mut(),
        ) else {
            return;
        };

        let scale_factor = if window.scale_factor() > 0.0 {
            window.scale_factor()
        } else {
            DEFAULT_SCALE_FACTOR
        };
        let logical = window.inner_size().to_logical::<f64>(scale_factor);
        let display = DisplayMetrics {
            logical_width: logical.width,
            logical_height: logical.height,
            scale_factor,
        };

        match compositor.render(gpu, scene, &self.controls, display) {
            Ok(()) => {}
            Err(helio_compositor::CompositorError::Surface(SurfaceError::Timeout)) => {
                warn!("Surface timeout, skipping frame");
            }
            Err(e) => {
                error!("Frame render failed: {e}");
            }
        }

        window.request_redraw();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let gpu = match init_render_context_blocking(window.clone()) {
            Ok(ctx) => ctx,
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let assets = SceneAssets {
            day_map: self.config.assets.day_map.clone(),
            night_map: self.config.assets.night_map.clone(),
        };
        let moment = moment_source_from_config(&self.config);
        let scene = match Scene::new(&gpu, &assets, moment) {
            Ok(scene) => scene,
            Err(e) => {
                error!("Scene construction failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let compositor = match FrameCompositor::new(&gpu, &scene) {
            Ok(compositor) => compositor,
            Err(e) => {
                error!("Compositor initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        info!(
            "Viewer ready: {}x{} logical, {} mode",
            self.config.window.width,
            self.config.window.height,
            if self.controls.sphere_mode {
                "globe"
            } else {
                "map"
            }
        );

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.scene = Some(scene);
        self.compositor = Some(compositor);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            // The compositor compares the displayed size against its
            // recorded value every frame and reconfigures lazily, so
            // resize events need no immediate work here.
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {}
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(event.state, &event.logical_key);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

/// Create the event loop and run the viewer until exit.
pub fn run_with_config(config: Config) -> Result<(), winit::error::EventLoopError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config);
    event_loop.run_app(&mut app)
}
