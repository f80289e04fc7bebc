//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, Result, anyhow};
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use brick_breaker::platform::{Controls, FramePacer, Key};
    use brick_breaker::renderer::RenderState;
    use brick_breaker::{Session, SessionSignal, Settings, random_seed};

    /// Game instance holding all state
    struct Game {
        settings: Settings,
        session: Session,
        controls: Controls,
        pacer: FramePacer,
        render_state: Option<RenderState>,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let session = Session::new(random_seed(), &settings);
            Self {
                settings,
                session,
                controls: Controls::new(),
                pacer: FramePacer::new(),
                render_state: None,
            }
        }

        /// Run one frame if the pacer says one is due
        fn frame(&mut self, now_ms: f64) {
            let Some(dt) = self.pacer.poll(now_ms, self.session.fps()) else {
                return;
            };

            if self.session.frame(dt, &mut self.controls) == SessionSignal::Restart {
                self.session = Session::new(random_seed(), &self.settings);
            }

            self.render();
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.session.draw_list()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        // Fails only if a logger is already installed
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Brick Breaker starting...");

        match start().await {
            Ok(()) => log::info!("Brick Breaker running!"),
            Err(e) => log::error!("Startup failed: {e:#}"),
        }
    }

    async fn start() -> Result<()> {
        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no #canvas element")?
            .dyn_into()
            .map_err(|_| anyhow!("#canvas is not a canvas"))?;

        let settings = Settings::load();
        let arena = Vec2::new(settings.tuning.arena_width(), settings.tuning.arena_height);

        // Canvas backing store matches the arena at device resolution
        let dpr = window.device_pixel_ratio();
        let width = (arena.x as f64 * dpr) as u32;
        let height = (arena.y as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU, falling back to WebGL2
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, arena).await?;

        let game = Rc::new(RefCell::new(Game::new(settings)));
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone());

        // Start game loop
        request_animation_frame(game);

        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_web_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().controls.key_down(key, event.repeat());
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_web_key(&event.key()) {
                    game.borrow_mut().controls.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events will not arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().controls.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result, anyhow};
    use glam::Vec2;
    use winit::application::ApplicationHandler;
    use winit::dpi::LogicalSize;
    use winit::event::{ElementState, WindowEvent};
    use winit::event_loop::{ActiveEventLoop, ControlFlow};
    use winit::keyboard::{KeyCode, PhysicalKey};
    use winit::window::{Window, WindowId};

    use brick_breaker::platform::{Controls, FramePacer, Key};
    use brick_breaker::renderer::RenderState;
    use brick_breaker::{Session, SessionSignal, Settings, random_seed};

    /// Map a physical key to a game key
    pub fn map_key(code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::KeyP => Some(Key::Pause),
            KeyCode::KeyR => Some(Key::Resume),
            KeyCode::KeyN => Some(Key::NewGame),
            KeyCode::Digit1 | KeyCode::Numpad1 => Some(Key::ClearBricks),
            KeyCode::ArrowLeft => Some(Key::Left),
            KeyCode::ArrowRight => Some(Key::Right),
            _ => None,
        }
    }

    pub struct App {
        settings: Settings,
        session: Session,
        controls: Controls,
        pacer: FramePacer,
        /// Origin of the pacing clock
        clock: Instant,
        window: Option<Arc<Window>>,
        render_state: Option<RenderState>,
        /// Fatal error that stopped the event loop
        error: Option<anyhow::Error>,
    }

    impl App {
        pub fn new(settings: Settings) -> Self {
            let session = Session::new(random_seed(), &settings);
            Self {
                settings,
                session,
                controls: Controls::new(),
                pacer: FramePacer::new(),
                clock: Instant::now(),
                window: None,
                render_state: None,
                error: None,
            }
        }

        /// Outcome of the run once the event loop has returned
        pub fn finish(self) -> Result<()> {
            match self.error {
                Some(e) => Err(e),
                None => Ok(()),
            }
        }

        fn now_ms(&self) -> f64 {
            self.clock.elapsed().as_secs_f64() * 1000.0
        }

        fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
            let tuning = &self.settings.tuning;
            let arena = Vec2::new(tuning.arena_width(), tuning.arena_height);

            let attrs = Window::default_attributes()
                .with_title("Brick Breaker")
                .with_inner_size(LogicalSize::new(arena.x, arena.y));
            let window = Arc::new(
                event_loop
                    .create_window(attrs)
                    .context("failed to create window")?,
            );
            let size = window.inner_size();

            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let surface = instance
                .create_surface(Arc::clone(&window))
                .context("failed to create surface")?;

            let adapter = pollster::block_on(instance.request_adapter(
                &wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::HighPerformance,
                    compatible_surface: Some(&surface),
                    force_fallback_adapter: false,
                },
            ))
            .context("no compatible GPU adapter")?;

            log::info!("Using adapter: {:?}", adapter.get_info().name);

            let render_state = pollster::block_on(RenderState::new(
                surface,
                &adapter,
                size.width,
                size.height,
                arena,
            ))?;

            self.render_state = Some(render_state);
            self.window = Some(window);
            Ok(())
        }

        fn redraw(&mut self, event_loop: &ActiveEventLoop) {
            let Some(dt) = self.pacer.poll(self.now_ms(), self.session.fps()) else {
                return;
            };

            if self.session.frame(dt, &mut self.controls) == SessionSignal::Restart {
                self.session = Session::new(random_seed(), &self.settings);
            }

            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            match render_state.render(&self.session.draw_list()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                    self.error = Some(anyhow!("GPU out of memory"));
                    event_loop.exit();
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    impl ApplicationHandler for App {
        fn resumed(&mut self, event_loop: &ActiveEventLoop) {
            if self.window.is_some() {
                return;
            }
            if let Err(e) = self.initialize(event_loop) {
                log::error!("Startup failed: {e:#}");
                self.error = Some(e);
                event_loop.exit();
            }
        }

        fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
            match event {
                WindowEvent::CloseRequested => {
                    log::info!("Quit requested");
                    event_loop.exit();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if let PhysicalKey::Code(code) = event.physical_key
                        && let Some(key) = map_key(code)
                    {
                        match event.state {
                            ElementState::Pressed => self.controls.key_down(key, event.repeat),
                            ElementState::Released => self.controls.key_up(key),
                        }
                    }
                }
                WindowEvent::Focused(false) => self.controls.release_all(),
                WindowEvent::Resized(new_size) => {
                    if let Some(ref mut render_state) = self.render_state {
                        render_state.resize(new_size.width, new_size.height);
                    }
                }
                WindowEvent::RedrawRequested => self.redraw(event_loop),
                _ => {}
            }
        }

        fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
            let Some(window) = &self.window else {
                return;
            };

            // Sleep until the next frame is due at the current phase's rate
            let deadline_ms = self.pacer.deadline_ms(self.session.fps());
            if self.pacer.is_due(self.now_ms(), self.session.fps()) {
                window.request_redraw();
                event_loop.set_control_flow(ControlFlow::Wait);
            } else {
                let deadline = self.clock + Duration::from_secs_f64(deadline_ms / 1000.0);
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Controls: Left/Right move, P pause, R resume, N new game, 1 clear bricks");

    let settings = brick_breaker::Settings::load();

    let event_loop = winit::event_loop::EventLoop::new().context("failed to create event loop")?;
    let mut app = native::App::new(settings);
    event_loop
        .run_app(&mut app)
        .context("event loop exited with an error")?;

    log::info!("Brick Breaker exiting");
    app.finish()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::native::map_key;
    use brick_breaker::platform::Key;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_native_key_mapping() {
        assert_eq!(map_key(KeyCode::KeyP), Some(Key::Pause));
        assert_eq!(map_key(KeyCode::KeyR), Some(Key::Resume));
        assert_eq!(map_key(KeyCode::KeyN), Some(Key::NewGame));
        assert_eq!(map_key(KeyCode::Digit1), Some(Key::ClearBricks));
        assert_eq!(map_key(KeyCode::ArrowLeft), Some(Key::Left));
        assert_eq!(map_key(KeyCode::ArrowRight), Some(Key::Right));
        assert_eq!(map_key(KeyCode::Space), None);
    }
}
