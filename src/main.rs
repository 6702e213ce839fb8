//! Bean Platformer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, TouchEvent};

    use bean_platformer::Settings;
    use bean_platformer::consts::*;
    use bean_platformer::platform::{InputState, TouchButton};
    use bean_platformer::renderer::{RenderError, RenderState, build_frame};
    use bean_platformer::sim::{GameEvent, Session, tick};
    use bean_platformer::ui::{HudText, ids};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        input: InputState,
        settings: Settings,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Last HUD written, to skip redundant DOM writes
        last_hud: Option<HudText>,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            Self {
                session: Session::new(settings.level_config(), seed),
                render_state: None,
                input: InputState::default(),
                settings,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_hud: None,
            }
        }

        /// One simulation tick for this frame
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            tick(&mut self.session, &mut self.input, dt);
            // Clear one-shot inputs after processing
            self.input.end_tick();

            for event in self.session.drain_events() {
                match event {
                    GameEvent::Restarted { .. } => self.input.clear(),
                    GameEvent::Jumped => log::trace!("Jump"),
                    _ => {}
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_frame(&self.session.level);
                match render_state.render(&vertices) {
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

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            if self.settings.show_fps {
                set_text(document, ids::FPS, &format!("FPS: {}", self.fps));
            }

            let hud = HudText::from_session(&self.session);
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }

            for (id, text) in hud.lines() {
                set_text(document, id, text);
            }

            if let Some(el) = document.get_element_by_id(ids::COMPLETION) {
                match &hud.completion {
                    Some(message) => {
                        el.set_text_content(Some(message));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }

            self.last_hud = Some(hud);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(
            surface,
            &adapter,
            width,
            height,
            glam::Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
        )
        .await
    }

    /// Canvas backing size in device pixels
    fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Settings from `?key=value` in the page URL; parse problems are
        // reported once the logger is up
        let query = window.location().search().unwrap_or_default();
        let parsed = Settings::from_query(&query);
        let level = parsed
            .as_ref()
            .map(|s| s.log_level())
            .unwrap_or(log::Level::Info);
        let _ = console_log::init_with_level(level);
        let settings = parsed.unwrap_or_else(|e| {
            log::warn!("{}; using default settings", e);
            Settings::default()
        });

        log::info!("Bean Platformer starting...");

        set_hidden(&document, ids::LOADING, true);
        set_hidden(&document, ids::TOUCH_CONTROLS, !settings.touch_controls);
        set_hidden(&document, ids::FPS, !settings.show_fps);

        let canvas: Option<HtmlCanvasElement> = document
            .get_element_by_id(ids::CANVAS)
            .and_then(|el| el.dyn_into().ok());
        let Some(canvas) = canvas else {
            log::error!("No <canvas id=\"{}\"> on the page", ids::CANVAS);
            return;
        };

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));

        // HUD and input still work without a GPU; only drawing is skipped
        match init_renderer(&canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        setup_keyboard(&window, game.clone());
        setup_touch_buttons(&document, game.clone());
        setup_focus_loss(&window, &document, game.clone());
        setup_resize(&window, canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Bean Platformer running!");
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let bound = game
                    .borrow_mut()
                    .input
                    .key_down(&event.key(), event.repeat());
                if bound {
                    // Keep arrows/space from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if game.borrow_mut().input.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for button in TouchButton::ALL {
            let Some(el) = document.get_element_by_id(button.element_id()) else {
                log::debug!("Touch button #{} not present", button.element_id());
                continue;
            };

            for (event_name, pressed) in [
                ("touchstart", true),
                ("touchend", false),
                ("touchcancel", false),
            ] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    game.borrow_mut().input.touch(button, pressed);
                });
                let _ = el
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Drop held keys/touches when the page loses focus, so nothing sticks
    fn setup_focus_loss(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    g.input.clear();
                    g.last_time = 0.0;
                    log::debug!("Input cleared (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.clear();
                log::debug!("Input cleared (window blur)");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = canvas_pixel_size(&window_clone, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Ticks simulated by the native smoke run (ten seconds at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_TICKS: u32 = 600;

/// Native build: run the simulation headless with scripted input.
///
/// Takes an optional query-style argument, e.g. `seed=7&movement=per_second`.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bean_platformer::Settings;
    use bean_platformer::consts::SIM_DT;
    use bean_platformer::platform::InputState;
    use bean_platformer::sim::{GameEvent, Session, tick};
    use bean_platformer::ui::HudText;

    let query = std::env::args().nth(1).unwrap_or_default();
    let parsed = Settings::from_query(&query);
    let level = parsed
        .as_ref()
        .map(|s| s.log_level())
        .unwrap_or(log::Level::Info);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .init();

    let settings = parsed.unwrap_or_else(|e| {
        log::warn!("{}; using default settings", e);
        Settings::default()
    });

    log::info!("Bean Platformer (native) starting headless run...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    let seed = settings.seed.unwrap_or(1);
    let mut session = Session::new(settings.level_config(), seed);
    let mut input = InputState::default();

    for frame in 0..HEADLESS_TICKS {
        scripted_input(&mut input, frame);
        tick(&mut session, &mut input, SIM_DT);
        input.end_tick();

        for event in session.drain_events() {
            if let GameEvent::LevelComplete { final_time, new_best } = event {
                println!(
                    "Level complete in {} (new best: {})",
                    bean_platformer::format_seconds(final_time),
                    new_best
                );
            }
        }

        if frame % 60 == 59 {
            let hud = HudText::from_session(&session);
            log::info!(
                "{} | {} | {} | {}",
                hud.score,
                hud.time,
                hud.best,
                hud.remaining
            );
        }
    }

    let hud = HudText::from_session(&session);
    println!("{}  {}  {}  {}", hud.score, hud.time, hud.best, hud.remaining);

    match serde_json::to_string(&session.level) {
        Ok(json) => log::debug!("Final level state: {}", json),
        Err(e) => log::warn!("Could not serialize level state: {}", e),
    }
}

/// Walk right for two seconds, then left, hopping every half second
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(input: &mut bean_platformer::platform::InputState, frame: u32) {
    let walking_right = (frame / 120) % 2 == 0;
    input.keyboard.right = walking_right;
    input.keyboard.left = !walking_right;
    if frame % 30 == 0 {
        input.key_down(" ", false);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
