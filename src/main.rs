//! Flappy Piggies entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_piggies::audio::{AudioManager, SoundEffect};
    use flappy_piggies::consts::*;
    use flappy_piggies::platform::{RawInput, translate};
    use flappy_piggies::renderer::{Backdrop, RenderState, build_scene};
    use flappy_piggies::sim::{GamePhase, GameState, TickInput, tick};
    use flappy_piggies::ui::{self, ButtonKind};
    use flappy_piggies::{HighScores, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        backdrop: Backdrop,
        highscores: HighScores,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase for game-over bookkeeping
        last_phase: GamePhase,
        /// Leaderboard rank of the run that just ended
        last_rank: Option<usize>,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, settings: Settings) -> Self {
            let mut state = GameState::new(seed, tuning);
            state.audio = settings.audio_toggles();
            Self {
                state,
                audio: AudioManager::new(&settings),
                settings,
                render_state: None,
                backdrop: Backdrop::default(),
                highscores: HighScores::new(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Home,
                last_rank: None,
            }
        }

        /// Queue intents for the next tick
        fn push_input(&mut self, raw: RawInput) {
            self.audio.unlock();
            for intent in translate(&raw, self.state.phase, &self.state.playfield) {
                self.input.apply(intent);
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.backdrop
                    .advance(self.state.playfield.width, self.settings.backdrop_scroll());
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Inputs are one-shot
                self.input = TickInput::default();
            }

            let toggles = self.state.audio;
            for event in self.state.drain_events() {
                self.audio.handle(event, toggles);
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            let current_phase = self.state.phase;
            if current_phase != self.last_phase {
                match current_phase {
                    GamePhase::GameOver => self.record_run(),
                    GamePhase::Playing => self.last_rank = None,
                    GamePhase::Home => {}
                }
                self.last_phase = current_phase;
            }
        }

        fn record_run(&mut self) {
            let previous_best = self.highscores.top_score();
            self.last_rank = self.highscores.add_score(self.state.score, self.state.runs);
            let beat_best = previous_best.is_some_and(|best| self.state.score > best);
            if beat_best && self.state.audio.sound {
                self.audio.play(SoundEffect::HighScore);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(&self.state, &self.backdrop);
            match render_state.render(&vertices, &self.state.playfield) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            let phase = self.state.phase;

            set_text(document, "hud-score", &format!("Score: {}", self.state.score));
            set_visible(document, "hud-score", phase != GamePhase::Home);
            set_visible(document, "title", phase == GamePhase::Home);
            set_visible(document, "game-over", phase == GamePhase::GameOver);

            if phase == GamePhase::GameOver {
                let best = self.highscores.top_score().unwrap_or(self.state.score);
                set_text(document, "best-score", &format!("Best: {}", best));
                let rank_text = match self.last_rank {
                    Some(1) => "New best!".to_string(),
                    Some(rank) => format!("#{} this session", rank),
                    None => String::new(),
                };
                set_text(document, "rank", &rank_text);
            }

            set_visible(document, "hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                set_text(document, "hud-fps", &format!("{} fps", self.fps));
            }

            // Button labels sit on top of the quads drawn by the renderer
            let field = self.state.playfield;
            let buttons = ui::layout(phase, field.width, field.height);
            for kind in ButtonKind::ALL {
                let Some(el) = document
                    .get_element_by_id(kind.element_id())
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                else {
                    continue;
                };
                match buttons.iter().find(|b| b.kind == kind) {
                    Some(button) => {
                        let r = button.rect;
                        let style = el.style();
                        let _ = style.set_property("left", &format!("{}px", r.x));
                        let _ = style.set_property("top", &format!("{}px", r.y));
                        let _ = style.set_property("width", &format!("{}px", r.w));
                        let _ = style.set_property("height", &format!("{}px", r.h));
                        let _ = style.set_property("line-height", &format!("{}px", r.h));
                        el.set_text_content(Some(kind.label(self.state.audio)));
                        let _ = el.set_attribute("class", "btn-label");
                    }
                    None => {
                        let _ = el.set_attribute("class", "btn-label hidden");
                    }
                }
            }
        }

        /// Match canvas, GPU surface and playfield to the window
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let Some(window) = web_sys::window() else { return };
            let css_w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(DEFAULT_PLAYFIELD_WIDTH as f64);
            let css_h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(DEFAULT_PLAYFIELD_HEIGHT as f64);
            let dpr = window.device_pixel_ratio();
            let width = ((css_w * dpr) as u32).max(1);
            let height = ((css_h * dpr) as u32).max(1);

            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height);
            }
            self.state.resize(css_w as f32, css_h as f32);
            log::debug!("Resized playfield to {}x{}", css_w, css_h);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Optional `<script id="tuning" type="application/json">` override
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Flappy Piggies starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let settings = Settings::from_query(&window.location().search().unwrap_or_default());
        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, settings)));
        game.borrow_mut().resize(&canvas);

        log::info!("Game initialized with seed: {}", seed);

        // WebGPU with a WebGL2 fallback
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let (width, height) = (canvas.width(), canvas.height());
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("No graphics adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Flappy Piggies running!");
    }

    /// Pointer position relative to the canvas, in CSS pixels
    fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> RawInput {
        let rect = canvas.get_bounding_client_rect();
        RawInput::PointerDown {
            x: (client_x as f64 - rect.left()) as f32,
            y: (client_y as f64 - rect.top()) as f32,
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse press - buttons and flap
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let raw = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().push_input(raw);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - same as a press
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let raw = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().push_input(raw);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else { return };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if code == "Space" {
                    // Keep the page from scrolling
                    event.prevent_default();
                }
                game.borrow_mut().push_input(RawInput::KeyDown(code));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
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

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use flappy_piggies::sim::{GamePhase, GameState, TickInput, autopilot, tick};
    use flappy_piggies::{HighScores, Tuning};

    env_logger::init();
    log::info!("Flappy Piggies (native) starting...");
    log::info!("The browser build runs with `trunk serve`; natively this plays a headless demo");

    // Optional tuning override: `flappy-piggies path/to/tuning.json`
    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(&path)?)?,
        None => Tuning::default(),
    };

    // Five minutes of play per run at 60 ticks/s
    const MAX_TICKS: u64 = 5 * 60 * 60;

    let mut state = GameState::new(0x5eed, tuning);
    let mut highscores = HighScores::new();

    for _ in 0..3 {
        let start = TickInput {
            start: state.phase == GamePhase::Home,
            restart: state.phase == GamePhase::GameOver,
            ..Default::default()
        };
        tick(&mut state, &start);

        while state.phase == GamePhase::Playing && state.time_ticks < MAX_TICKS {
            let input = TickInput {
                flap: autopilot(&state),
                ..Default::default()
            };
            tick(&mut state, &input);
        }
        state.drain_events();

        let rank = highscores.add_score(state.score, state.runs);
        println!(
            "run {}: score {} in {} ticks (rank {:?})",
            state.runs, state.score, state.time_ticks, rank
        );
        if state.phase == GamePhase::Playing {
            state.end_run();
        }
    }

    println!("{}", serde_json::to_string_pretty(&highscores)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
