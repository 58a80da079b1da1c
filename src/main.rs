//! Dino Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, EventTarget, HtmlCanvasElement, HtmlElement, HtmlSelectElement};

    use dino_dash::audio::AudioManager;
    use dino_dash::consts::*;
    use dino_dash::highscores::best_score;
    use dino_dash::platform::input::InputEvent;
    use dino_dash::platform::storage::LocalStorageStore;
    use dino_dash::renderer::Renderer;
    use dino_dash::sim::{
        Achievements, GameEvent, GamePhase, GameState, PowerUpKind, TickContext, TickInput, tick,
    };
    use dino_dash::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        settings: Settings,
        achievements: Achievements,
        scores: LocalStorageStore,
        /// Stored best, refreshed only when a run sets a new one
        best: u64,
        input: TickInput,
        renderer: Option<Renderer>,
        audio: AudioManager,
        document: Document,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, document: Document, canvas: HtmlCanvasElement) -> Self {
            let settings = Settings::default();
            let state = GameState::new(seed, tuning.profile(settings.difficulty));
            let achievements = tuning.achievements();
            let scores = LocalStorageStore::new();
            let best = best_score(&scores);
            Self {
                state,
                tuning,
                settings,
                achievements,
                scores,
                best,
                input: TickInput::default(),
                renderer: Renderer::new(canvas.clone()),
                audio: AudioManager::new(),
                document,
                canvas,
            }
        }

        /// Run one simulation tick with the buffered input
        fn update(&mut self) {
            let profile = *self.tuning.profile(self.settings.difficulty);
            let mut ctx = TickContext {
                profile: &profile,
                achievements: &mut self.achievements,
                scores: &mut self.scores,
            };
            tick(&mut self.state, &self.input, &mut ctx);

            // Clear one-shot inputs after processing
            self.input.clear();

            for event in self.state.drain_events() {
                self.handle_event(event);
            }
        }

        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::Sound(cue) => self.audio.play(cue),
                GameEvent::ScreenShake => {
                    if self.settings.screen_shake {
                        self.shake();
                    }
                }
                GameEvent::NightMode(on) => {
                    if let Some(body) = self.document.body() {
                        let _ = body.class_list().toggle_with_force("night-mode", on);
                    }
                }
                GameEvent::AchievementUnlocked {
                    name, description, ..
                } => self.show_banner(&format!("{} - {}", name, description)),
                GameEvent::LifeLost { lives_left } => {
                    log::debug!("Life lost, {} left", lives_left);
                }
                GameEvent::GameOver { score, new_best } => {
                    log::info!("Game over: score {} (new best: {})", score, new_best);
                    if new_best {
                        self.best = score;
                    }
                }
            }
        }

        fn shake(&self) {
            let classes = self.canvas.class_list();
            let _ = classes.add_1("shake");
            after(SCREEN_SHAKE_MS, move || {
                let _ = classes.remove_1("shake");
            });
        }

        fn show_banner(&self, text: &str) {
            let Some(el) = self.document.get_element_by_id("achievementNotification") else {
                return;
            };
            if let Some(label) = el.query_selector(".achievement-text").ok().flatten() {
                label.set_text_content(Some(text));
            }
            let classes = el.class_list();
            let _ = classes.remove_1("hidden");
            let _ = classes.add_1("show");
            after(BANNER_VISIBLE_MS, move || {
                let _ = classes.remove_1("show");
                after(BANNER_FADE_MS, move || {
                    let _ = classes.add_1("hidden");
                });
            });
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let set = |id: &str, text: String| {
                if let Some(el) = self.document.get_element_by_id(id) {
                    el.set_text_content(Some(&text));
                }
            };

            set("score", self.state.score.to_string());
            set("highScore", self.best.to_string());
            set("level", self.state.level.to_string());
            set("lives", self.state.lives.to_string());
            set("speedBoost", self.state.inventory.speed_boost.to_string());
            set("shield", self.state.inventory.shield.to_string());
            set("slowMo", self.state.inventory.slow_mo.to_string());
            let pause_label = if self.state.phase == GamePhase::Paused {
                "\u{25b6}\u{fe0f}"
            } else {
                "\u{23f8}\u{fe0f}"
            };
            set("pauseBtn", pause_label.to_string());

            if let Some(bar) = self
                .document
                .get_element_by_id("progressBar")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let width = format!("{:.1}%", self.state.progress() * 100.0);
                let _ = bar.style().set_property("width", &width);
            }
        }

        /// Switch difficulty from the selector. Lives reset even mid-run.
        fn select_difficulty(&mut self, name: &str) {
            match self.settings.select_difficulty(name) {
                Ok(difficulty) => {
                    let profile = *self.tuning.profile(difficulty);
                    self.state.reset_lives(&profile);
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        fn toggle_sound(&mut self) -> bool {
            let enabled = self.settings.toggle_sound();
            self.audio.set_muted(!enabled);
            enabled
        }
    }

    /// Run `f` once after `ms` milliseconds
    fn after(ms: i32, f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(f);
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
        closure.forget();
    }

    /// Attach a listener that lives as long as the page
    fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Read the optional `<script id="tuning" type="application/json">` override
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

    /// Match the backing store to the displayed size, keeping the 4:1 field
    fn fit_canvas(canvas: &HtmlCanvasElement) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let width = (canvas.client_width().max(1) as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height((width as f32 * FIELD_HEIGHT / FIELD_WIDTH) as u32);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Dino Dash starting...");

        if start().is_none() {
            log::error!("Dino Dash failed to start: missing window, document or canvas");
        }
    }

    fn start() -> Option<()> {
        let window = web_sys::window()?;
        let document = window.document()?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")?
            .dyn_into()
            .ok()?;
        fit_canvas(&canvas);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            tuning,
            document.clone(),
            canvas.clone(),
        )));
        log::info!("Game initialized with seed: {}", seed);

        // Pick up whatever the selector shows on load
        if let Some(select) = document
            .get_element_by_id("difficultySelect")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            game.borrow_mut().select_difficulty(&select.value());
        }

        setup_keyboard(&document, game.clone());
        setup_canvas(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_settings(&document, game.clone());

        {
            let canvas = canvas.clone();
            listen(&window, "resize", move |_| fit_canvas(&canvas));
        }
        // Keep the page from scrolling under touch controls
        listen(&document, "touchmove", |event| event.prevent_default());

        game.borrow().update_hud();

        // Start game loop
        request_animation_frame(game);

        log::info!("Dino Dash running!");
        Some(())
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            listen(document, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                    return;
                };
                if let Some(cmd) = InputEvent::key_down(&key.code()) {
                    event.prevent_default();
                    cmd.apply(&mut game.borrow_mut().input);
                }
            });
        }

        listen(document, "keyup", move |event| {
            let Some(key) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            if let Some(cmd) = InputEvent::key_up(&key.code()) {
                event.prevent_default();
                cmd.apply(&mut game.borrow_mut().input);
            }
        });
    }

    fn setup_canvas(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // touchstart's preventDefault suppresses the synthesized click
        for kind in ["touchstart", "click"] {
            let game = game.clone();
            listen(canvas, kind, move |event| {
                event.prevent_default();
                InputEvent::Primary.apply(&mut game.borrow_mut().input);
            });
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let bind = |id: &str, kinds: &[&str], cmd: InputEvent| {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing control #{}", id);
                return;
            };
            for kind in kinds {
                let game = game.clone();
                listen(&btn, kind, move |event| {
                    event.prevent_default();
                    cmd.apply(&mut game.borrow_mut().input);
                });
            }
        };

        bind("jumpBtn", &["touchstart", "click"], InputEvent::Primary);
        bind("duckBtn", &["touchstart", "mousedown"], InputEvent::DuckPress);
        bind(
            "duckBtn",
            &["touchend", "mouseup", "mouseleave"],
            InputEvent::DuckRelease,
        );
        bind(
            "speedBoostBtn",
            &["click"],
            InputEvent::Activate(PowerUpKind::SpeedBoost),
        );
        bind(
            "shieldBtn",
            &["click"],
            InputEvent::Activate(PowerUpKind::Shield),
        );
        bind(
            "slowMoBtn",
            &["click"],
            InputEvent::Activate(PowerUpKind::SlowMo),
        );
        bind("pauseBtn", &["click"], InputEvent::TogglePause);
    }

    fn setup_settings(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(select) = document
            .get_element_by_id("difficultySelect")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            let game = game.clone();
            let select_clone = select.clone();
            listen(&select, "change", move |_| {
                let mut g = game.borrow_mut();
                g.select_difficulty(&select_clone.value());
                // Rejected names leave the previous profile selected
                select_clone.set_value(g.settings.difficulty.as_str());
                g.update_hud();
            });
        }

        if let Some(btn) = document.get_element_by_id("soundToggle") {
            let btn_clone = btn.clone();
            listen(&btn, "click", move |_| {
                let enabled = game.borrow_mut().toggle_sound();
                let label = if enabled { "\u{1f50a}" } else { "\u{1f507}" };
                btn_clone.set_text_content(Some(label));
            });
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One simulation tick per animation frame
    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dino Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xD1_70u64);
    let mut settings = dino_dash::Settings::default();
    if let Some(name) = args.next() {
        if let Err(e) = settings.select_difficulty(&name) {
            log::warn!("{}", e);
        }
    }

    autopilot::run(seed, &settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a simple bot plays one session and reports the outcome
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use dino_dash::highscores::best_score;
    use dino_dash::sim::{
        Achievements, GameEvent, GamePhase, GameState, PowerUpKind, TickContext, TickInput, tick,
    };
    use dino_dash::{MemoryStore, Settings, Tuning};

    /// Give up after this many ticks (about ten minutes at 60 fps)
    const MAX_TICKS: u64 = 36_000;

    pub fn run(seed: u64, settings: &Settings) {
        let tuning = Tuning::default();
        let profile = *tuning.profile(settings.difficulty);
        let mut achievements: Achievements = tuning.achievements();
        let mut scores = MemoryStore::default();
        let mut state = GameState::new(seed, &profile);
        let mut input = TickInput {
            primary: true,
            ..Default::default()
        };

        log::info!(
            "Autopilot: seed {} on {} ({} lives)",
            seed,
            settings.difficulty.as_str(),
            profile.starting_lives()
        );

        while state.phase != GamePhase::GameOver && state.time_ticks < MAX_TICKS {
            let mut ctx = TickContext {
                profile: &profile,
                achievements: &mut achievements,
                scores: &mut scores,
            };
            tick(&mut state, &input, &mut ctx);
            input.clear();

            for event in state.drain_events() {
                match event {
                    GameEvent::AchievementUnlocked { name, .. } => {
                        log::info!("[{}] achievement: {}", state.time_ticks, name)
                    }
                    GameEvent::LifeLost { lives_left } => {
                        log::info!("[{}] hit, {} lives left", state.time_ticks, lives_left)
                    }
                    GameEvent::NightMode(on) => log::debug!("night mode: {}", on),
                    _ => {}
                }
            }

            plan(&state, &mut input);
        }

        log::info!(
            "Autopilot finished after {} ticks: score {}, level {}, best {}, {}/{} achievements",
            state.time_ticks,
            state.score,
            state.level,
            best_score(&scores),
            achievements.unlocked_count(),
            achievements.iter().count()
        );
    }

    /// Decide the next tick's input from what is on screen. Every obstacle
    /// reaches the ground, so jumping is the only dodge.
    fn plan(state: &GameState, input: &mut TickInput) {
        let c = &state.character;
        let front = c.pos.x + c.size.x;
        let lookahead = state.speed * 8.0;
        let threat = state
            .obstacles
            .iter()
            .any(|o| o.pos.x + o.size.x > c.pos.x && o.pos.x - front < lookahead);

        if threat && c.is_grounded() {
            input.primary = true;
        }
        if state.inventory.shield > 0 && !c.has_shield() && threat {
            input.activate.push(PowerUpKind::Shield);
        }
        if state.inventory.slow_mo > 0 && !state.effects.slow_mo.is_active() && state.level >= 3 {
            input.activate.push(PowerUpKind::SlowMo);
        }
        if state.inventory.speed_boost > 0 && state.lives > 1 && state.obstacles.is_empty() {
            input.activate.push(PowerUpKind::SpeedBoost);
        }
    }
}
