//! Maze Muncher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use maze_muncher::Tuning;
    use maze_muncher::platform::{FrameThrottle, InputEvent, InputSlot, map_key};
    use maze_muncher::renderer::{CanvasRenderer, FrameView, Renderer};
    use maze_muncher::sim::{GamePhase, GameState, Maze, tick};

    const TUNING_KEY: &str = "maze_muncher_tuning";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        throttle: FrameThrottle,
        input: InputSlot,
        /// An animation frame is scheduled
        running: bool,
        /// Restart frame timing at the next callback
        rearm_pending: bool,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, renderer: CanvasRenderer) -> Self {
            let throttle = FrameThrottle::new(tuning.frame_interval_ms);
            Self {
                state: GameState::with_tuning(seed, tuning),
                renderer,
                throttle,
                input: InputSlot::default(),
                running: false,
                rearm_pending: false,
            }
        }

        /// Handle one animation frame. Returns whether to schedule another.
        fn frame(&mut self, time: f64) -> bool {
            if self.rearm_pending {
                self.throttle.rearm(time);
                self.rearm_pending = false;
            }

            if let Some(elapsed_ms) = self.throttle.poll(time) {
                let input = self.input.take();
                tick(&mut self.state, &input, elapsed_ms / 1000.0);
                self.render();
            }

            // Paused: stop the chain until the player resumes
            self.running = !self.state.is_paused();
            self.running
        }

        fn render(&mut self) {
            self.renderer.draw(&FrameView::capture(&self.state));
        }

        /// Leave pause directly, since no frames run to pick up the input.
        /// Returns true if the frame loop needs restarting.
        fn resume(&mut self) -> bool {
            self.state.toggle_pause();
            self.rearm_pending = true;
            log::info!("Resumed");
            let restart_loop = !self.running;
            self.running = true;
            restart_loop
        }
    }

    /// Tuning overrides from LocalStorage, falling back to defaults
    fn load_tuning() -> Tuning {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|s| s.get_item(TUNING_KEY).ok().flatten());
        let Some(json) = stored else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring stored tuning: {e}");
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Maze Muncher starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let tuning = load_tuning();
        let maze = Maze::new();
        let width = maze.width_px();
        let height = maze.height_px();
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(ctx, f64::from(width), f64::from(height));

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, renderer)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone())?;
        setup_auto_pause(game.clone())?;

        game.borrow_mut().running = true;
        request_animation_frame(game);

        log::info!("Maze Muncher running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(input) = map_key(&event.key()) else {
                return;
            };
            event.prevent_default();

            let mut g = game.borrow_mut();
            if g.state.is_paused() {
                if !input.accepted_while_paused() {
                    return;
                }
                let restart_loop = g.resume();
                drop(g);
                if restart_loop {
                    request_animation_frame(game.clone());
                }
                return;
            }
            g.input.push(input);
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Queue a pause toggle if the game is running and none is queued yet
    fn request_auto_pause(game: &Rc<RefCell<Game>>, reason: &str) {
        let mut g = game.borrow_mut();
        if g.state.phase == GamePhase::Playing && !g.input.pause_pending() {
            g.input.push(InputEvent::TogglePause);
            log::info!("Auto-paused ({reason})");
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    request_auto_pause(&game, "tab hidden");
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                request_auto_pause(&game, "window blur");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
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
        let keep_running = game.borrow_mut().frame(time);
        if keep_running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use maze_muncher::renderer::{FrameView, Renderer, TextRenderer};
    use maze_muncher::sim::{Direction, GameEvent, GameState, TickInput, tick};
    use maze_muncher::{Tuning, TuningError};

    /// Options for a headless demo run
    #[derive(Parser, Debug)]
    #[command(name = "maze-muncher")]
    #[command(about = "Play Maze Muncher headless with a wandering autopilot")]
    pub struct Options {
        /// Session seed
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Stop after this many frames, or at game over
        #[arg(long, default_value_t = 60 * 120)]
        pub frames: u64,
        /// JSON file of tuning overrides
        #[arg(long)]
        pub tuning: Option<PathBuf>,
    }

    impl Options {
        pub fn load_tuning(&self) -> Result<Tuning, String> {
            let Some(path) = &self.tuning else {
                return Ok(Tuning::default());
            };
            let json = std::fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            Tuning::from_json(&json).map_err(|e: TuningError| format!("{}: {e}", path.display()))
        }
    }

    /// Play a session with a wandering autopilot and report how it went
    pub fn run(options: &Options, tuning: Tuning) -> GameState {
        let dt = tuning.frame_interval_ms / 1000.0;
        let mut state = GameState::with_tuning(options.seed, tuning);
        // The pilot has its own stream so the session stays reproducible from its seed alone
        let mut pilot = Pcg32::seed_from_u64(options.seed.wrapping_add(1));

        for _ in 0..options.frames {
            let input = TickInput {
                direction: pilot
                    .random_bool(1.0 / 20.0)
                    .then(|| Direction::ALL[pilot.random_range(0..Direction::ALL.len())]),
                ..Default::default()
            };
            tick(&mut state, &input, dt);

            for event in &state.events {
                if let GameEvent::LevelCleared { level } = event {
                    log::info!("Frame {}: level {} cleared", state.frame, level);
                }
            }
            if state.is_game_over() {
                break;
            }
        }
        state
    }

    pub fn report(state: &GameState) {
        let mut renderer = TextRenderer::new();
        renderer.draw(&FrameView::capture(state));
        println!("{}", renderer.frame());
        log::info!(
            "Finished after {} frames ({:.1}s): score {}, level {}, lives {}",
            state.frame,
            state.clock,
            state.score,
            state.level,
            state.lives
        );
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_options() {
            let options = Options::try_parse_from(["maze-muncher", "--seed", "42", "--frames", "10"]).unwrap();
            assert_eq!(options.seed, 42);
            assert_eq!(options.frames, 10);
            assert!(options.tuning.is_none());

            let defaults = Options::try_parse_from(["maze-muncher"]).unwrap();
            assert_eq!(defaults.seed, 1);
            assert_eq!(defaults.frames, 7_200);

            assert!(Options::try_parse_from(["maze-muncher", "--seed"]).is_err());
            assert!(Options::try_parse_from(["maze-muncher", "--speed", "3"]).is_err());
            assert!(Options::try_parse_from(["maze-muncher", "--frames", "many"]).is_err());
        }

        #[test]
        fn test_missing_tuning_file_is_an_error() {
            let options =
                Options::try_parse_from(["maze-muncher", "--tuning", "/nonexistent/tuning.json"]).unwrap();
            assert!(options.load_tuning().is_err());
        }

        #[test]
        fn test_headless_run_is_reproducible() {
            let options = Options {
                seed: 9,
                frames: 600,
                tuning: None,
            };
            let a = run(&options, Tuning::default());
            let b = run(&options, Tuning::default());
            assert_eq!(a.frame, b.frame);
            assert_eq!(a.score, b.score);
            assert_eq!(a.player.body.pos, b.player.body.pos);
            assert!(a.score > 0);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Maze Muncher (headless) starting...");

    let options = headless::Options::parse();
    let tuning = match options.load_tuning() {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("Invalid tuning: {e}");
            std::process::exit(1);
        }
    };

    log::info!("Seed {}, up to {} frames", options.seed, options.frames);
    let state = headless::run(&options, tuning);
    headless::report(&state);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
