//! Farty Frog entry point
//!
//! Web builds drive the game from `requestAnimationFrame` with DOM input;
//! native builds run a headless autopilot demo and report the score.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{AddEventListenerOptions, KeyboardEvent, MouseEvent, TouchEvent};

    use farty_frog::audio::WebAudioSink;
    use farty_frog::persistence::LocalStore;
    use farty_frog::platform::{LoopToken, TriggerFilter, TriggerSource, is_activate_key};
    use farty_frog::renderer::DomDisplay;
    use farty_frog::{Effects, Game, GameError, Tuning};

    type WebGame = Game<DomDisplay, LocalStore>;

    /// Element that hosts the play field
    const GAME_AREA_ID: &str = "game-container";

    pub fn run() -> Result<(), GameError> {
        log::info!("Farty Frog starting...");

        let display = DomDisplay::new(GAME_AREA_ID)?;
        let world = display.world_size();
        let seed = js_sys::Date::now() as u64;
        let effects = Effects::new(Box::new(WebAudioSink::new()), seed);

        let game = Game::new(
            display,
            LocalStore::new(),
            effects,
            Tuning::default(),
            world,
            seed,
        )?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(game));
        setup_input_handlers(game);

        log::info!("Farty Frog ready - press space, tap or click");
        Ok(())
    }

    /// Start or flap; a start schedules the new loop
    fn activate(game: &Rc<RefCell<WebGame>>) {
        let token = game.borrow_mut().activate();
        if let Some(token) = token {
            request_animation_frame(game.clone(), token);
        }
    }

    /// Route one trigger through the filter, then activate
    fn trigger(
        game: &Rc<RefCell<WebGame>>,
        filter: &Rc<RefCell<TriggerFilter>>,
        source: TriggerSource,
    ) {
        if filter.borrow_mut().accept(source, js_sys::Date::now()) {
            activate(game);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<WebGame>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(area) = window
            .document()
            .and_then(|d| d.get_element_by_id(GAME_AREA_ID))
        else {
            log::warn!("No #{} element - pointer input disabled", GAME_AREA_ID);
            return;
        };
        let filter = Rc::new(RefCell::new(TriggerFilter::new()));

        // Keyboard
        {
            let game = game.clone();
            let filter = filter.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if is_activate_key(&event.key()) && !event.repeat() {
                    event.prevent_default();
                    trigger(&game, &filter, TriggerSource::Key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch (non-passive so the compatibility mouse events are cancelled)
        {
            let game = game.clone();
            let filter = filter.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                trigger(&game, &filter, TriggerSource::Touch);
            });
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            let _ = area.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Mouse
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                trigger(&game, &filter, TriggerSource::Mouse);
            });
            let _ = area
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<WebGame>>, token: LoopToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, token, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<WebGame>>, token: LoopToken, time: f64) {
        let keep_going = game.borrow_mut().frame(time, &token);
        // A stopped or superseded loop simply does not re-arm
        if keep_going {
            request_animation_frame(game, token);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    if let Err(e) = wasm_game::run() {
        log::error!("Farty Frog failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use farty_frog::persistence::JsonFileStore;
    use farty_frog::platform::autopilot;
    use farty_frog::renderer::HeadlessDisplay;
    use farty_frog::{Effects, Game, GameError, Tuning, WorldSize};

    /// Simulated refresh interval (60 Hz)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after five simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    fn load_tuning() -> Tuning {
        let Ok(path) = std::env::var("FARTY_FROG_TUNING") else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path).map(|json| Tuning::from_json(&json)) {
            Ok(Ok(tuning)) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Ok(Err(e)) => {
                log::warn!("Bad tuning file {}: {}", path, e);
                Tuning::default()
            }
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), GameError> {
        let store_path =
            std::env::var("FARTY_FROG_STORE").unwrap_or_else(|_| "farty_frog.json".to_string());
        let seed = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or_else(|| {
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(0)
            });

        let mut game = Game::new(
            HeadlessDisplay::new(),
            JsonFileStore::open(&store_path),
            Effects::silent(),
            load_tuning(),
            WorldSize::default(),
            seed,
        )?;
        log::info!("Autopilot demo with seed {}", seed);

        let token = game.start();
        let mut frames = 0;
        let mut t = 0.0;
        while frames < MAX_FRAMES {
            if autopilot::should_flap(game.session()) {
                game.activate();
            }
            if !game.frame(t, &token) {
                break;
            }
            t += FRAME_MS;
            frames += 1;
        }

        let session = game.session();
        log::info!(
            "Demo finished after {} frames ({:?}): score {}, best {}",
            frames,
            session.phase,
            session.run.score,
            session.run.best_score
        );
        println!(
            "Score: {}  Best: {}  ({})",
            session.run.score,
            session.run.best_score,
            session.pacer.diagnostics().summary()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Farty Frog (native) starting...");

    if let Err(e) = native_demo::run() {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
