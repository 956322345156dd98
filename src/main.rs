//! Birthday Universe entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use birthday_universe::audio::AudioManager;
    use birthday_universe::consts::TOTAL_STAGES;
    use birthday_universe::platform::{dom, now};
    use birthday_universe::renderer::CanvasRenderer;
    use birthday_universe::stage::is_compact_viewport;
    use birthday_universe::{BirthdayUniverse, Effect, LanguageToggle, Settings};

    /// Page instance holding all state
    struct App {
        universe: BirthdayUniverse,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        /// Pending animation frame request
        frame_handle: Option<i32>,
        torn_down: bool,
    }

    impl App {
        /// One display refresh
        fn frame(&mut self, time: f64) {
            self.universe.frame(time);
            if let Some(renderer) = self.renderer.as_mut() {
                self.universe.particles().draw(renderer);
            }
        }
    }

    type Shared = Rc<RefCell<App>>;

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        let settings = Settings::load();

        let renderer = document
            .get_element_by_id("particle-canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
            .and_then(CanvasRenderer::new);
        if renderer.is_none() {
            log::warn!("Particle canvas unavailable - particles disabled");
        }

        let (width, height) = dom::viewport_size(&window);
        if let Some(renderer) = &renderer {
            renderer.resize(width as u32, height as u32);
        }
        if is_compact_viewport(width) {
            dom::use_compact_animations(&document);
        }

        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let seed = js_sys::Date::now() as u64;
        let has_canvas = renderer.is_some();
        let app = Rc::new(RefCell::new(App {
            universe: BirthdayUniverse::new(settings, width, height, seed),
            renderer,
            audio,
            frame_handle: None,
            torn_down: false,
        }));

        let effects = {
            let mut a = app.borrow_mut();
            a.universe.start();
            a.universe.take_effects()
        };
        apply_effects(&app, effects);

        setup_stage_handlers(&document, app.clone());
        setup_keyboard(app.clone());
        setup_language_toggle(&document, app.clone());
        setup_resize(app.clone());
        setup_visibility(&document, app.clone());
        setup_teardown(app.clone());

        // Without a surface the engine stays inert
        if has_canvas {
            request_animation_frame(app);
        }

        log::info!("🎂 Birthday Universe initialized! Ready for magical journey...");
    }

    /// Apply controller effects to the page, audio and timers
    fn apply_effects(app: &Shared, effects: Vec<Effect>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        for effect in effects {
            match effect {
                Effect::Stages(stages) => dom::apply_stages(&document, &stages),
                Effect::Starfield { rank, color } => dom::set_starfield(&document, rank, color),
                Effect::FinalMessage => dom::show_final_message(&document),
                Effect::Sound(cue) => app.borrow().audio.play(cue),
                Effect::Shake(on) => dom::set_shake(&document, on),
                Effect::Sparkle { id, pos } => dom::add_sparkle(&document, id, pos),
                Effect::RemoveSparkle(id) => dom::remove_sparkle(&document, id),
                Effect::Language(language) => {
                    LanguageToggle::new(language).apply_to_document(&document)
                }
                Effect::Wake { due } => schedule_wake(app.clone(), due),
            }
        }
    }

    /// Pump the controller's timers once `due` has passed
    fn schedule_wake(app: Shared, due: f64) {
        let Some(window) = web_sys::window() else {
            return;
        };
        // +1ms so the host clock has reached `due` when we fire
        let delay = (due - now()).max(0.0).ceil() as i32 + 1;
        let closure = Closure::once(move || {
            let effects = {
                let mut a = app.borrow_mut();
                if a.torn_down {
                    return;
                }
                a.universe.pump(now());
                a.universe.take_effects()
            };
            apply_effects(&app, effects);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        );
        closure.forget();
    }

    fn interact(app: &Shared, rank: u8, x: f32, y: f32) {
        let effects = {
            let mut a = app.borrow_mut();
            a.universe.pump(now());
            a.universe.interact(rank, Vec2::new(x, y));
            a.universe.take_effects()
        };
        apply_effects(app, effects);
    }

    fn setup_stage_handlers(document: &web_sys::Document, app: Shared) {
        for rank in 1..=TOTAL_STAGES {
            let Some(doll) = dom::stage_doll(document, rank) else {
                log::warn!("Stage {} has no interactive element - skipped", rank);
                continue;
            };
            dom::tag_doll(&doll, rank);

            // Click (also fired by the keyboard binding)
            {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    interact(&app, rank, event.client_x() as f32, event.client_y() as f32);
                });
                let _ = doll
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Hover
            for (kind, on) in [("mouseenter", true), ("mouseleave", false)] {
                let target = doll.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_: MouseEvent| {
                    dom::highlight_doll(&target, on);
                });
                let _ =
                    doll.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Press feedback
            for (kind, on) in [("touchstart", true), ("touchcancel", false)] {
                let target = doll.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    if on {
                        event.prevent_default();
                    }
                    dom::set_touch_active(&target, on);
                });
                let _ =
                    doll.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                closure.forget();
            }

            // Tap
            {
                let app = app.clone();
                let target = doll.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    dom::set_touch_active(&target, false);
                    let (x, y) = event
                        .changed_touches()
                        .get(0)
                        .map(|t| (t.client_x() as f32, t.client_y() as f32))
                        .unwrap_or_default();
                    interact(&app, rank, x, y);
                });
                let _ = doll
                    .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_keyboard(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            match event.key().as_str() {
                " " | "Enter" => {
                    event.prevent_default();
                    // Read the rank and release the borrow before the synthetic
                    // click re-enters through the click handler
                    let rank = app.borrow().universe.stages().current();
                    let doll = web_sys::window()
                        .and_then(|w| w.document())
                        .and_then(|d| dom::stage_doll(&d, rank));
                    if let Some(doll) = doll {
                        doll.click();
                    }
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_language_toggle(document: &web_sys::Document, app: Shared) {
        let Some(toggle) = document.get_element_by_id("langToggle") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            event.stop_propagation();
            let effects = {
                let mut a = app.borrow_mut();
                a.universe.toggle_language();
                a.universe.take_effects()
            };
            apply_effects(&app, effects);
        });
        let _ = toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = dom::viewport_size(&window_clone);
            let mut a = app.borrow_mut();
            if let Some(renderer) = &a.renderer {
                renderer.resize(width as u32, height as u32);
            }
            a.universe.resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop drawing while hidden, pick up again when visible
    fn setup_visibility(document: &web_sys::Document, app: Shared) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                cancel_animation_frame(&app);
                log::info!("Animation paused (tab hidden)");
            } else {
                let resume = {
                    let a = app.borrow();
                    !a.torn_down && a.frame_handle.is_none() && a.renderer.is_some()
                };
                if resume {
                    request_animation_frame(app.clone());
                    log::info!("Animation resumed");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_teardown(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            cancel_animation_frame(&app);
            let mut a = app.borrow_mut();
            a.torn_down = true;
            a.audio.close();
            a.universe.teardown();
        });
        let _ = window
            .add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn cancel_animation_frame(app: &Shared) {
        let handle = app.borrow_mut().frame_handle.take();
        if let (Some(handle), Some(window)) = (handle, web_sys::window()) {
            let _ = window.cancel_animation_frame(handle);
        }
    }

    fn request_animation_frame(app: Shared) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_clone = app.clone();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app_clone, time);
        });
        let handle = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
        app.borrow_mut().frame_handle = handle;
    }

    fn frame_loop(app: Shared, time: f64) {
        let effects = {
            let mut a = app.borrow_mut();
            a.frame_handle = None;
            if a.torn_down {
                return;
            }
            a.frame(time);
            a.universe.take_effects()
        };
        apply_effects(&app, effects);

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Birthday Universe (native) starting...");
    log::info!("Native mode walks the journey headlessly - serve the wasm build for the real thing");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Walks all five stages on a virtual 60 Hz clock and logs what the page
/// would show
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use birthday_universe::consts::{ADVANCE_DELAY_MS, TOTAL_STAGES};
    use birthday_universe::platform::now;
    use birthday_universe::{BirthdayUniverse, Effect, Settings};
    use glam::Vec2;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const WIDTH: f32 = 1280.0;
    const HEIGHT: f32 = 720.0;

    pub fn run() {
        let seed = (now() * 1000.0) as u64;
        let mut universe = BirthdayUniverse::new(Settings::load(), WIDTH, HEIGHT, seed);
        universe.start();
        report(&mut universe);

        let mut t = 0.0;
        for rank in 1..=TOTAL_STAGES {
            let click = Vec2::new(WIDTH / 2.0, HEIGHT / 2.0);
            universe.pump(t);
            universe.interact(rank, click);
            report(&mut universe);
            t = run_frames(&mut universe, t, ADVANCE_DELAY_MS);
        }

        // Exit animation, celebration bursts and the confetti rain
        t = run_frames(&mut universe, t, 4000.0);

        universe.toggle_language();
        report(&mut universe);

        log::info!(
            "Journey complete at {:.0}ms: {} clicks, {} particles alive ({} confetti)",
            t,
            universe.stages().clicks(),
            universe.particles().len(),
            universe.particles().confetti_count()
        );
        universe.teardown();
    }

    fn run_frames(universe: &mut BirthdayUniverse, start: f64, duration: f64) -> f64 {
        let mut t = start;
        while t < start + duration {
            t += FRAME_MS;
            universe.frame(t);
            report(universe);
        }
        t
    }

    fn report(universe: &mut BirthdayUniverse) {
        for effect in universe.take_effects() {
            match effect {
                Effect::Wake { .. } => {}
                Effect::Stages(stages) => {
                    let classes: Vec<String> = stages
                        .iter()
                        .map(|s| s.classes().join(" "))
                        .collect();
                    log::info!("Stages: {:?}", classes);
                }
                other => log::info!("{:?}", other),
            }
        }
    }
}
