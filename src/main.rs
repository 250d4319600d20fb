//! Lane Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, TouchEvent};

    use lane_rush::audio::{AudioManager, SoundEffect};
    use lane_rush::render::Renderer;
    use lane_rush::sim::{GameCore, GameEvent, Intent, map_key, map_swipe};
    use lane_rush::{BestScore, Settings};

    // JS binding for fullscreen toggle
    #[wasm_bindgen(inline_js = "
        export async function toggle_fullscreen() {
            const wrap = document.getElementById('gameWrap');
            if (!wrap) return;
            try {
                if (!document.fullscreenElement && wrap.requestFullscreen) {
                    await wrap.requestFullscreen({ navigationUI: 'hide' });
                } else if (document.exitFullscreen) {
                    await document.exitFullscreen();
                }
            } catch (e) {}
            document.body.classList.toggle('immersive', !!document.fullscreenElement);
        }
    ")]
    extern "C" {
        fn toggle_fullscreen();
    }

    /// Game instance holding all state
    struct Game {
        core: GameCore,
        renderer: Renderer,
        audio: AudioManager,
        settings: Settings,
        last_time: f64,
        touch_start: Option<(f32, f32)>,
    }

    impl Game {
        fn new(seed: u64, best: BestScore, renderer: Renderer) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                core: GameCore::new(seed, best.score),
                renderer,
                audio,
                settings,
                last_time: 0.0,
                touch_start: None,
            }
        }

        /// One frame: advance the simulation, play out its events, redraw.
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            self.core.advance(dt);
            self.handle_events();
            self.renderer.draw(&self.core, &self.settings, time / 1000.0);
            self.update_hud();
        }

        /// Drain the simulation's one-shot signals into audio and storage.
        fn handle_events(&mut self) {
            for event in self.core.drain_events() {
                match event {
                    GameEvent::Jump => self.audio.play(SoundEffect::Jump),
                    GameEvent::StarCollected => self.audio.play(SoundEffect::Star),
                    GameEvent::FatalCollision => {
                        self.audio.play(SoundEffect::Hit);
                        show_game_over(&self.core);
                    }
                    GameEvent::NewBestScore(score) => {
                        BestScore { score }.save();
                        self.audio.play(SoundEffect::BestScore);
                    }
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.get_element_by_id("hud-left") {
                el.set_text_content(Some(&format!("Score: {}", self.core.display_score())));
            }
            if let Some(el) = document.get_element_by_id("hud-mid") {
                el.set_text_content(Some(&format!("x{:.1}", self.core.multiplier())));
            }
            if let Some(el) = document.get_element_by_id("hud-right") {
                el.set_text_content(Some(&format!("Best: {}", self.core.best_score)));
            }
        }
    }

    fn set_overlay_visible(id: &str, visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "overlay" } else { "overlay hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    fn show_game_over(core: &GameCore) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&core.display_score().to_string()));
        }
        if let Some(el) = document.get_element_by_id("final-best") {
            el.set_text_content(Some(&core.best_score.to_string()));
        }
        set_overlay_visible("overlayGameOver", true);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let renderer = Renderer::new(ctx);
        renderer.fit_canvas(&canvas, window.device_pixel_ratio());

        let seed = js_sys::Date::now() as u64;
        let best = BestScore::load();
        let game = Rc::new(RefCell::new(Game::new(seed, best, renderer)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_blur_mute(game.clone());
        setup_resize(&canvas, game.clone());

        set_overlay_visible("overlay", true);
        request_animation_frame(game);

        log::info!("Lane Rush running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(intent) = map_key(&event.key()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.core.apply_intent(intent);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - remember the origin for the swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.changed_touches().get(0) {
                    game.borrow_mut().touch_start =
                        Some((touch.client_x() as f32, touch.client_y() as f32));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - classify the swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let Some((sx, sy)) = g.touch_start.take() else {
                    return;
                };
                if let Some(touch) = event.changed_touches().get(0) {
                    let dx = touch.client_x() as f32 - sx;
                    let dy = touch.client_y() as f32 - sy;
                    if let Some(intent) = map_swipe(dx, dy) {
                        g.audio.resume();
                        g.core.apply_intent(intent);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // On-screen buttons (mobile)
        for (id, intent) in [
            ("btnLeft", Intent::ShiftLane(-1)),
            ("btnRight", Intent::ShiftLane(1)),
            ("btnJump", Intent::Jump),
        ] {
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.core.apply_intent(intent);
                });
                let _ = btn
                    .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("btnStart") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.core.start_session();
                set_overlay_visible("overlay", false);
                set_overlay_visible("overlayHow", false);
                set_overlay_visible("overlayGameOver", false);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnRetry") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.core.retry_session();
                set_overlay_visible("overlayGameOver", false);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnHow") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                set_overlay_visible("overlay", false);
                set_overlay_visible("overlayHow", true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnBack") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                set_overlay_visible("overlayHow", false);
                set_overlay_visible("overlay", true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnHome") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().core.return_to_menu();
                set_overlay_visible("overlayGameOver", false);
                set_overlay_visible("overlay", true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnMute") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.muted = !g.settings.muted;
                g.settings.save();
                let settings = g.settings.clone();
                g.audio.apply_settings(&settings);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("btnFull") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                toggle_fullscreen();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_blur_mute(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if !g.settings.mute_on_blur {
                return;
            }
            let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
            g.audio.set_blur_muted(hidden);
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            game.borrow().renderer.fit_canvas(&canvas, dpr);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(game.clone());
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_rush::sim::{GameCore, Intent, Phase};

    env_logger::init();
    log::info!("Lane Rush (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless demo run: play a fixed-input session to completion
    let mut core = GameCore::new(0xA11CE, 0);
    core.start_session();
    let mut frame = 0u32;
    while core.phase == Phase::Playing && frame < 60 * 120 {
        if frame % 90 == 0 {
            core.apply_intent(Intent::ShiftLane(if frame % 180 == 0 { 1 } else { -1 }));
        }
        if frame % 140 == 0 {
            core.apply_intent(Intent::Jump);
        }
        core.advance(1.0 / 60.0);
        core.drain_events();
        frame += 1;
    }

    println!(
        "Demo run over after {:.1}s: score {} (best {})",
        core.elapsed, core.display_score(), core.best_score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
