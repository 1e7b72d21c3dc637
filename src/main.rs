//! Dot Field entry point
//!
//! Mounts the overlay on the page canvas and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_overlay {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent, PageTransitionEvent, Window};

    use dot_field::audio::WebAudio;
    use dot_field::consts::SIM_DT;
    use dot_field::persistence::LocalStore;
    use dot_field::renderer::CanvasSurface;
    use dot_field::sim::GameStatus;
    use dot_field::{Overlay, Standing};

    /// Page and overlay controls; clicks on them are never game input
    const CONTROL_SELECTOR: &str = "button, a, input, textarea, select, [role=\"button\"]";

    /// What the HUD currently shows, to skip redundant DOM writes
    #[derive(Clone, Copy, PartialEq)]
    struct HudSnapshot {
        status: GameStatus,
        score: u64,
        muted: bool,
    }

    struct App {
        overlay: Overlay<WebAudio, LocalStore>,
        surface: CanvasSurface,
        last_time: f64,
        frame_id: Option<i32>,
        running: bool,
        hud: Option<HudSnapshot>,
    }

    impl App {
        fn resize(&mut self, window: &Window) {
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
            self.surface.resize(width as u32, height as u32);
            self.overlay.resize(width as f32, height as f32);
        }

        /// Sync DOM chrome with the overlay state
        fn update_hud(&mut self, document: &Document) {
            let snapshot = HudSnapshot {
                status: self.overlay.status(),
                score: self.overlay.score(),
                muted: self.overlay.muted(),
            };
            if self.hud == Some(snapshot) {
                return;
            }
            let entered_game_over = snapshot.status == GameStatus::GameOver
                && self.hud.map(|h| h.status) != Some(GameStatus::GameOver);
            self.hud = Some(snapshot);

            let class = match snapshot.status {
                GameStatus::Idle => "passive",
                GameStatus::Playing | GameStatus::GameOver => "modal",
            };
            if let Some(el) = document.get_element_by_id("dot-field") {
                let _ = el.set_attribute("class", class);
            }

            show(document, "hint", snapshot.status == GameStatus::Idle);
            show(document, "hud", snapshot.status == GameStatus::Playing);
            show(document, "game-over", snapshot.status == GameStatus::GameOver);

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&format!("Score: {}", snapshot.score)));
            }

            if entered_game_over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&snapshot.score.to_string()));
                }
                if let Some(list) = document.get_element_by_id("leaderboard") {
                    fill_leaderboard(document, &list, &self.overlay.standings());
                }
            }

            if let Some(btn) = document.get_element_by_id("mute-btn") {
                let (title, label) = if snapshot.muted {
                    ("Unmute", "\u{1F507}")
                } else {
                    ("Mute", "\u{1F50A}")
                };
                let _ = btn.set_attribute("title", title);
                btn.set_text_content(Some(label));
            }
        }
    }

    fn show(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn fill_leaderboard(document: &Document, list: &Element, rows: &[Standing]) {
        list.set_text_content(None);
        for (i, row) in rows.iter().enumerate() {
            let Ok(item) = document.create_element("li") else {
                continue;
            };
            if row.benchmark {
                let _ = item.set_attribute("class", "benchmark");
            }
            item.set_text_content(Some(&format!("{}. {} {}", i + 1, row.name, row.score)));
            let _ = list.append_child(&item);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Dot Field starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let surface = CanvasSurface::new(canvas)?;

        let seed = js_sys::Date::now() as u64;
        let overlay = Overlay::new(WebAudio::new(), LocalStore::open(), seed);
        let app = Rc::new(RefCell::new(App {
            overlay,
            surface,
            last_time: 0.0,
            frame_id: None,
            running: true,
            hud: None,
        }));
        app.borrow_mut().resize(&window);
        log::info!("Overlay initialized with seed: {}", seed);

        setup_window_handlers(&window, app.clone())?;
        setup_buttons(&document, app.clone())?;

        request_animation_frame(app);

        log::info!("Dot Field running!");
        Ok(())
    }

    fn setup_window_handlers(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        // Resize
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(window) = web_sys::window() {
                    app.borrow_mut().resize(&window);
                }
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move - track pointer, show a hand cursor over dots while idle
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let at = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                let hand = app.borrow_mut().overlay.pointer_moved(at);
                let body = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.body());
                if let Some(body) = body {
                    let _ = body
                        .style()
                        .set_property("cursor", if hand { "pointer" } else { "" });
                }
            });
            window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click - capture phase so dot hits are seen before page handlers
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let on_control = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest(CONTROL_SELECTOR).ok().flatten())
                    .is_some();
                let at = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                if app.borrow_mut().overlay.click(at, on_control) {
                    event.prevent_default();
                    event.stop_propagation();
                }
            });
            window.add_event_listener_with_callback_and_bool(
                "click",
                closure.as_ref().unchecked_ref(),
                true,
            )?;
            closure.forget();
        }

        // Page hide - stop the frame loop and the melody timer
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                a.running = false;
                if let (Some(id), Some(window)) = (a.frame_id.take(), web_sys::window()) {
                    let _ = window.cancel_animation_frame(id);
                }
                a.overlay.teardown();
            });
            window
                .add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Page show - restart after a back/forward cache restore
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                if !event.persisted() {
                    return;
                }
                {
                    let mut a = app.borrow_mut();
                    if a.running {
                        return;
                    }
                    a.running = true;
                    a.last_time = 0.0;
                    a.hud = None;
                    a.overlay.resume();
                }
                request_animation_frame(app.clone());
            });
            window
                .add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let actions: [(&str, fn(&mut Overlay<WebAudio, LocalStore>)); 4] = [
            ("mute-btn", |o| {
                let muted = o.toggle_mute();
                log::info!("Sound {}", if muted { "muted" } else { "on" });
            }),
            ("abort-btn", |o| o.abort()),
            ("exit-btn", |o| o.reset()),
            ("retry-btn", |o| o.retry()),
        ];

        for (id, action) in actions {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{id}");
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                action(&mut app.borrow_mut().overlay);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let next = app.clone();
        let closure = Closure::once(move |time: f64| {
            frame(next, time);
        });
        let id = window
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .ok();
        closure.forget();
        app.borrow_mut().frame_id = id;
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if !a.running {
                return;
            }

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            let App {
                overlay, surface, ..
            } = &mut *a;
            overlay.frame(dt, surface);

            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                a.update_hud(&document);
            }
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_overlay::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dot_field::Overlay;
    use dot_field::audio::SilentBackend;
    use dot_field::consts::SIM_DT;
    use dot_field::persistence::MemoryStore;
    use dot_field::renderer::NullSurface;

    env_logger::init();
    log::info!("Dot Field (native) starting...");
    log::info!("The overlay needs a browser - run with `trunk serve` for the web version");

    // Headless run: let the field drift for ten seconds
    let mut overlay = Overlay::new(SilentBackend, MemoryStore::default(), 42);
    overlay.resize(1280.0, 720.0);
    for _ in 0..600 {
        overlay.frame(SIM_DT, &mut NullSurface);
    }

    let field = overlay.field();
    let inside = field
        .dots
        .iter()
        .filter(|d| d.pos.x >= 0.0 && d.pos.x <= field.width && d.pos.y >= 0.0 && d.pos.y <= field.height)
        .count();
    println!(
        "{} dots, {} inside the {}x{} surface after 600 ticks",
        field.dots.len(),
        inside,
        field.width,
        field.height
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
