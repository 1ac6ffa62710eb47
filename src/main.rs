//! Horse Flappy entry point
//!
//! Web: wires DOM input, canvas painting and the HUD to the game.
//! Native: runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, Window};

    use horse_flappy::persistence::LocalStorageStore;
    use horse_flappy::platform::{Action, Hud};
    use horse_flappy::renderer::shapes::{SCORE_POS, SCORE_TEXT};
    use horse_flappy::renderer::{Fill, Overlay, Rect, SceneBuilder};
    use horse_flappy::{Game, Settings};

    /// Quiet period before a resize refits the canvas (ms)
    const RESIZE_DEBOUNCE_MS: i32 = 50;

    const SCORE_FONT: &str = "bold 28px system-ui, -apple-system, Segoe UI, Roboto, Helvetica, Arial";

    /// Score and best text in the page
    struct DomHud {
        score: Option<Element>,
        best: Option<Element>,
    }

    impl DomHud {
        fn new(document: &Document) -> Self {
            Self {
                score: document.get_element_by_id("score"),
                best: document.get_element_by_id("best"),
            }
        }
    }

    impl Hud for DomHud {
        fn set_score_text(&mut self, score: u32) {
            if let Some(el) = &self.score {
                el.set_text_content(Some(&score.to_string()));
            }
        }

        fn set_best_text(&mut self, best: u32) {
            if let Some(el) = &self.best {
                el.set_text_content(Some(&format!("Best: {}", best)));
            }
        }
    }

    /// Game plus everything needed to put it on the page
    struct App {
        game: Game,
        scene: SceneBuilder,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        overlay: Option<Element>,
        shown_overlay: Option<Overlay>,
        /// Forces an overlay rewrite on the first frame
        overlay_dirty: bool,
    }

    impl App {
        /// Match the backing store to the CSS size; returns the field size
        fn fit_canvas(&self, window: &Window) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            let dpr = window.device_pixel_ratio();
            self.canvas.set_width((rect.width() * dpr) as u32);
            self.canvas.set_height((rect.height() * dpr) as u32);
            // Draw in CSS pixels
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            (rect.width() as f32, rect.height() as f32)
        }

        fn frame(&mut self, time: f64) {
            self.scene.set_time(time / 1000.0);
            self.game.frame(time, &mut self.scene);
            self.paint();
            self.sync_overlay();
        }

        fn paint(&self) {
            let scene = self.scene.scene();
            let ctx = &self.ctx;
            ctx.clear_rect(0.0, 0.0, scene.width as f64, scene.height as f64);

            for rect in &scene.rects {
                let (x, y) = (rect.pos.x as f64, rect.pos.y as f64);
                let (w, h) = (rect.size.x as f64, rect.size.y as f64);
                match rect.fill {
                    Fill::Solid(color) => ctx.set_fill_style_str(&css_color(color)),
                    Fill::Vertical { top, bottom } => {
                        let gradient = ctx.create_linear_gradient(x, y, x, y + h);
                        let _ = gradient.add_color_stop(0.0, &css_color(top));
                        let _ = gradient.add_color_stop(1.0, &css_color(bottom));
                        ctx.set_fill_style_canvas_gradient(&gradient);
                    }
                }
                if rect.radius > 0.0 {
                    fill_rounded(ctx, rect);
                } else {
                    ctx.fill_rect(x, y, w, h);
                }
            }

            ctx.set_font(SCORE_FONT);
            ctx.set_text_align("left");
            ctx.set_text_baseline("top");
            ctx.set_fill_style_str(&css_color(SCORE_TEXT));
            let _ = ctx.fill_text(
                &scene.score.to_string(),
                SCORE_POS.x as f64,
                SCORE_POS.y as f64,
            );
        }

        fn sync_overlay(&mut self) {
            let overlay = self.scene.scene().overlay;
            if overlay == self.shown_overlay && !self.overlay_dirty {
                return;
            }
            self.overlay_dirty = false;
            self.shown_overlay = overlay;

            let Some(el) = &self.overlay else {
                return;
            };
            match overlay {
                Some(overlay) => {
                    el.set_inner_html(&overlay.html());
                    let _ = el.class_list().remove_1("hidden");
                }
                None => {
                    let _ = el.class_list().add_1("hidden");
                }
            }
        }
    }

    fn fill_rounded(ctx: &CanvasRenderingContext2d, rect: &Rect) {
        let (x, y) = (rect.pos.x as f64, rect.pos.y as f64);
        let (w, h) = (rect.size.x as f64, rect.size.y as f64);
        let r = rect.radius as f64;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
        let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
        let _ = ctx.arc_to(x, y + h, x, y, r);
        let _ = ctx.arc_to(x, y, x + w, y, r);
        ctx.close_path();
        ctx.fill();
    }

    fn css_color([r, g, b, a]: [f32; 4]) -> String {
        format!(
            "rgba({},{},{},{})",
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
            a
        )
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Horse Flappy starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no #game canvas")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("#game is not a canvas"))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()
            .map_err(|_| JsValue::from_str("unexpected context type"))?;

        let mut settings = Settings::load();
        settings.seed.get_or_insert(js_sys::Date::now() as u64);
        let store = LocalStorageStore::new(settings.best_score_key.clone());
        let game = Game::new(&settings, Box::new(store), Box::new(DomHud::new(&document)));

        let mut app = App {
            game,
            scene: SceneBuilder::new(),
            canvas: canvas.clone(),
            ctx,
            overlay: document.get_element_by_id("overlay"),
            shown_overlay: None,
            overlay_dirty: true,
        };
        let (width, height) = app.fit_canvas(&window);
        app.game.resize(width, height);

        let app = Rc::new(RefCell::new(app));

        setup_input_handlers(&window, &canvas, app.clone());
        setup_auto_pause(&document, app.clone());
        setup_resize(&window, app.clone());

        request_animation_frame(app);

        log::info!("Horse Flappy running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let action = match event.code().as_str() {
                    "Space" => Action::Impulse,
                    "KeyR" => Action::Restart,
                    "KeyP" => Action::PauseToggle,
                    _ => return,
                };
                event.prevent_default();
                app.borrow_mut().game.dispatch(action);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap / click on the field
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                app.borrow_mut().game.dispatch(Action::Impulse);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click on the overlay
        let overlay = app.borrow().overlay.clone();
        if let Some(overlay) = overlay {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().game.dispatch(Action::Restart);
            });
            let _ = overlay.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, app: Rc<RefCell<App>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut app = app.borrow_mut();
                if app.game.mode() == horse_flappy::GameMode::Playing {
                    app.game.pause_toggle();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Refit the canvas once resizing has settled
    fn setup_resize(window: &Window, app: Rc<RefCell<App>>) {
        let refit = {
            let window = window.clone();
            Closure::<dyn FnMut()>::new(move || {
                let mut app = app.borrow_mut();
                let (width, height) = app.fit_canvas(&window);
                app.game.resize(width, height);
            })
        };
        let refit_fn: js_sys::Function = refit.as_ref().unchecked_ref::<js_sys::Function>().clone();
        refit.forget();

        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let window_clone = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(handle) = pending.take() {
                window_clone.clear_timeout_with_handle(handle);
            }
            match window_clone
                .set_timeout_with_callback_and_timeout_and_arguments_0(&refit_fn, RESIZE_DEBOUNCE_MS)
            {
                Ok(handle) => pending.set(Some(handle)),
                Err(e) => log::warn!("Resize timer failed: {:?}", e),
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Entry point is wasm_main
}

/// Headless demo: the autopilot plays at 60 Hz for `demo_seconds` of
/// simulated time, restarting after every game over.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use horse_flappy::persistence::FileStore;
    use horse_flappy::platform::LogHud;
    use horse_flappy::renderer::SceneBuilder;
    use horse_flappy::sim::autopilot;
    use horse_flappy::{Game, GameMode, Settings};

    env_logger::init();
    log::info!("Horse Flappy (native) starting headless demo...");

    let settings = Settings::load();
    let store = FileStore::new(settings.best_score_path.clone());
    let mut game = Game::new(&settings, Box::new(store), Box::new(LogHud));
    let mut scene = SceneBuilder::new();

    const FRAME_MS: f64 = 1000.0 / 60.0;
    let frames = (settings.demo_seconds.max(0.0) * 60.0).round() as u64;
    let mut scores: Vec<u32> = Vec::new();

    game.impulse();
    for i in 0..frames {
        if game.mode() == GameMode::GameOver {
            scores.push(game.state().score);
            log::info!(
                "Session {} ended by {:?} at score {}",
                scores.len(),
                game.last_hit(),
                game.state().score
            );
            game.restart();
        }

        if autopilot::should_impulse(game.state(), game.field(), game.tuning()) {
            game.impulse();
        }
        scene.set_time(i as f64 * FRAME_MS / 1000.0);
        game.frame(i as f64 * FRAME_MS, &mut scene);
    }
    if frames > 0 {
        scores.push(game.state().score);
    }

    let best_this_run = scores.iter().copied().max().unwrap_or(0);
    println!(
        "Played {} session(s) in {:.0}s: best this run {}, all-time best {}",
        scores.len(),
        settings.demo_seconds.max(0.0),
        best_this_run,
        game.state().best
    );
    log::info!("Last frame drew {} shapes", scene.scene().rects.len());
}
