//! Sandwich Unwrapped entry point
//!
//! Mounts the ambient sandwich field behind the page UI and drives it once
//! per display frame. The login form and report view are plain DOM owned by
//! the host page; this binary only animates the backdrop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement};

    use sandwich_field::consts::BASE_SPRITE_PX;
    use sandwich_field::render::project;
    use sandwich_field::sched::FrameLoop;
    use sandwich_field::{Field, FieldConfig, Viewport};

    const CONTAINER_ID: &str = "sandwich-field";
    const SPRITE_GLYPH: &str = "\u{1f96a}"; // 🥪

    /// Field plus the DOM node mirroring each particle
    struct App {
        field: Field,
        sprites: Vec<HtmlElement>,
    }

    thread_local! {
        /// Running loop handle so the host can tear the animation down
        static FIELD_LOOP: RefCell<Option<FrameLoop>> = const { RefCell::new(None) };
    }

    fn viewport_from_window() -> Viewport {
        let window = web_sys::window().expect("no window");
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0) as f32;
        Viewport { width, height }
    }

    /// Find or create the fixed full-viewport backdrop container
    fn field_container(document: &Document) -> Element {
        if let Some(el) = document.get_element_by_id(CONTAINER_ID) {
            return el;
        }
        let el = document.create_element("div").expect("create container");
        el.set_id(CONTAINER_ID);
        let _ = el.set_attribute(
            "style",
            "position:fixed;inset:0;overflow:hidden;pointer-events:none;z-index:0;",
        );
        if let Some(body) = document.body() {
            let _ = body.append_child(&el);
        }
        el
    }

    /// One absolutely positioned emoji element per particle
    fn spawn_sprites(document: &Document, container: &Element, count: usize) -> Vec<HtmlElement> {
        let mut sprites = Vec::with_capacity(count);
        for _ in 0..count {
            let Ok(el) = document.create_element("span") else {
                continue;
            };
            let Ok(el) = el.dyn_into::<HtmlElement>() else {
                continue;
            };
            el.set_text_content(Some(SPRITE_GLYPH));
            let _ = el.set_attribute(
                "style",
                "position:absolute;user-select:none;will-change:left,top,transform;",
            );
            let _ = container.append_child(&el);
            sprites.push(el);
        }
        sprites
    }

    fn apply_frame(app: &mut App) {
        app.field.step();
        for (particle, el) in app.field.particles.iter().zip(&app.sprites) {
            let sprite = project(particle, BASE_SPRITE_PX);
            let style = el.style();
            let _ = style.set_property("left", &format!("{:.3}%", sprite.left_pct));
            let _ = style.set_property("top", &format!("{:.3}%", sprite.top_pct));
            let _ = style.set_property("font-size", &format!("{:.1}px", sprite.size_px));
            let _ = style.set_property("transform", &sprite.transform());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Sandwich Unwrapped backdrop starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let viewport = viewport_from_window();
        let seed = js_sys::Date::now() as u64;
        let config = FieldConfig::for_viewport(&viewport);
        let field = Field::new(config, viewport, seed);
        log::info!(
            "Field initialized: {} of {} sandwiches placed (seed {})",
            field.len(),
            field.config.count,
            seed
        );

        let container = field_container(&document);
        let sprites = spawn_sprites(&document, &container, field.len());
        let app = Rc::new(RefCell::new(App { field, sprites }));

        // Resize only changes pixel conversions; percentage positions carry
        // over unchanged.
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().field.set_viewport(viewport_from_window());
            });
            let _ =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let frame_loop = FrameLoop::start(move |_time| {
            apply_frame(&mut app.borrow_mut());
        });
        FIELD_LOOP.with(|slot| *slot.borrow_mut() = Some(frame_loop));

        log::info!("Sandwich field running");
    }

    /// Cancel the animation loop; no further frames run after this
    pub fn stop() {
        FIELD_LOOP.with(|slot| {
            if let Some(frame_loop) = slot.borrow_mut().take() {
                frame_loop.cancel();
                log::info!("Sandwich field stopped");
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

/// Host hook: call when the view unmounts to tear the backdrop down
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn stop_field() {
    wasm_app::stop();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sandwich_field::{Field, FieldConfig, Viewport};

    env_logger::init();
    log::info!("Sandwich field (native) starting...");

    // Headless run: a few seconds of frames against a fixed viewport.
    let viewport = Viewport {
        width: 1280.0,
        height: 800.0,
    };
    let config = FieldConfig::for_viewport(&viewport);
    let mut field = Field::new(config, viewport, 42);
    log::info!("Placed {} of {} sandwiches", field.len(), field.config.count);

    for _ in 0..600 {
        field.step();
    }

    let top_speed = field.particles.iter().map(|p| p.speed).fold(0.0, f32::max);
    log::info!(
        "After 600 frames: top speed {:.2} (cap {:.1})",
        top_speed,
        field.config.max_speed
    );
    println!("✓ 600 headless frames OK ({} sandwiches)", field.len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
