//! Browser host bindings
//!
//! The page owns rendering and the overlay; it drives a [`WebSession`] from
//! `requestAnimationFrame` and reads back JSON snapshots.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::Viewport;
use crate::sim::Session;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Already initialised if the module is instantiated twice
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Dino Catch core loaded");
}

/// Session handle shared between the frame loop and keyboard listeners
#[wasm_bindgen]
pub struct WebSession {
    inner: Rc<RefCell<Session>>,
}

#[wasm_bindgen]
impl WebSession {
    /// Create an idle session, optionally with a tuning JSON document
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<WebSession, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        log::info!("Session created with seed: {}", seed);

        let mut session = Session::with_tuning(tuning, seed);
        if let Some(viewport) = read_viewport() {
            session.set_viewport(viewport);
        }
        Ok(WebSession {
            inner: Rc::new(RefCell::new(session)),
        })
    }

    /// Start or restart ("Play Again")
    pub fn start(&self) {
        let mut session = self.inner.borrow_mut();
        if let Some(viewport) = read_viewport() {
            session.set_viewport(viewport);
        }
        session.start();
    }

    /// Returns true if the key is a game key (caller should preventDefault)
    pub fn key_down(&self, key: &str) -> bool {
        self.inner.borrow_mut().key_down(key)
    }

    pub fn key_up(&self, key: &str) -> bool {
        self.inner.borrow_mut().key_up(key)
    }

    /// Install window keydown/keyup listeners that feed this session
    pub fn attach_keyboard(&self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let session = Rc::clone(&self.inner);
        let on_down = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if session.borrow_mut().key_down(&event.key()) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keydown", on_down.as_ref().unchecked_ref())?;
        on_down.forget();

        let session = Rc::clone(&self.inner);
        let on_up = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if session.borrow_mut().key_up(&event.key()) {
                event.prevent_default();
            }
        });
        window.add_event_listener_with_callback("keyup", on_up.as_ref().unchecked_ref())?;
        on_up.forget();

        log::info!("Keyboard listeners attached");
        Ok(())
    }

    /// Call once per animation frame with the rAF timestamp
    pub fn frame(&self, timestamp: f64) {
        let mut session = self.inner.borrow_mut();
        if let Some(viewport) = read_viewport() {
            session.set_viewport(viewport);
        }
        session.frame(timestamp);
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.inner.borrow().snapshot()).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&self) -> String {
        let events = self.inner.borrow_mut().drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn score(&self) -> u32 {
        self.inner.borrow().state().score()
    }

    pub fn lives(&self) -> u8 {
        self.inner.borrow().state().lives()
    }

    pub fn is_playing(&self) -> bool {
        self.inner.borrow().state().is_playing()
    }
}

fn read_viewport() -> Option<Viewport> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width as f32, height as f32))
}
