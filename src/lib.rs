//! Portfolio page effects compiled to WebAssembly.
//!
//! The numeric pieces (displacement field, particle field, section tracking,
//! frame loop) are plain Rust and build on any target. The DOM bindings in
//! `wasm` only exist for `wasm32`.

#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod field;
pub mod particles;
pub mod scheduler;
pub mod scroll;

pub use error::SurfaceError;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    mod dom;
    mod glass;
    mod liquid;
    mod page;
    mod render;

    pub use glass::GlassWindow;
    pub use liquid::LiquidCanvas;
    pub use page::Page;

    /// Everything mounted on the page. Dropping it tears the effects down.
    #[derive(Default)]
    struct App {
        page: Option<page::Page>,
        glass: Option<glass::GlassWindow>,
        liquid: Option<liquid::LiquidCanvas>,
    }

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let app = App {
            page: skip_on_error("page", page::Page::mount()),
            glass: skip_on_error("glass", glass::GlassWindow::mount_into("skills")),
            liquid: skip_on_error("liquid", liquid::LiquidCanvas::mount("liquid")),
        };
        log::info!(
            "mounted page={} glass={} liquid={}",
            app.page.is_some(),
            app.glass.is_some(),
            app.liquid.is_some()
        );
        APP.with(|slot| *slot.borrow_mut() = Some(app));
        Ok(())
    }

    /// Stops every animation loop and detaches all listeners.
    #[wasm_bindgen]
    pub fn unmount() {
        let app = APP.with(|slot| slot.borrow_mut().take());
        if app.is_some() {
            log::debug!("unmounting");
        }
        drop(app);
    }

    /// Surfaces that are not ready leave the page undecorated.
    fn skip_on_error<T>(what: &str, result: crate::error::Result<T>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(err) => {
                log::debug!("{what} skipped: {err}");
                None
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{unmount, GlassWindow, LiquidCanvas, Page};
