use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, EventTarget, Window};

use crate::error::{Result, SurfaceError};

pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

pub fn window() -> Result<Window> {
    web_sys::window().ok_or(SurfaceError::NoWindow)
}

pub fn document() -> Result<Document> {
    window()?.document().ok_or(SurfaceError::NoDocument)
}

/// Looks up `#id` and casts it to `T`.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SurfaceError::MissingElement(id.to_owned()))?
        .dyn_into::<T>()
        .map_err(|_| SurfaceError::WrongElement(id.to_owned()))
}

pub fn create(document: &Document, tag: &str, class: &str) -> Result<Element> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    Ok(el)
}

pub fn create_svg(document: &Document, tag: &str, attrs: &[(&str, &str)]) -> Result<Element> {
    let el = document.create_element_ns(Some(SVG_NS), tag)?;
    for (name, value) in attrs {
        el.set_attribute(name, value)?;
    }
    Ok(el)
}

/// Event listener that detaches itself on drop.
pub struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event: &'static str, callback: F) -> Result<Self>
    where
        F: FnMut(web_sys::Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(web_sys::Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Pending `setTimeout` that is cleared on drop.
pub struct Timeout {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new<F: FnMut() + 'static>(delay_ms: i32, callback: F) -> Result<Self> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut()>);
        let id = window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms,
        )?;
        Ok(Self {
            id,
            _callback: callback,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let Ok(window) = window() {
            window.clear_timeout_with_handle(self.id);
        }
    }
}

/// Nine base-36 characters, used to keep filter ids unique on the page.
pub fn random_suffix() -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    (0..9)
        .map(|_| {
            let i = (js_sys::Math::random() * 36.0) as usize;
            DIGITS[i.min(35)] as char
        })
        .collect()
}
