use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::Window;

use super::dom;
use crate::error::{Result, SurfaceError};
use crate::scheduler::{AnimationLoop, FrameHandle, FrameScheduler};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Per-frame work driven by a [`RenderLoop`].
pub trait Animate {
    fn frame(&mut self, frame: u64);
}

/// `requestAnimationFrame` as a [`FrameScheduler`].
pub struct RafScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self) -> Result<FrameHandle> {
        let callback = self.callback.borrow();
        let callback = callback
            .as_ref()
            .ok_or_else(|| SurfaceError::Js("frame callback not installed".into()))?;
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())?;
        Ok(FrameHandle(id))
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        let _ = self.window.cancel_animation_frame(handle.0);
    }
}

struct Shared<T> {
    anim: AnimationLoop<RafScheduler>,
    target: T,
}

/// Owns an animation target and the frame closure that drives it.
/// Dropping the loop cancels the pending frame.
pub struct RenderLoop<T> {
    shared: Rc<RefCell<Shared<T>>>,
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` from within itself. Storing it inside an
    // `Option` allows us to create the scheduler first and install the
    // closure afterwards.
    f: FrameCallback,
}

impl<T: Animate + 'static> RenderLoop<T> {
    pub fn new(target: T) -> Result<Self> {
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = RafScheduler {
            window: dom::window()?,
            callback: f.clone(),
        };
        let shared = Rc::new(RefCell::new(Shared {
            anim: AnimationLoop::new(scheduler),
            target,
        }));

        let g: Weak<RefCell<Shared<T>>> = Rc::downgrade(&shared);
        *f.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(shared) = g.upgrade() else {
                return;
            };
            let mut guard = shared.borrow_mut();
            let Shared { anim, target } = &mut *guard;
            if let Err(err) = anim.advance(|n| target.frame(n)) {
                log::debug!("animation stopped: {err}");
            }
        }) as Box<dyn FnMut()>));

        Ok(Self { shared, f })
    }

    pub fn start(&self) -> Result<()> {
        self.shared.borrow_mut().anim.start()
    }

    pub fn stop(&self) {
        self.shared.borrow_mut().anim.stop();
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().anim.is_running()
    }

    /// Runs `f` against the target outside of a frame.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.shared.borrow_mut().target)
    }

    /// Weak handle for event listeners; it never keeps the target alive.
    pub fn handle(&self) -> LoopHandle<T> {
        LoopHandle {
            shared: Rc::downgrade(&self.shared),
        }
    }

    /// Callback that starts the loop later, if it still exists by then.
    pub fn starter(&self) -> impl FnMut() + 'static {
        let weak = Rc::downgrade(&self.shared);
        move || {
            if let Some(shared) = weak.upgrade() {
                if let Err(err) = shared.borrow_mut().anim.start() {
                    log::debug!("animation did not start: {err}");
                }
            }
        }
    }
}

pub struct LoopHandle<T> {
    shared: Weak<RefCell<Shared<T>>>,
}

impl<T> LoopHandle<T> {
    /// Runs `f` if the loop still exists and is not mid-frame.
    pub fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let shared = self.shared.upgrade()?;
        let mut shared = shared.try_borrow_mut().ok()?;
        Some(f(&mut shared.target))
    }
}

impl<T> Drop for RenderLoop<T> {
    fn drop(&mut self) {
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.anim.stop();
        }
        self.f.borrow_mut().take();
    }
}
