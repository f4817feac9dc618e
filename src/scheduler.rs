//! Start/stop animation loop over an abstract frame source.
//!
//! In the browser the source is `requestAnimationFrame`; tests drive it by
//! hand. The loop keeps at most one frame in flight and only requests the
//! next frame after the current body has returned.

use crate::error::Result;

/// Opaque id returned by a frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

pub trait FrameScheduler {
    fn request_frame(&self) -> Result<FrameHandle>;
    fn cancel_frame(&self, handle: FrameHandle);
}

#[derive(Debug)]
pub struct AnimationLoop<S> {
    scheduler: S,
    in_flight: Option<FrameHandle>,
    running: bool,
    frames: u64,
}

impl<S: FrameScheduler> AnimationLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            in_flight: None,
            running: false,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn in_flight(&self) -> Option<FrameHandle> {
        self.in_flight
    }

    /// Frames whose body has run since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Requests the first frame. Calling it on a running loop does nothing.
    pub fn start(&mut self) -> Result<()> {
        if self.running {
            return Ok(());
        }
        self.running = true;
        self.schedule()
    }

    /// Entry point for the frame callback. Returns whether `body` ran.
    ///
    /// A callback that fires after [`stop`](Self::stop) is ignored.
    pub fn advance<F: FnOnce(u64)>(&mut self, body: F) -> Result<bool> {
        self.in_flight = None;
        if !self.running {
            return Ok(false);
        }
        self.frames += 1;
        body(self.frames);
        if self.running {
            self.schedule()?;
        }
        Ok(true)
    }

    pub fn stop(&mut self) {
        self.running = false;
        if let Some(handle) = self.in_flight.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn schedule(&mut self) -> Result<()> {
        if self.in_flight.is_some() {
            return Ok(());
        }
        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.in_flight = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.running = false;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    /// Records requests and cancellations instead of touching a display.
    #[derive(Debug, Default)]
    pub struct ManualScheduler {
        pub next: RefCell<i32>,
        pub requested: RefCell<Vec<FrameHandle>>,
        pub cancelled: RefCell<Vec<FrameHandle>>,
        pub fail: bool,
    }

    impl FrameScheduler for ManualScheduler {
        fn request_frame(&self) -> Result<FrameHandle> {
            if self.fail {
                return Err(crate::error::SurfaceError::NoWindow);
            }
            let mut next = self.next.borrow_mut();
            *next += 1;
            let handle = FrameHandle(*next);
            self.requested.borrow_mut().push(handle);
            Ok(handle)
        }

        fn cancel_frame(&self, handle: FrameHandle) {
            self.cancelled.borrow_mut().push(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ManualScheduler;
    use super::*;

    #[test]
    fn start_is_idempotent() {
        let mut anim = AnimationLoop::new(ManualScheduler::default());
        anim.start().unwrap();
        anim.start().unwrap();
        assert_eq!(anim.scheduler().requested.borrow().len(), 1);
        assert_eq!(anim.in_flight(), Some(FrameHandle(1)));
    }

    #[test]
    fn next_frame_requested_after_body() {
        let mut anim = AnimationLoop::new(ManualScheduler::default());
        anim.start().unwrap();
        let mut seen = Vec::new();
        for _ in 0..3 {
            let ran = anim
                .advance(|frame| {
                    seen.push(frame);
                })
                .unwrap();
            assert!(ran);
        }
        assert_eq!(seen, vec![1, 2, 3]);
        // one initial request plus one after each body
        assert_eq!(anim.scheduler().requested.borrow().len(), 4);
        assert_eq!(anim.in_flight(), Some(FrameHandle(4)));
    }

    #[test]
    fn stop_cancels_in_flight_frame() {
        let mut anim = AnimationLoop::new(ManualScheduler::default());
        anim.start().unwrap();
        anim.advance(|_| {}).unwrap();
        anim.stop();
        assert_eq!(*anim.scheduler().cancelled.borrow(), vec![FrameHandle(2)]);
        assert_eq!(anim.in_flight(), None);

        // a stale callback must not run the body
        let ran = anim.advance(|_| panic!("body after stop")).unwrap();
        assert!(!ran);
        assert_eq!(anim.frames(), 1);
    }

    #[test]
    fn restart_after_stop() {
        let mut anim = AnimationLoop::new(ManualScheduler::default());
        anim.start().unwrap();
        anim.stop();
        anim.start().unwrap();
        assert!(anim.is_running());
        assert_eq!(anim.scheduler().requested.borrow().len(), 2);
    }

    #[test]
    fn failed_request_leaves_loop_stopped() {
        let mut anim = AnimationLoop::new(ManualScheduler {
            fail: true,
            ..ManualScheduler::default()
        });
        assert!(anim.start().is_err());
        assert!(!anim.is_running());
        assert_eq!(anim.in_flight(), None);
    }
}
