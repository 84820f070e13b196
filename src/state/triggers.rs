//! Scoped side effects behind the passive popup triggers.
//!
//! A trigger is armed when its host component mounts and released when it
//! unmounts. Both the timer and the window listener release on drop, so the
//! effect destructor only has to drop what the effect created.

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::state::popup::TIMER_POPUP_DELAY_MS;

/// Something that can run a callback after a delay. The returned handle
/// cancels the callback when dropped.
pub trait TimerDriver {
    type Handle;

    fn start(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Self::Handle;
}

/// Browser timers via `setTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTimers;

impl TimerDriver for GlooTimers {
    type Handle = Timeout;

    fn start(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, fire)
    }
}

pub struct ScopedTimer<H> {
    handle: Option<H>,
}

impl<H> ScopedTimer<H> {
    pub fn start<D>(driver: &D, delay_ms: u32, fire: impl FnOnce() + 'static) -> Self
    where
        D: TimerDriver<Handle = H>,
    {
        Self { handle: Some(driver.start(delay_ms, Box::new(fire))) }
    }

    pub fn cancel(&mut self) {
        self.handle.take();
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

/// Arms the 30 second lead popup.
pub fn arm_timer_popup<D: TimerDriver>(driver: &D, fire: impl FnOnce() + 'static) -> ScopedTimer<D::Handle> {
    ScopedTimer::start(driver, TIMER_POPUP_DELAY_MS, fire)
}

/// Cursor left through the top edge of the page.
pub fn is_exit_intent(client_y: i32, leaving_document: bool) -> bool {
    leaving_document && client_y <= 0
}

/// Debounces exit intent to one report per mount; jitter along the top edge
/// produces many `mouseout` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExitIntentDetector {
    fired: bool,
}

impl ExitIntentDetector {
    pub fn on_mouse_out(&mut self, client_y: i32, leaving_document: bool) -> bool {
        if self.fired || !is_exit_intent(client_y, leaving_document) {
            return false;
        }
        self.fired = true;
        true
    }
}

/// A window event subscription removed on drop.
pub struct WindowListener {
    window: web_sys::Window,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl WindowListener {
    pub fn new(event: &'static str, handler: impl FnMut(web_sys::Event) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
        if let Err(e) = window.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
            log::error!("failed to listen for {}: {:?}", event, e);
            return None;
        }
        Some(Self { window, event, callback })
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}


#[cfg(test)]
mod tests {
    use super::fake::ManualClock;
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, move || c.set(c.get() + 1))
    }

    #[test]
    fn timer_fires_after_thirty_seconds() {
        let clock = ManualClock::default();
        let (count, fire) = counter();
        let _timer = arm_timer_popup(&clock, fire);
        clock.advance(29_999);
        assert_eq!(count.get(), 0);
        clock.advance(1);
        assert_eq!(count.get(), 1);
        clock.advance(60_000);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn unmount_before_expiry_cancels() {
        let clock = ManualClock::default();
        let (count, fire) = counter();
        let timer = arm_timer_popup(&clock, fire);
        clock.advance(10_000);
        drop(timer);
        assert_eq!(clock.pending(), 0);
        clock.advance(30_000);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn explicit_cancel_disarms() {
        let clock = ManualClock::default();
        let (count, fire) = counter();
        let mut timer = arm_timer_popup(&clock, fire);
        assert!(timer.is_armed());
        timer.cancel();
        assert!(!timer.is_armed());
        clock.advance(40_000);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn remount_starts_a_fresh_delay() {
        let clock = ManualClock::default();
        let (count, fire) = counter();
        drop(arm_timer_popup(&clock, || {}));
        clock.advance(20_000);
        let _timer = arm_timer_popup(&clock, fire);
        clock.advance(20_000);
        assert_eq!(count.get(), 0);
        clock.advance(10_000);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn exit_intent_needs_top_edge_and_leaving_document() {
        assert!(is_exit_intent(0, true));
        assert!(is_exit_intent(-4, true));
        assert!(!is_exit_intent(12, true));
        assert!(!is_exit_intent(-4, false));
    }

    #[test]
    fn exit_intent_reports_once_despite_jitter() {
        let mut detector = ExitIntentDetector::default();
        let reports = [(-1, true), (0, true), (3, true), (-2, true), (-1, true)]
            .into_iter()
            .filter(|(y, leaving)| detector.on_mouse_out(*y, *leaving))
            .count();
        assert_eq!(reports, 1);
    }

    #[test]
    fn misses_do_not_use_up_the_detector() {
        let mut detector = ExitIntentDetector::default();
        assert!(!detector.on_mouse_out(300, true));
        assert!(!detector.on_mouse_out(-1, false));
        assert!(detector.on_mouse_out(-1, true));
    }
}
