//! Asynchronous browser services the controller depends on, plus
//! deterministic stand-ins for running the controller outside a browser.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures_util::future::{self, LocalBoxFuture};
use futures_util::FutureExt;

use crate::page::PageError;

pub trait Clipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PageError>>;
}

/// One-shot timers. Scheduled callbacks cannot be cancelled.
pub trait Timers {
    fn after(&self, delay_ms: u32, callback: Box<dyn FnOnce()>);
}

/// Clipboard that records every write. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingClipboard {
    writes: Rc<RefCell<Vec<String>>>,
    reject: Rc<Cell<bool>>,
}

impl RecordingClipboard {
    /// A clipboard whose writes are all rejected, as on denied permission.
    pub fn rejecting() -> Self {
        let clipboard = Self::default();
        clipboard.reject.set(true);
        clipboard
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), PageError>> {
        if self.reject.get() {
            return future::ready(Err(PageError::Js("NotAllowedError".to_string()))).boxed_local();
        }
        self.writes.borrow_mut().push(text.to_string());
        future::ready(Ok(())).boxed_local()
    }
}

struct Scheduled {
    deadline_ms: u64,
    callback: Box<dyn FnOnce()>,
}

/// Virtual clock driven by [`ManualTimers::advance`]. Clones share the clock.
#[derive(Clone, Default)]
pub struct ManualTimers {
    now_ms: Rc<Cell<u64>>,
    pending: Rc<RefCell<Vec<Scheduled>>>,
}

impl ManualTimers {
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move the clock forward, firing due callbacks in deadline order.
    pub fn advance(&self, delta_ms: u64) {
        let now = self.now_ms.get() + delta_ms;
        self.now_ms.set(now);

        let mut due = {
            let mut pending = self.pending.borrow_mut();
            let (due, waiting): (Vec<_>, Vec<_>) = pending
                .drain(..)
                .partition(|scheduled| scheduled.deadline_ms <= now);
            *pending = waiting;
            due
        };
        due.sort_by_key(|scheduled| scheduled.deadline_ms);
        for scheduled in due {
            (scheduled.callback)();
        }
    }
}

impl Timers for ManualTimers {
    fn after(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push(Scheduled {
            deadline_ms: self.now_ms.get() + u64::from(delay_ms),
            callback,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_timers_fire_at_deadline() {
        let timers = ManualTimers::default();
        let fired = Rc::new(Cell::new(0));

        let counter = Rc::clone(&fired);
        timers.after(2000, Box::new(move || counter.set(counter.get() + 1)));

        timers.advance(1999);
        assert_eq!(fired.get(), 0);
        assert_eq!(timers.pending(), 1);

        timers.advance(1);
        assert_eq!(fired.get(), 1);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn test_manual_timers_fire_in_deadline_order() {
        let timers = ManualTimers::default();
        let order = Rc::new(RefCell::new(Vec::new()));

        for (delay, label) in [(300, "late"), (100, "early")] {
            let order = Rc::clone(&order);
            timers.after(delay, Box::new(move || order.borrow_mut().push(label)));
        }
        timers.advance(500);
        assert_eq!(*order.borrow(), vec!["early", "late"]);
    }

    #[test]
    fn test_recording_clipboard() {
        let clipboard = RecordingClipboard::default();
        futures::executor::block_on(clipboard.write_text("a")).unwrap();
        assert_eq!(clipboard.last().as_deref(), Some("a"));

        let rejecting = RecordingClipboard::rejecting();
        assert!(futures::executor::block_on(rejecting.write_text("b")).is_err());
        assert!(rejecting.writes().is_empty());
    }
}
