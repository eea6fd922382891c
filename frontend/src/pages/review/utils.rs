use crate::api::PendingItem;
use gloo_timers::callback::Interval;
use std::{
    any::Any,
    cell::{Cell, RefCell},
    rc::Rc,
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewTab {
    #[default]
    Policies,
    Claims,
}

impl ReviewTab {
    pub fn label(self) -> &'static str {
        match self {
            ReviewTab::Policies => "Pending Policies",
            ReviewTab::Claims => "Pending Claims",
        }
    }
}

/// Orders overlapping fetches of one list: only the newest ticket may
/// apply its result.
#[derive(Debug, Clone, Default)]
pub struct FetchSequencer {
    latest: Rc<Cell<u64>>,
}

impl FetchSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> u64 {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.get() == ticket
    }

    /// Marks every in-flight fetch as stale.
    pub fn invalidate(&self) {
        self.begin();
    }
}

/// Starts a repeating timer. Dropping the returned handle stops it.
pub trait PollTimer {
    type Handle: 'static;

    fn every(&self, period: Duration, tick: Box<dyn Fn()>) -> Self::Handle;
}

pub struct BrowserTimer;

impl PollTimer for BrowserTimer {
    type Handle = Interval;

    fn every(&self, period: Duration, tick: Box<dyn Fn()>) -> Interval {
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, move || tick())
    }
}

/// Keeps a polling timer alive until [`PollGuard::stop`].
#[derive(Clone)]
pub struct PollGuard {
    active: Rc<Cell<bool>>,
    handle: Rc<RefCell<Option<Box<dyn Any>>>>,
}

impl Default for PollGuard {
    fn default() -> Self {
        Self {
            active: Rc::new(Cell::new(true)),
            handle: Rc::new(RefCell::new(None)),
        }
    }
}

impl PollGuard {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Takes ownership of a timer handle; a stopped guard drops it at once.
    pub fn hold<H: 'static>(&self, handle: H) {
        if self.is_active() {
            *self.handle.borrow_mut() = Some(Box::new(handle));
        }
    }

    pub fn stop(&self) {
        self.active.set(false);
        self.handle.borrow_mut().take();
    }
}

/// Drops the entry with `id`; returns whether anything was removed.
pub fn remove_pending<T: PendingItem>(items: &mut Vec<T>, id: i64) -> bool {
    let before = items.len();
    items.retain(|item| item.item_id() != id);
    items.len() != before
}

pub fn display_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        0 => format!("₹{}", grouped),
        f if f % 10 == 0 => format!("₹{}.{}", grouped, f / 10),
        f => format!("₹{}.{:02}", grouped, f),
    }
}

pub fn status_badge_class(status: &str) -> &'static str {
    match status {
        "pending" => "px-2 py-1 text-xs rounded-full bg-yellow-100 text-yellow-800",
        "approved" => "px-2 py-1 text-xs rounded-full bg-green-100 text-green-800",
        _ => "px-2 py-1 text-xs rounded-full bg-red-100 text-red-800",
    }
}

pub fn payment_badge_class(status: &str) -> &'static str {
    match status {
        "pending" => "px-2 py-1 text-xs rounded-full bg-yellow-100 text-yellow-800",
        "paid" => "px-2 py-1 text-xs rounded-full bg-green-100 text-green-800",
        _ => "px-2 py-1 text-xs rounded-full bg-red-100 text-red-800",
    }
}
