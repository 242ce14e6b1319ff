//! Process-wide busy level shared by views and decoders.
//!
//! Every consumer reports how urgent its outstanding work is; the effective
//! level is the maximum over all consumers. Views defer smoothing while any
//! consumer reports a higher level, which lets plain painting anywhere in
//! the process run before smoothing anywhere else.
//!
//! The coordinator is an injected service ([`BusyLevelService`]) rather than
//! a global so that tests can substitute their own.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::paint_queue::PaintPass;

/// Urgency of outstanding work, ordered from least to most urgent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BusyLevel {
    #[default]
    None,
    Smoothing,
    Painting,
}

impl std::fmt::Display for BusyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "Idle"),
            Self::Smoothing => write!(f, "Smoothing"),
            Self::Painting => write!(f, "Painting"),
        }
    }
}

/// Identity of one busy-level reporter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConsumerId(u64);

static NEXT_CONSUMER: AtomicU64 = AtomicU64::new(1);

impl ConsumerId {
    pub fn next() -> Self {
        ConsumerId(NEXT_CONSUMER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Shared arbitration point for busy levels.
pub trait BusyLevelService: Send + Sync {
    /// Record `level` for `consumer`. `BusyLevel::None` removes the entry.
    fn set_busy_level(&self, consumer: ConsumerId, level: BusyLevel);

    /// Maximum level over all consumers.
    fn busy_level(&self) -> BusyLevel;

    /// Receive every change of the effective level.
    fn subscribe(&self) -> mpsc::Receiver<BusyLevel>;
}

pub type SharedBusyService = Arc<dyn BusyLevelService>;

#[derive(Default)]
struct ManagerState {
    levels: HashMap<ConsumerId, BusyLevel>,
    current: BusyLevel,
    listeners: Vec<mpsc::Sender<BusyLevel>>,
}

impl ManagerState {
    fn recompute(&mut self) {
        let level = self.levels.values().copied().max().unwrap_or_default();
        if level == self.current {
            return;
        }
        debug!(from = %self.current, to = %level, "busy level changed");
        self.current = level;
        self.listeners.retain(|tx| tx.send(level).is_ok());
    }
}

/// Default [`BusyLevelService`]: a mutex-guarded consumer map.
#[derive(Default)]
pub struct BusyLevelManager {
    state: Mutex<ManagerState>,
}

impl BusyLevelManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedBusyService {
        Arc::new(Self::new())
    }

    fn lock(&self) -> MutexGuard<'_, ManagerState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BusyLevelService for BusyLevelManager {
    fn set_busy_level(&self, consumer: ConsumerId, level: BusyLevel) {
        let mut state = self.lock();
        let previous = if level == BusyLevel::None {
            state.levels.remove(&consumer)
        } else {
            state.levels.insert(consumer, level)
        };
        if previous.unwrap_or_default() != level {
            state.recompute();
        }
    }

    fn busy_level(&self) -> BusyLevel {
        self.lock().current
    }

    fn subscribe(&self) -> mpsc::Receiver<BusyLevel> {
        let (tx, rx) = mpsc::channel();
        self.lock().listeners.push(tx);
        rx
    }
}

/// What one view's pending work amounts to.
///
/// `timer_active` is false while the view's tick timer is stopped, which is
/// reported as idle regardless of the queue.
pub fn view_busy_level(
    timer_active: bool,
    front: Option<PaintPass>,
    smooth_pass_scheduled: bool,
) -> BusyLevel {
    if !timer_active {
        return BusyLevel::None;
    }
    match front {
        Some(PaintPass::Normal) => BusyLevel::Painting,
        Some(PaintPass::Smooth) => BusyLevel::Smoothing,
        None if smooth_pass_scheduled => BusyLevel::Smoothing,
        None => BusyLevel::None,
    }
}

/// Whether a suspended view may resume given the global `level`.
///
/// Normal painting resumes unless something more urgent than painting is
/// active; smoothing resumes only when nobody reports more than smoothing.
pub fn should_resume(
    level: BusyLevel,
    front: Option<PaintPass>,
    smooth_pass_scheduled: bool,
) -> bool {
    match front {
        Some(PaintPass::Normal) => level <= BusyLevel::Painting,
        Some(PaintPass::Smooth) => level <= BusyLevel::Smoothing,
        None => smooth_pass_scheduled && level <= BusyLevel::Smoothing,
    }
}
