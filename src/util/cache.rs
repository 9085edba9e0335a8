use std::cell::Cell;
use std::fmt;
use std::fmt::Formatter;

/// A dirty-flag cache for a derived quantity.
///
/// Holds either a previously computed value or nothing; mutators on the owning
/// type call [`invalidate`](Cached::invalidate), and readers go through
/// [`get_or_recompute`](Cached::get_or_recompute), which computes at most once
/// between invalidations. The cell is interior-mutable so reads stay `&self`,
/// which also makes owning types `!Sync`: a single instance must not be
/// mutated from multiple threads.
///
/// # Examples
///
/// ```
/// use glimmer::util::cache::Cached;
///
/// let cache: Cached<f64> = Cached::new();
/// assert!(!cache.is_valid());
/// assert_eq!(cache.get_or_recompute(|| 42.0), 42.0);
/// assert!(cache.is_valid());
/// cache.invalidate();
/// assert!(!cache.is_valid());
/// ```
#[derive(Debug, Default)]
pub struct Cached<T: Copy> {
    slot: Cell<Option<T>>,
}

impl<T: Copy> Cached<T> {
    pub fn new() -> Self {
        Self {
            slot: Cell::new(None),
        }
    }

    /// Returns the cached value, computing and storing it first if the cache
    /// is invalid. `recompute` runs at most once between invalidations.
    pub fn get_or_recompute(&self, recompute: impl FnOnce() -> T) -> T {
        match self.slot.get() {
            Some(value) => value,
            None => {
                let value = recompute();
                self.slot.set(Some(value));
                value
            }
        }
    }

    /// Stores a value directly, marking the cache valid. For mutators that
    /// already know the derived quantity (e.g. a projection that preserves
    /// magnitude), so a later read returns it exactly.
    pub fn put(&self, value: T) {
        self.slot.set(Some(value));
    }

    pub fn invalidate(&self) {
        self.slot.set(None);
    }

    pub fn is_valid(&self) -> bool {
        self.slot.get().is_some()
    }
}

// Clones snapshot the current cell contents; copies never share cache state.
impl<T: Copy> Clone for Cached<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Cell::new(self.slot.get()),
        }
    }
}

impl<T: Copy + fmt::Display> fmt::Display for Cached<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.slot.get() {
            Some(value) => write!(f, "cached({value})"),
            None => write!(f, "cached(<invalid>)"),
        }
    }
}
