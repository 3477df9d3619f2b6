//! Priority-ordered chain of processing units
//!
//! [`Chain`] is the one container behind both [`FilterChain`](crate::FilterChain)
//! and [`ValidatorChain`](crate::ValidatorChain). It only knows about
//! ordering, identity and enablement; what "running" a chain means is defined
//! next to each unit trait.
//!
//! # Ordering
//!
//! Entries execute from the highest priority to the lowest. Entries with equal
//! priority keep their insertion order, so plain [`Chain::attach`] calls run in
//! the order they were made. [`Chain::prepend`] always lands in front of every
//! unpinned entry already present.
//!
//! Entries placed with [`Chain::pin_front`] are pinned: they stay ahead of
//! everything attached or prepended later, whatever its priority.
//!
//! # Identity
//!
//! Units are held behind `Arc`, and [`Chain::entries`] hands out the same
//! `Arc`s that were attached, so callers can check which unit sits where with
//! `Arc::ptr_eq`.

use std::sync::Arc;

/// Priority given to units attached without an explicit one.
pub const DEFAULT_PRIORITY: i32 = 1;

// ============================================================================
// CHAIN ENTRY
// ============================================================================

/// One unit together with its scheduling attributes.
pub struct ChainEntry<U: ?Sized> {
    unit: Arc<U>,
    priority: i32,
    enabled: bool,
    break_on_failure: bool,
    pinned: bool,
}

impl<U: ?Sized> ChainEntry<U> {
    /// Wraps a unit with the default priority.
    pub fn new(unit: Arc<U>) -> Self {
        Self {
            unit,
            priority: DEFAULT_PRIORITY,
            enabled: true,
            break_on_failure: false,
            pinned: false,
        }
    }

    /// Sets the priority.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Stops a validator-chain run when this unit fails.
    #[must_use = "builder methods must be chained or built"]
    pub fn breaking(mut self) -> Self {
        self.break_on_failure = true;
        self
    }

    /// Keeps this unit ahead of every unpinned entry.
    #[must_use = "builder methods must be chained or built"]
    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// The unit itself.
    pub fn unit(&self) -> &Arc<U> {
        &self.unit
    }

    /// Scheduling priority.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether the unit takes part in runs.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether a failure of this unit ends a validator-chain run.
    pub fn breaks_chain_on_failure(&self) -> bool {
        self.break_on_failure
    }

    /// Whether the entry holds its place at the front of the chain.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

impl<U: ?Sized> Clone for ChainEntry<U> {
    fn clone(&self) -> Self {
        Self {
            unit: Arc::clone(&self.unit),
            priority: self.priority,
            enabled: self.enabled,
            break_on_failure: self.break_on_failure,
            pinned: self.pinned,
        }
    }
}

// ============================================================================
// CHAIN
// ============================================================================

/// Ordered, inspectable collection of units.
pub struct Chain<U: ?Sized> {
    entries: Vec<ChainEntry<U>>,
}

impl<U: ?Sized> Chain<U> {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a unit at [`DEFAULT_PRIORITY`].
    pub fn attach(&mut self, unit: Arc<U>) -> &mut Self {
        self.insert(ChainEntry::new(unit))
    }

    /// Inserts a unit at the given priority.
    pub fn attach_with_priority(&mut self, unit: Arc<U>, priority: i32) -> &mut Self {
        self.insert(ChainEntry::new(unit).with_priority(priority))
    }

    /// Places a unit in front of every unpinned unit in the chain.
    ///
    /// The new entry gets priority `max(front, DEFAULT_PRIORITY) + 1`, where
    /// `front` is the highest priority among the pinned entries and the first
    /// unpinned one.
    pub fn prepend(&mut self, unit: Arc<U>) -> &mut Self {
        let priority = self.front_priority();
        let entry = ChainEntry::new(unit).with_priority(priority);
        let position = self.pinned_len();
        self.entries.insert(position, entry);
        self
    }

    /// Places a unit at the very front and pins it there.
    ///
    /// Later [`attach`](Self::attach), [`insert`](Self::insert) and
    /// [`prepend`](Self::prepend) calls all land behind it. The priority is
    /// chosen as for [`prepend`](Self::prepend).
    pub fn pin_front(&mut self, unit: Arc<U>) -> &mut Self {
        let priority = self.front_priority();
        let entry = ChainEntry::new(unit).with_priority(priority).pinned();
        self.entries.insert(0, entry);
        self
    }

    /// Inserts a prepared entry according to its priority.
    ///
    /// Unpinned entries never land ahead of a pinned one.
    pub fn insert(&mut self, entry: ChainEntry<U>) -> &mut Self {
        let position = if entry.pinned {
            self.pinned_len()
        } else {
            self.entries
                .iter()
                .position(|e| !e.pinned && e.priority < entry.priority)
                .unwrap_or(self.entries.len())
        };
        self.entries.insert(position, entry);
        self
    }

    /// Number of units, enabled or not.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the chain holds no units.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if at least one unit would execute.
    pub fn has_enabled(&self) -> bool {
        self.entries.iter().any(ChainEntry::is_enabled)
    }

    /// All entries in execution order.
    pub fn entries(&self) -> &[ChainEntry<U>] {
        &self.entries
    }

    /// All units in execution order.
    pub fn units(&self) -> impl Iterator<Item = &Arc<U>> {
        self.entries.iter().map(ChainEntry::unit)
    }

    /// Entries that take part in runs, in execution order.
    pub fn enabled_entries(&self) -> impl Iterator<Item = &ChainEntry<U>> {
        self.entries.iter().filter(|e| e.enabled)
    }

    /// Returns true if this exact unit is in the chain.
    pub fn contains(&self, unit: &Arc<U>) -> bool {
        self.entries.iter().any(|e| Arc::ptr_eq(&e.unit, unit))
    }

    /// Switches off every unit at `priority`; returns how many were affected.
    pub fn disable_priority(&mut self, priority: i32) -> usize {
        self.set_enabled_at(priority, false)
    }

    /// Switches on every unit at `priority`; returns how many were affected.
    pub fn enable_priority(&mut self, priority: i32) -> usize {
        self.set_enabled_at(priority, true)
    }

    /// Appends the entries of `other`, keeping their priorities.
    pub fn merge(&mut self, other: &Chain<U>) -> &mut Self {
        for entry in &other.entries {
            self.insert(entry.clone());
        }
        self
    }

    /// Removes every unit.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn front_priority(&self) -> i32 {
        self.entries
            .iter()
            .take(self.pinned_len() + 1)
            .map(ChainEntry::priority)
            .fold(DEFAULT_PRIORITY, i32::max)
            .saturating_add(1)
    }

    fn pinned_len(&self) -> usize {
        self.entries.iter().take_while(|e| e.pinned).count()
    }

    fn set_enabled_at(&mut self, priority: i32, enabled: bool) -> usize {
        let mut affected = 0;
        for entry in self.entries.iter_mut().filter(|e| e.priority == priority) {
            entry.enabled = enabled;
            affected += 1;
        }
        affected
    }
}

impl<U: ?Sized> Default for Chain<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: ?Sized> Clone for Chain<U> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
