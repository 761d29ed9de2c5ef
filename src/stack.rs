use std::fmt;
use std::iter::Rev;
use std::slice;

use itertools::Itertools;
use tracing::{debug, info, trace, warn};

use crate::error::{Result, StackError};

// =============================================================================
// Core structure
// =============================================================================

/// A LIFO container over a buffer that doubles when full.
///
/// `capacity` is the logical slot count. The backing `Vec` always has at
/// least that much room reserved, so a push below `capacity` never allocates.
#[derive(Debug)]
pub struct Stack<T> {
    elements: Vec<T>,
    capacity: usize,
}

/// Capacity after one growth step: doubling, or 1 for an empty buffer.
pub(crate) fn next_capacity(current: usize) -> Result<usize> {
    if current == 0 {
        return Ok(1);
    }
    current
        .checked_mul(2)
        .ok_or_else(|| StackError::capacity_overflow(current))
}

impl<T> Stack<T> {
    /// Creates a stack without allocating. The first push grows it to 1 slot.
    pub fn new() -> Self {
        Stack {
            elements: Vec::new(),
            capacity: 0,
        }
    }

    /// Creates a stack with exactly `initial` reserved slots.
    pub fn with_capacity(initial: usize) -> Result<Self> {
        let mut elements = Vec::new();
        elements.try_reserve_exact(initial).map_err(|err| {
            warn!(requested = initial, error = %err, "stack allocation failed");
            StackError::from_reserve(initial, err)
        })?;

        info!(capacity = initial, "stack created");
        Ok(Stack {
            elements,
            capacity: initial,
        })
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Index of the most recently pushed element, `None` when empty.
    pub fn top(&self) -> Option<usize> {
        self.elements.len().checked_sub(1)
    }

    pub fn peek(&self) -> Option<&T> {
        self.elements.last()
    }

    // =============================================================================
    // Mutation
    // =============================================================================

    /// Pushes `element`, doubling the buffer first if it is full.
    ///
    /// If the buffer cannot grow the stack is left untouched and `element`
    /// is dropped.
    pub fn push(&mut self, element: T) -> Result<()> {
        if self.elements.len() == self.capacity {
            self.grow()?;
        }

        self.elements.push(element);
        trace!(len = self.elements.len(), "pushed");
        self.check_invariants();
        Ok(())
    }

    /// Removes and returns the top element, or `None` if the stack is empty.
    /// Capacity is never released.
    pub fn pop(&mut self) -> Option<T> {
        let element = self.elements.pop()?;
        trace!(len = self.elements.len(), "popped");
        self.check_invariants();
        Some(element)
    }

    fn grow(&mut self) -> Result<()> {
        let new_capacity = next_capacity(self.capacity).map_err(|err| {
            warn!(capacity = self.capacity, "stack cannot grow further");
            err
        })?;

        // Vec keeps the old buffer intact when the reservation fails.
        let additional = new_capacity - self.elements.len();
        self.elements.try_reserve_exact(additional).map_err(|err| {
            warn!(requested = new_capacity, error = %err, "stack growth failed");
            StackError::from_reserve(new_capacity, err)
        })?;

        debug!(old = self.capacity, new = new_capacity, "capacity doubled");
        self.capacity = new_capacity;
        Ok(())
    }

    /// Consumes the stack, releasing its buffer and every stored element.
    pub fn destroy(self) {
        info!(capacity = self.capacity, len = self.elements.len(), "stack destroyed");
        drop(self);
    }

    fn check_invariants(&self) {
        debug_assert!(self.elements.len() <= self.capacity);
        debug_assert!(self.elements.capacity() >= self.capacity);
    }

    // =============================================================================
    // Inspection
    // =============================================================================

    /// Walks the stored elements from the top down. Calling it again restarts
    /// the walk.
    pub fn iter(&self) -> Rev<slice::Iter<'_, T>> {
        self.elements.iter().rev()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a Stack<T> {
    type Item = &'a T;
    type IntoIter = Rev<slice::Iter<'a, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Display> fmt::Display for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stack: {}", self.iter().join(" "))?;
        write!(f, "Capacity: {}, Size: {}, Top: ", self.capacity, self.len())?;
        match self.top() {
            Some(top) => write!(f, "{top}"),
            None => f.write_str("-1"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
