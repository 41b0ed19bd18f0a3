//! Circular history buffer over item descriptors.
//!
//! A fixed-capacity ring with three cursors: `head` (next slot overwritten on
//! append), `tail` (oldest retained item), and `cursor` (item currently shown).
//! The valid slots are the circular range `[tail, head)`; navigation is O(1)
//! and never allocates.

use crate::error::Error;
use crate::item::ItemDescriptor;

/// Default bound on retained history, shared with the configuration layer.
pub const MAX_HISTORY_SIZE: usize = 120;

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    slots: Vec<ItemDescriptor>,
    head: usize,
    tail: usize,
    cursor: usize,
}

impl HistoryBuffer {
    /// Build a buffer from the startup scan. Capacity is fixed at
    /// `min(items.len(), max_retention)`; excess items are dropped from the
    /// end of the scan order. After construction the cursor sits on the first
    /// item, `tail` on slot 0, and `head` on the last slot.
    ///
    /// # Errors
    /// Returns [`Error::EmptyScan`] if `items` is empty.
    pub fn from_items(
        mut items: Vec<ItemDescriptor>,
        max_retention: usize,
    ) -> Result<Self, Error> {
        if items.is_empty() || max_retention == 0 {
            return Err(Error::EmptyScan);
        }
        items.truncate(max_retention);
        let head = items.len() - 1;
        Ok(Self {
            slots: items,
            head,
            tail: 0,
            cursor: 0,
        })
    }

    /// Number of slots (equals capacity after the bulk load).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Advance the cursor one slot and return the item there.
    ///
    /// Wraps from the last slot back to absolute slot 0, not to `tail`; this
    /// mirrors the behavior the loop has always shown. The two coincide until
    /// appends evict items and move `tail` off slot 0. (Wrapping to
    /// `self.tail` instead would visit only live history.)
    pub fn next(&mut self) -> &ItemDescriptor {
        let mut curr = self.cursor + 1;
        if curr >= self.slots.len() {
            curr = 0;
        }
        self.cursor = curr;
        &self.slots[curr]
    }

    /// Step the cursor back one slot and return the item there. At the oldest
    /// retained item (`cursor == tail`) this saturates: the same item is
    /// returned again and the cursor does not move.
    pub fn prev(&mut self) -> &ItemDescriptor {
        if self.cursor != self.tail {
            self.cursor = match self.cursor.checked_sub(1) {
                Some(c) => c,
                None => self.slots.len() - 1,
            };
        }
        &self.slots[self.cursor]
    }

    /// The item under the cursor, without moving it.
    #[must_use]
    pub fn current(&self) -> &ItemDescriptor {
        &self.slots[self.cursor]
    }

    /// Write `item` at `head` and advance it; on collision the oldest item is
    /// evicted by advancing `tail`. Used for incremental discovery after the
    /// bulk load.
    pub fn append(&mut self, item: ItemDescriptor) {
        self.slots[self.head] = item;
        self.head += 1;
        if self.head >= self.slots.len() {
            self.head = 0;
        }
        if self.head == self.tail {
            self.tail += 1;
            if self.tail >= self.slots.len() {
                self.tail = 0;
            }
        }
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn head(&self) -> usize {
        self.head
    }

    #[must_use]
    pub fn tail(&self) -> usize {
        self.tail
    }
}
