/// Multi-selection over the entries of one listing.
use crate::model::{Entry, Listing};
use std::collections::HashSet;

/// What the header checkbox shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    None,
    Partial,
    All,
}

/// Selected entry ids, tied to the listing generation they were picked from.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    ids: HashSet<String>,
    generation: u64,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `id`.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Select every entry of `listing`, or clear if all are already selected.
    pub fn select_all(&mut self, listing: &Listing) {
        if !listing.is_empty() && self.is_full(listing) {
            self.ids.clear();
        } else {
            self.ids = listing.iter().map(|e| e.id.clone()).collect();
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Bind to the listing generation `generation`, dropping everything
    /// picked from a different one.
    pub fn rebind(&mut self, generation: u64) {
        if self.generation != generation {
            self.ids.clear();
            self.generation = generation;
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn is_full(&self, listing: &Listing) -> bool {
        self.ids.len() == listing.len() && listing.iter().all(|e| self.ids.contains(&e.id))
    }

    pub fn header_state(&self, listing: &Listing) -> HeaderState {
        if self.ids.is_empty() || listing.is_empty() {
            HeaderState::None
        } else if self.is_full(listing) {
            HeaderState::All
        } else {
            HeaderState::Partial
        }
    }

    /// The selected entries of `listing`, in listing order.
    pub fn entries<'a>(&self, listing: &'a Listing) -> Vec<&'a Entry> {
        listing.iter().filter(|e| self.ids.contains(&e.id)).collect()
    }
}
