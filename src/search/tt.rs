use crate::board::{Board, Color, Coord};
use crate::search::zobrist;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

/// Exact identity of a search node: board contents, side to move, remaining depth, perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Key {
    pub dark: u64,
    pub light: u64,
    pub to_move: Color,
    pub depth: u32,
    pub maximizing: bool,
}

impl Key {
    pub fn new(board: &Board, to_move: Color, depth: u32, maximizing: bool) -> Self {
        let (dark, light) = board.masks();
        Self { dark, light, to_move, depth, maximizing }
    }

    fn hash(&self) -> u64 {
        let position = zobrist::from_masks((self.dark, self.light), self.to_move);
        zobrist::with_search_context(position, self.depth, self.maximizing)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub key: Key,
    pub score: i32,
    pub best: Option<Coord>,
    pub bound: Bound,
    pub gen: u32,
}

const DEFAULT_WAYS: usize = 4;

#[derive(Default, Clone, Copy)]
struct Slot(Option<Entry>);

#[derive(Default)]
struct Bucket {
    slots: [Slot; DEFAULT_WAYS],
}

/// Bucketed, capacity-bounded transposition cache. Safe to share between root-split workers.
#[derive(Default)]
pub struct Tt {
    buckets: Vec<Mutex<Bucket>>,
    gen: AtomicU32,
}

impl Tt {
    pub fn new() -> Self { Self { buckets: Vec::new(), gen: AtomicU32::new(0) } }

    pub fn with_capacity(entries: usize) -> Self {
        let mut tt = Self::new();
        tt.set_capacity_entries(entries);
        tt
    }

    pub fn clear(&self) {
        for b in &self.buckets { *b.lock() = Bucket::default(); }
    }

    fn bucket_index(&self, hash: u64) -> usize {
        let mixed = hash ^ (hash >> 32);
        (mixed as usize) % self.buckets.len().max(1)
    }

    pub fn get(&self, key: &Key) -> Option<Entry> {
        if self.buckets.is_empty() { return None; }
        let idx = self.bucket_index(key.hash());
        let g = self.buckets[idx].lock();
        g.slots.iter().filter_map(|s| s.0).find(|e| e.key == *key)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(|b| b.lock().slots.iter().filter(|s| s.0.is_some()).count()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn capacity(&self) -> usize { self.buckets.len() * DEFAULT_WAYS }

    pub fn set_capacity_entries(&mut self, cap: usize) {
        let entries = cap.max(DEFAULT_WAYS);
        let buckets = (entries + DEFAULT_WAYS - 1) / DEFAULT_WAYS;
        self.buckets.clear();
        self.buckets.resize_with(buckets, || Mutex::new(Bucket::default()));
    }

    pub fn put(&self, e: Entry) {
        if self.buckets.is_empty() { return; }
        let idx = self.bucket_index(e.key.hash());
        let mut g = self.buckets[idx].lock();
        let mut e = e;
        e.gen = self.gen.load(Ordering::Relaxed);
        // Same node: newer result wins
        for slot in &mut g.slots {
            if let Some(cur) = slot.0 { if cur.key == e.key { slot.0 = Some(e); return; } }
        }
        // Empty slot first
        for slot in &mut g.slots { if slot.0.is_none() { slot.0 = Some(e); return; } }
        // Replace lowest depth, then oldest generation
        let mut victim = 0usize;
        let mut best_key = (u32::MAX, u32::MAX);
        for (i, slot) in g.slots.iter().enumerate() {
            if let Some(cur) = slot.0 {
                let k = (cur.key.depth, cur.gen);
                if k < best_key { best_key = k; victim = i; }
            }
        }
        g.slots[victim].0 = Some(e);
    }

    pub fn bump_generation(&self) { self.gen.fetch_add(1, Ordering::Relaxed); }
}
