//! Transposition table: a fixed-size hash table from Zobrist key to the best move, score, and
//! depth found for that position, shared across every Lazy-SMP search thread.
//!
//! Each slot is two plain `u64` words rather than a lock: `check = key ^ data`. A thread probing
//! a slot reads both words (without synchronizing with writers) and recomputes `check ^ data`;
//! if that doesn't reproduce the key it's looking for, the slot is either occupied by a different
//! position or was torn by a concurrent write, and either way is treated as a miss. This is the
//! same trick Stockfish's lockless hash uses in place of per-entry locking, traded here for
//! plain `Relaxed` atomics instead of a custom allocator — see `DESIGN.md`.
//!
//! The table itself is two parallel arrays of these slots, each indexed by the same key: an
//! always-replace array that every store unconditionally overwrites, and a depth-preferred array
//! that only gives up an entry to a store that is at least as deep. A probe checks the
//! depth-preferred array first (the more valuable of the two, so it should win on a hit in both)
//! and falls back to the always-replace array. This is the two-slot scheme `DESIGN.md` records
//! this table as implementing.

use std::sync::atomic::{AtomicU64, Ordering};

use chess_core::piece_move::BitMove;

/// Designates the type of node in the search tree a score was found at, needed to know whether a
/// stored score is usable as an exact value, a lower bound (fail-high, a beta cutoff), or an
/// upper bound (fail-low, nothing beat alpha).
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[repr(u8)]
pub enum NodeBound {
    NoBound = 0,
    LowerBound = 1,
    UpperBound = 2,
    Exact = 3,
}

impl NodeBound {
    fn from_bits(bits: u64) -> NodeBound {
        match bits & 0b11 {
            1 => NodeBound::LowerBound,
            2 => NodeBound::UpperBound,
            3 => NodeBound::Exact,
            _ => NodeBound::NoBound,
        }
    }
}

/// A decoded transposition table hit.
#[derive(Copy, Clone, Debug)]
pub struct TtEntry {
    pub best_move: BitMove,
    pub score: i16,
    pub eval: i16,
    pub depth: u8,
    pub bound: NodeBound,
    pub generation: u8,
}

const DEPTH_SHIFT: u32 = 48;
const GEN_SHIFT: u32 = 56;
const GEN_MASK: u64 = 0b11_1111;

fn pack(best_move: BitMove, score: i16, eval: i16, depth: u8, bound: NodeBound, generation: u8) -> u64 {
    (best_move.get_raw() as u64)
        | ((score as u16 as u64) << 16)
        | ((eval as u16 as u64) << 32)
        | ((depth as u64) << DEPTH_SHIFT)
        | ((bound as u64) << (DEPTH_SHIFT + 8))
        | (((generation as u64) & GEN_MASK) << GEN_SHIFT)
}

fn unpack(data: u64) -> TtEntry {
    TtEntry {
        best_move: BitMove::new((data & 0xFFFF) as u16),
        score: (data >> 16) as u16 as i16,
        eval: (data >> 32) as u16 as i16,
        depth: (data >> DEPTH_SHIFT) as u8,
        bound: NodeBound::from_bits(data >> (DEPTH_SHIFT + 8)),
        generation: ((data >> GEN_SHIFT) & GEN_MASK) as u8,
    }
}

struct Slot {
    check: AtomicU64,
    data: AtomicU64,
}

impl Slot {
    fn blank() -> Slot {
        Slot {
            check: AtomicU64::new(0),
            data: AtomicU64::new(0),
        }
    }

    fn load(&self, key: u64) -> Option<TtEntry> {
        let data = self.data.load(Ordering::Relaxed);
        let check = self.check.load(Ordering::Relaxed);
        if check ^ data != key {
            return None;
        }
        Some(unpack(data))
    }

    fn write(&self, key: u64, data: u64) {
        self.data.store(data, Ordering::Relaxed);
        self.check.store(key ^ data, Ordering::Relaxed);
    }
}

/// A fixed-size, lock-free hash table of two parallel slot arrays per key: `always` is
/// unconditionally overwritten on every store, `depth_preferred` only gives up its entry to a
/// store that is at least as deep (or is a fresher generation), so a shallow, frequently-revisited
/// position doesn't get evicted by one deep one-off probe.
pub struct TranspositionTable {
    always: Box<[Slot]>,
    depth_preferred: Box<[Slot]>,
    mask: u64,
    generation: AtomicU64,
}

const BYTES_PER_MB: usize = 1024 * 1024;

impl TranspositionTable {
    pub fn new(mb_size: usize) -> Self {
        let slot_bytes = std::mem::size_of::<Slot>();
        // Split the requested budget evenly between the two arrays.
        let wanted = ((mb_size.max(1)) * BYTES_PER_MB / slot_bytes / 2).max(1);
        let num_slots = wanted.next_power_of_two();
        TranspositionTable {
            always: (0..num_slots).map(|_| Slot::blank()).collect(),
            depth_preferred: (0..num_slots).map(|_| Slot::blank()).collect(),
            mask: (num_slots - 1) as u64,
            generation: AtomicU64::new(0),
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key & self.mask) as usize
    }

    pub fn num_slots(&self) -> usize {
        self.always.len() + self.depth_preferred.len()
    }

    pub fn size_megabytes(&self) -> usize {
        (self.num_slots() * std::mem::size_of::<Slot>()) / BYTES_PER_MB
    }

    /// Called once per `go` at the root: advances the generation counter so stale entries from
    /// prior searches are preferred for replacement over entries from the search in progress.
    pub fn new_search(&self) {
        self.generation.fetch_add(1, Ordering::Relaxed);
    }

    pub fn probe(&self, key: u64) -> Option<TtEntry> {
        let idx = self.index(key);
        self.depth_preferred[idx].load(key).or_else(|| self.always[idx].load(key))
    }

    /// Stores a result into both arrays: unconditionally into `always`, and into
    /// `depth_preferred` only if the new entry is as deep as (or the existing one is a stale
    /// generation, or its slot is a different, shallower position than) what's already there.
    pub fn store(&self, key: u64, best_move: BitMove, score: i16, eval: i16, depth: u8, bound: NodeBound) {
        let idx = self.index(key);
        let generation = (self.generation.load(Ordering::Relaxed) & GEN_MASK) as u8;

        let always = &self.always[idx];
        let existing_always = always.load(key);
        let keep_existing_move = existing_always
            .map(|existing| {
                existing.generation == generation
                    && existing.depth > depth.saturating_add(4)
                    && bound != NodeBound::Exact
            })
            .unwrap_or(false);
        let always_move = if keep_existing_move && best_move.is_null() {
            existing_always.unwrap().best_move
        } else {
            best_move
        };
        always.write(key, pack(always_move, score, eval, depth, bound, generation));

        let depth_preferred = &self.depth_preferred[idx];
        let existing_data = depth_preferred.data.load(Ordering::Relaxed);
        let existing = unpack(existing_data);
        let replace = depth >= existing.depth || existing.generation != generation;
        if replace {
            depth_preferred.write(key, pack(best_move, score, eval, depth, bound, generation));
        }
    }

    pub fn clear(&self) {
        for slot in self.always.iter().chain(self.depth_preferred.iter()) {
            slot.data.store(0, Ordering::Relaxed);
            slot.check.store(0, Ordering::Relaxed);
        }
        self.generation.store(0, Ordering::Relaxed);
    }

    /// Approximate fraction of slots in use, in permille (0..=1000), the form UCI's `info hashfull`
    /// reports. Sampled from the depth-preferred array, since it's the one that holds entries
    /// worth reporting occupancy for.
    pub fn hashfull(&self) -> u32 {
        let sample = self.depth_preferred.len().min(1000);
        let occupied = self.depth_preferred[..sample]
            .iter()
            .filter(|s| {
                let data = s.data.load(Ordering::Relaxed);
                let check = s.check.load(Ordering::Relaxed);
                data != 0 && check ^ data != 0
            })
            .count();
        ((occupied * 1000) / sample.max(1)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_probe_round_trips() {
        let tt = TranspositionTable::new(1);
        let key = 0xDEAD_BEEF_CAFE_F00Du64;
        let mv = BitMove::make_quiet(chess_core::SQ::E2, chess_core::SQ::E4);
        tt.store(key, mv, 125, 110, 6, NodeBound::Exact);
        let entry = tt.probe(key).expect("entry should be present");
        assert_eq!(entry.best_move, mv);
        assert_eq!(entry.score, 125);
        assert_eq!(entry.depth, 6);
        assert_eq!(entry.bound, NodeBound::Exact);
    }

    #[test]
    fn probe_miss_on_different_key() {
        let tt = TranspositionTable::new(1);
        tt.store(1, BitMove::null(), 0, 0, 1, NodeBound::Exact);
        assert!(tt.probe(2).is_none());
    }

    #[test]
    fn size_rounds_up_to_power_of_two_slots() {
        let tt = TranspositionTable::new(1);
        assert_eq!(tt.num_slots() & (tt.num_slots() - 1), 0);
    }
}
