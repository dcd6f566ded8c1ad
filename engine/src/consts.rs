//! Engine-wide constants and the monomorphization marker traits search uses to compile separate
//! PV/non-PV and in-check/not-in-check code paths instead of branching on a runtime flag.

pub const MAX_PLY: u16 = 126;
pub const THREAD_STACK_SIZE: usize = MAX_PLY as usize + 7;
pub const MAX_THREADS: usize = 256;

pub const DEFAULT_TT_SIZE_MB: usize = 256;

pub const PAWN_TABLE_SIZE: usize = 16384;
pub const MATERIAL_TABLE_SIZE: usize = 8192;

/// Distinguishes principal-variation nodes (the line the search believes is best, searched with
/// a full alpha-beta window) from the narrow-window nodes used to refute the rest of the tree.
pub trait PVNode {
    fn is_pv() -> bool;
}

pub struct PV;
pub struct NonPV;

impl PVNode for PV {
    fn is_pv() -> bool {
        true
    }
}

impl PVNode for NonPV {
    fn is_pv() -> bool {
        false
    }
}

/// Whether the side to move is in check at the current node, which disables null-move pruning
/// and futility pruning for that node.
pub trait CheckState {
    fn in_check() -> bool;
}

pub struct InCheck;
pub struct NoCheck;

impl CheckState for InCheck {
    fn in_check() -> bool {
        true
    }
}

impl CheckState for NoCheck {
    fn in_check() -> bool {
        false
    }
}
