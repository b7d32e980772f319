use crate::path::PathStep;

/// What kind of operation produced a change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A property write through a view.
    Write,
    /// An in-place mutator call that altered its target.
    Mutate,
    /// An explicit reset re-derived the snapshot.
    Reset,
    /// The caller supplied a new original.
    OriginalChange,
}

/// Notification delivered to subscribers on every effective mutation.
///
/// Delivery is synchronous and at-least-once; nothing is coalesced beyond
/// the same-value write no-op. The embedding decides when to re-render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeNotice {
    /// Path of the written property or mutated container; empty for
    /// whole-model transitions (reset, original change).
    pub path: Vec<PathStep>,
    pub origin: ChangeOrigin,
}
