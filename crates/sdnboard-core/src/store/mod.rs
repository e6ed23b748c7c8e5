// ── Resource store ──
//
// Snapshot slots for the three resource kinds plus the shared and
// per-resource sync status, all published through `watch` channels.

mod refresh;
mod resource_store;
mod tracker;

pub use resource_store::ResourceStore;
