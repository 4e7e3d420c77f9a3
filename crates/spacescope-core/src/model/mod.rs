/// Data model for SpaceScope.
///
/// Plain value types exchanged between the engine, the controller and the
/// frontends. A refresh always produces new values; nothing here is mutated
/// in place after construction.
pub mod drive;
pub mod entry;
pub mod listing;
pub mod size;

pub use drive::DriveDescriptor;
pub use entry::{Entry, EntryKind};
pub use listing::{Listing, SortColumn, SortOrder};
