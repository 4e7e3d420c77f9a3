/// Analysis modules -- derived views computed from the current listing.
pub mod distribution;

pub use distribution::{distribution, slice_at_angle, PieSlice, SliceSource, PALETTE};
