//! Filesystem placement operations.

mod disk;
mod helpers;
mod place;
mod util;

pub use place::{PlaceMode, place_file};
