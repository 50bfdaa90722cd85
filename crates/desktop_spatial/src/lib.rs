pub mod clamp;
pub mod geometry;
pub mod model;
pub mod reducer;
pub mod resolver;
pub mod store;

pub use clamp::{clamp_point, forbidden_zones, resolve_position, MAX_PUSH_ATTEMPTS};
pub use geometry::{clamp, overlap_ratio, DesktopOffset, Point, Rect};
pub use model::*;
pub use reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect};
pub use resolver::{resolve_drop, DropContext, DropOutcome, FolderTarget};
pub use store::ItemStore;
