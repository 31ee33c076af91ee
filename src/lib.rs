pub mod bounds;
pub mod compiler;
pub mod constants;
pub mod core_locator;
pub mod layout;
pub mod location;
pub mod pathing;
pub mod perimeter;
pub mod placement;
pub mod planner;
pub mod room_data;
pub mod source_guard;
pub mod store;
pub mod terrain;

#[cfg(feature = "screeps")]
pub mod game;

pub mod visual;
pub use visual::*;

pub use planner::*;
