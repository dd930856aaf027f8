//! Domain models for the farm planner

mod crop;
mod harvest;
mod planting;
mod plot;
mod selling;
mod signals;
mod snapshot;
mod suggestion;

pub use crop::*;
pub use harvest::*;
pub use planting::*;
pub use plot::*;
pub use selling::*;
pub use signals::*;
pub use snapshot::*;
pub use suggestion::*;
