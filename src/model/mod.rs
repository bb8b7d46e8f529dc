pub use pasture_core::{BrainLogic, Occupancy};
pub mod brain {
    pub use pasture_core::brain::*;
}
pub mod classifier {
    pub use pasture_core::classifier::*;
}
pub mod search {
    pub use pasture_core::search::*;
}
pub mod roster {
    pub use pasture_core::roster::*;
}
pub mod lifecycle {
    pub use pasture_core::lifecycle::*;
}
pub mod history {
    pub use pasture_core::history::*;
}
pub mod systems {
    pub use pasture_core::systems::*;
}
pub mod state {
    pub use pasture_data::*;
}

pub mod config;
pub mod world;
