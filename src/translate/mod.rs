pub mod gateway;
pub mod structures;
pub mod types;

pub use gateway::*;
pub use structures::*;
pub use types::*;
