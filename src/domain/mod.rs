//! Domain layer - dialogue rules and value objects, free of I/O.

pub mod delivery;
pub mod dialogue;
pub mod directory;
pub mod events;
pub mod foundation;
