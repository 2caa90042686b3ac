//! Domain layer for Scout.
//!
//! Holds the player model and catalog, the shared analysis memory, per-session
//! state, and the text-generation seam that the application layer drives.

pub mod config;
pub mod error;
pub mod generation;
pub mod memory;
pub mod player;
pub mod secret;
pub mod session;

pub use error::{Result, ScoutError};
pub use generation::{GenerationError, TextGenerator};
pub use memory::{SharedMemory, SharedMemoryHandle};
pub use player::{PlayerCatalog, PlayerRecord};
pub use session::SessionState;
