//! Domain events, commands and the pub/sub mechanics that carry them.
//!
//! Nothing in here knows about prices or settings; the settings crate publishes
//! through these traits and the pricing crate consumes them.

pub mod bus;
pub mod command;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use command::Command;
pub use event::Event;
pub use handler::CommandHandler;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
