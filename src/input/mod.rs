//! Platform-agnostic input handling.
//!
//! Raw window events become [`InputEvent`]s, which the
//! [`InputProcessor`] turns into [`ViewerCommand`](crate::engine::command::ViewerCommand)s.
//! The engine queues commands and drains the queue once per frame tick.

pub mod event;
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::InputProcessor;
