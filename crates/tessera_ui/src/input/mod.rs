//! Input system.
//!
//! The host hands in a raw [`InputSnapshot`] every tick; [`InputSystem`]
//! compares it with the previous tick and produces edge-triggered
//! [`InputEvent`]s with key-repeat timing applied.

mod keys;
mod snapshot;
mod system;

pub use keys::{GamePadButton, Key, Modifiers, MouseButton};
pub use snapshot::{GamePadSnapshot, InputSnapshot, InputSource, MouseSnapshot};
pub use system::{InputEvent, InputSystem};
