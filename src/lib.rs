pub mod bridge;
pub mod daemon;
pub mod device;
pub mod events;
pub mod mapping;
pub mod midi;
pub mod pedal;

pub use bridge::{run, EventSink, EventSource};
pub use device::InputDevice;
pub use events::{Action, Category, RawEvent};
pub use midi::MidiOut;
pub use pedal::{Pedal, Resolution};
