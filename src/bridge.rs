//! The translation loop: one record in, at most one MIDI event out,
//! strictly sequential.

use tracing::info;

use crate::events::{Action, RawEvent};
use crate::mapping;
use crate::midi::MidiError;
use crate::pedal::Pedal;

/// Blocking source of decoded records. `None` ends the loop cleanly.
pub trait EventSource {
    fn next_event(&mut self) -> Option<RawEvent>;
}

/// Destination for translated events. A failed send is fatal.
pub trait EventSink {
    fn send(&mut self, action: &Action) -> Result<(), MidiError>;
}

/// Run until the source ends or the sink fails. No buffering, no
/// retries; records without a mapped meaning are dropped here.
pub fn run<S, K>(source: &mut S, sink: &mut K, pedal: &mut Pedal) -> Result<(), MidiError>
where
    S: EventSource,
    K: EventSink,
{
    while let Some(event) = source.next_event() {
        if let Some(action) = mapping::classify(event, pedal) {
            sink.send(&action)?;
        }
    }
    info!("input stream ended, shutting down");
    Ok(())
}
