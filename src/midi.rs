//! ALSA sequencer output: client/port registration and fire-and-forget
//! event dispatch.

use std::ffi::CString;

use alsa::seq::{self, EvCtrl, EvNote, EventType, PortCap, PortInfo, PortType, Seq};
use thiserror::Error;
use tracing::trace;

use crate::bridge::EventSink;
use crate::events::Action;

pub const CLIENT_NAME: &str = "RigKontrol3";
pub const PORT_NAME: &str = "Events";

/// Everything leaves on this channel.
pub const CHANNEL: u8 = 15;

const NOTE_ON_VELOCITY: u8 = 127;
const NOTE_OFF_VELOCITY: u8 = 64;

#[derive(Debug, Error)]
pub enum MidiError {
    #[error("ALSA error: {0}")]
    Alsa(#[from] alsa::Error),
}

/// Sequencer handle plus the one readable port other clients subscribe
/// to. Registered once before the translation loop; the handle closes on
/// drop.
pub struct MidiOut {
    seq: Seq,
    port: i32,
}

impl MidiOut {
    pub fn open() -> Result<Self, MidiError> {
        let seq = Seq::open(None, None, false)?;
        let name = CString::new(CLIENT_NAME).expect("client name has no NUL");
        seq.set_client_name(&name)?;

        let port_name = CString::new(PORT_NAME).expect("port name has no NUL");
        let mut info = PortInfo::empty()?;
        info.set_name(&port_name);
        info.set_capability(PortCap::READ | PortCap::SUBS_READ);
        info.set_type(PortType::MIDI_GENERIC | PortType::SOFTWARE);
        seq.create_port(&info)?;

        Ok(MidiOut {
            seq,
            port: info.get_port(),
        })
    }

    /// Build and dispatch one event to all subscribers. Direct output:
    /// no queue, no acknowledgment, a failure here ends the process.
    pub fn send(&self, action: &Action) -> Result<(), MidiError> {
        let mut ev = event_for(action);
        ev.set_source(self.port);
        ev.set_subs();
        ev.set_direct();
        trace!(?action, "midi out");
        self.seq.event_output_direct(&mut ev)?;
        Ok(())
    }
}

impl EventSink for MidiOut {
    fn send(&mut self, action: &Action) -> Result<(), MidiError> {
        MidiOut::send(self, action)
    }
}

fn event_for(action: &Action) -> seq::Event<'static> {
    match *action {
        Action::Note { note, on: true } => seq::Event::new(
            EventType::Noteon,
            &EvNote {
                channel: CHANNEL,
                note,
                velocity: NOTE_ON_VELOCITY,
                off_velocity: 0,
                duration: 0,
            },
        ),
        Action::Note { note, on: false } => seq::Event::new(
            EventType::Noteoff,
            &EvNote {
                channel: CHANNEL,
                note,
                velocity: NOTE_OFF_VELOCITY,
                off_velocity: 0,
                duration: 0,
            },
        ),
        Action::Control { controller, value } => seq::Event::new(
            EventType::Controller,
            &EvCtrl {
                channel: CHANNEL,
                param: u32::from(controller),
                value,
            },
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_on_carries_full_velocity() {
        let ev = event_for(&Action::Note { note: 5, on: true });
        assert_eq!(ev.get_type(), EventType::Noteon);
        let data: EvNote = ev.get_data().expect("note event holds note data");
        assert_eq!(data.channel, CHANNEL);
        assert_eq!(data.note, 5);
        assert_eq!(data.velocity, NOTE_ON_VELOCITY);
    }

    #[test]
    fn note_off_carries_release_velocity() {
        let ev = event_for(&Action::Note { note: 9, on: false });
        assert_eq!(ev.get_type(), EventType::Noteoff);
        let data: EvNote = ev.get_data().expect("note event holds note data");
        assert_eq!(data.note, 9);
        assert_eq!(data.velocity, NOTE_OFF_VELOCITY);
    }

    #[test]
    fn control_change_carries_controller_and_value() {
        let ev = event_for(&Action::Control {
            controller: 11,
            value: 63,
        });
        assert_eq!(ev.get_type(), EventType::Controller);
        let data: EvCtrl = ev.get_data().expect("controller event holds ctrl data");
        assert_eq!(data.channel, CHANNEL);
        assert_eq!(data.param, 11);
        assert_eq!(data.value, 63);
    }
}
