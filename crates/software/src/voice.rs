//! A monophonic voice driven by received MIDI messages, and the conversion of its state into control voltage.
//!
//! This is the layer that consumes what the [`Receiver`](crate::receiver::Receiver) dispatches: handlers built by
//! [`MonoVoice::handlers()`] update the voice, and the firmware expresses the voice as CV/gate signals.

mod control_voltage;
pub use control_voltage::*;

use crate::{
    handlers::Handlers,
    message::{Category, Message},
};
use measurements::Voltage;
use wmidi::{MidiMessage, Note, U7, Velocity};

/// The note the voice is tuned to before any message is received.
pub const DEFAULT_NOTE: Note = Note::C3;

/// State of the gate signal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GateState {
    /// When the gate is high, the instrument will sound.
    High,
    /// When the gate is low, the instrument will rest.
    Low,
}

/// A single voice which sounds the most recently struck note.
///
/// Releasing any note other than the one sounding is ignored, so the gate only closes once the sounding note is
/// released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonoVoice {
    note: Note,
    velocity: Velocity,
    gate: GateState,
}

impl Default for MonoVoice {
    fn default() -> Self {
        Self {
            note: DEFAULT_NOTE,
            velocity: U7::from_u8_lossy(0),
            gate: GateState::Low,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MonoVoice {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "MonoVoice {{ note: {}, velocity: {}, gate: {} }}",
            self.note.to_str(),
            u8::from(self.velocity),
            self.gate
        );
    }
}

impl MonoVoice {
    /// Returns a handler table which drives a [`MonoVoice`] from Note On, Note Off, All Notes Off, and All Sound Off
    /// messages.
    pub fn handlers() -> Handlers<Self> {
        Handlers::new()
            .with(Category::NoteOn, Self::receive)
            .with(Category::NoteOff, Self::receive)
            .with(Category::AllNotesOff, |voice, _| voice.release())
            .with(Category::AllSoundOff, |voice, _| voice.release())
    }

    /// Updates the voice given a Note On or Note Off message; other messages are ignored.
    pub fn receive(&mut self, message: &Message) {
        match message.to_midi_message() {
            Some(MidiMessage::NoteOn(_, note, velocity)) if u8::from(velocity) > 0 => {
                info!(
                    "Note {} on, velocity: {}",
                    note.to_str(),
                    u8::from(velocity)
                );
                self.note = note;
                self.velocity = velocity;
                self.gate = GateState::High;
            }
            // a Note On without velocity is a Note Off
            Some(MidiMessage::NoteOn(_, note, _) | MidiMessage::NoteOff(_, note, _)) => {
                if note == self.note {
                    info!("Note {} off", note.to_str());
                    self.gate = GateState::Low;
                }
            }
            _ => {}
        }
    }

    /// Closes the gate regardless of which note is sounding.
    pub fn release(&mut self) {
        info!("All notes off");
        self.gate = GateState::Low;
    }

    /// Returns the note the voice is tuned to. The note is retained after the gate closes.
    pub fn note(&self) -> Note {
        self.note
    }

    /// Returns the velocity of the most recent note.
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Returns the state the gate is in.
    pub fn gate_state(&self) -> GateState {
        self.gate
    }

    /// Convenience function to test whether gate is currently high.
    pub fn gate_is_high(&self) -> bool {
        self.gate == GateState::High
    }

    /// Returns the control voltage for the voice's note.
    pub fn control_voltage(&self) -> Voltage {
        note_to_voltage(self.note)
    }
}
