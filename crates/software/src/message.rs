//! The value handed to handlers once a message has been fully received, along with the tables used to classify it.

mod catalog;
pub use catalog::*;

mod category;
pub use category::*;

use wmidi::{Channel, MidiMessage};

/// Capacity of the payload buffer. Every cataloged message needs at most two bytes; the third slot leaves room for a
/// three-byte SysEx manufacturer ID.
pub const BUFFER_LEN: usize = 3;

/// A fully-assembled MIDI message.
///
/// Built by the [`Receiver`](crate::receiver::Receiver) at the moment a message completes and never mutated
/// afterwards. Internally the status byte and payload are stored contiguously so the message can be reinterpreted as
/// a [`wmidi::MidiMessage`] without copying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    bytes: [u8; 1 + BUFFER_LEN],
    len: usize,
}

impl Message {
    /// Constructs a [`Message`] from a status byte and its payload. Payload beyond [`BUFFER_LEN`] bytes is ignored.
    pub fn new(status: u8, data: &[u8]) -> Self {
        let len = data.len().min(BUFFER_LEN);
        let mut bytes = [0; 1 + BUFFER_LEN];
        bytes[0] = status;
        bytes[1..=len].copy_from_slice(&data[..len]);
        Self { bytes, len }
    }

    /// Returns the raw status byte.
    pub fn status(&self) -> u8 {
        self.bytes[0]
    }

    /// Returns the channel encoded in the status byte. Only Channel Voice messages have one.
    pub fn channel(&self) -> Option<Channel> {
        if is_channel_voice(self.status()) {
            Channel::from_index(self.status() & 0x0F).ok()
        } else {
            None
        }
    }

    /// Returns the payload bytes received with this message.
    pub fn data(&self) -> &[u8] {
        &self.bytes[1..=self.len]
    }

    /// Returns the payload byte at `index`, or 0 if no byte was received in that position.
    pub fn data_byte(&self, index: usize) -> u8 {
        self.data().get(index).copied().unwrap_or_default()
    }

    /// Classifies the message, routing Control Change messages to the Channel Mode categories where appropriate.
    pub fn category(&self, groups: MessageGroup) -> Option<Category> {
        match category(self.status(), groups)? {
            Category::ControlChange => Some(crate::control_change::route(self.data_byte(0), groups)),
            category => Some(category),
        }
    }

    /// Reinterprets the message as a typed [`MidiMessage`].
    ///
    /// Returns `None` when the bytes don't form a complete message on their own, e.g., a fragment of System Exclusive.
    pub fn to_midi_message(&self) -> Option<MidiMessage<'_>> {
        MidiMessage::from_bytes(&self.bytes[..=self.len]).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wmidi::{Note, U7};

    #[test]
    fn channel_is_low_nibble_plus_one() {
        let message = Message::new(0x94, &[60, 100]);
        assert_eq!(Some(Channel::Ch5), message.channel(), "Expected left but got right");
        assert_eq!(5, message.channel().map(|c| c.number()).unwrap_or_default());
    }

    #[test]
    fn system_messages_have_no_channel() {
        assert_eq!(None, Message::new(0xF3, &[2]).channel());
        assert_eq!(None, Message::new(0xF8, &[]).channel());
    }

    #[test]
    fn data_only_exposes_received_bytes() {
        let message = Message::new(0xC0, &[42]);
        assert_eq!(&[42], message.data());
        assert_eq!(42, message.data_byte(0));
        assert_eq!(0, message.data_byte(1), "Unused slots should read as zero");
        assert_eq!(0, message.data_byte(7));
    }

    #[test]
    fn excess_payload_is_truncated() {
        let message = Message::new(0xF0, &[1, 2, 3, 4]);
        assert_eq!(&[1, 2, 3], message.data());
    }

    #[test]
    fn category_routes_channel_mode() {
        let all = MessageGroup::ChannelMode | MessageGroup::SystemCommon | MessageGroup::SystemRealTime;
        assert_eq!(
            Some(Category::AllNotesOff),
            Message::new(0xB0, &[123, 0]).category(all)
        );
        assert_eq!(
            Some(Category::ControlChange),
            Message::new(0xB0, &[123, 0]).category(MessageGroup::none())
        );
        assert_eq!(None, Message::new(0xF4, &[]).category(all));
    }

    #[test]
    fn converts_to_midi_message() {
        let message = Message::new(0x90, &[60, 100]);
        assert_eq!(
            Some(MidiMessage::NoteOn(Channel::Ch1, Note::C4, U7::from_u8_lossy(100))),
            message.to_midi_message()
        );

        let message = Message::new(0xB2, &[7, 90]);
        match message.to_midi_message() {
            Some(MidiMessage::ControlChange(channel, function, value)) => {
                assert_eq!(Channel::Ch3, channel);
                assert_eq!(7, u8::from(function));
                assert_eq!(90, u8::from(value));
            }
            other => panic!("Expected a Control Change but got {other:?}"),
        }
    }

    #[test]
    fn sysex_fragment_does_not_convert() {
        assert_eq!(None, Message::new(0xF0, &[0x41]).to_midi_message());
    }
}
