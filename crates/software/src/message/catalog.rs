//! Static classification tables for status bytes.
//!
//! Both tables are indexed by a dense status code rather than the status byte itself: the seven Channel Voice high
//! nibbles (`0x8_`-`0xE_`) occupy indices 0-6 and the sixteen System Common/Real-Time low nibbles (`0xF0`-`0xFF`)
//! occupy indices 7-22.

use super::{Category, MessageGroup};

/// Number of entries in the dense tables.
const DENSE_LEN: usize = 23;

/// Payload bytes that follow each status byte. Reserved status bytes have no payload.
const PAYLOAD_LEN: [u8; DENSE_LEN] = [
    // Channel Voice
    2, 2, 2, 2, 1, 1, 2, //
    // System Common: 0xF0-0xF7
    1, 1, 2, 1, 0, 0, 0, 0, //
    // System Real-Time: 0xF8-0xFF
    0, 0, 0, 0, 0, 0, 0, 0,
];

/// Category for each dense index; `None` marks a reserved or undefined status byte.
const CATEGORY: [Option<Category>; DENSE_LEN] = [
    Some(Category::NoteOff),
    Some(Category::NoteOn),
    Some(Category::PolyphonicKeyPressure),
    Some(Category::ControlChange),
    Some(Category::ProgramChange),
    Some(Category::ChannelPressure),
    Some(Category::PitchWheelChange),
    Some(Category::SystemExclusive),
    Some(Category::TimeCodeQuarterFrame),
    Some(Category::SongPositionPointer),
    Some(Category::SongSelect),
    None, // 0xF4
    None, // 0xF5
    Some(Category::TuneRequest),
    Some(Category::EndOfExclusive),
    Some(Category::TimingClock),
    None, // 0xF9
    Some(Category::Start),
    Some(Category::Continue),
    Some(Category::Stop),
    None, // 0xFD
    Some(Category::ActiveSensing),
    Some(Category::Reset),
];

/// Determines whether a byte is a status byte (high bit set) rather than a data byte.
pub const fn is_status(byte: u8) -> bool {
    byte & 0x80 != 0
}

/// Determines whether a status byte is a Channel Voice status (`0x80`-`0xEF`), i.e., one that carries a channel.
pub const fn is_channel_voice(status: u8) -> bool {
    is_status(status) && status < 0xF0
}

/// Determines whether a status byte is a System Real-Time status (`0xF8`-`0xFF`).
///
/// Real-time messages never carry payload and may arrive between any two bytes of another message.
pub const fn is_real_time(status: u8) -> bool {
    status >= 0xF8
}

/// Compacts a status byte into an index into the dense tables.
///
/// Only meaningful for status bytes; returns `None` for data bytes.
pub const fn dense_index(status: u8) -> Option<usize> {
    if !is_status(status) {
        None
    } else if status < 0xF0 {
        Some(((status >> 4) - 0x08) as usize)
    } else {
        Some(((status & 0x0F) + 0x07) as usize)
    }
}

/// Returns the number of payload bytes expected after the given status byte.
///
/// This accounts for every status byte regardless of which [`MessageGroup`]s are enabled, which is what keeps the
/// stream synchronized when a group is disabled.
pub const fn payload_len(status: u8) -> u8 {
    match dense_index(status) {
        Some(index) => PAYLOAD_LEN[index],
        None => 0,
    }
}

/// Classifies a status byte.
///
/// Returns `None` for data bytes, for reserved status bytes, and for categories whose group is not enabled. Control
/// Change messages are reported as [`Category::ControlChange`]; see [`crate::control_change`] for Channel Mode routing.
pub fn category(status: u8, groups: MessageGroup) -> Option<Category> {
    dense_index(status)
        .and_then(|index| CATEGORY[index])
        .filter(|category| category.is_enabled(groups))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> MessageGroup {
        MessageGroup::ChannelMode | MessageGroup::SystemCommon | MessageGroup::SystemRealTime
    }

    #[test]
    fn dense_index_compacts_status_bytes() {
        assert_eq!(Some(0), dense_index(0x80));
        assert_eq!(Some(0), dense_index(0x8F));
        assert_eq!(Some(6), dense_index(0xE3));
        assert_eq!(Some(7), dense_index(0xF0));
        assert_eq!(Some(22), dense_index(0xFF));
        assert_eq!(None, dense_index(0x7F), "Data bytes have no dense index");
    }

    #[test]
    fn payload_lengths() {
        let expected = [
            (0x80, 2),
            (0x91, 2),
            (0xA2, 2),
            (0xB3, 2),
            (0xC4, 1),
            (0xD5, 1),
            (0xE6, 2),
            (0xF0, 1),
            (0xF1, 1),
            (0xF2, 2),
            (0xF3, 1),
            (0xF4, 0),
            (0xF6, 0),
            (0xF7, 0),
            (0xF8, 0),
            (0xFF, 0),
        ];
        for (status, len) in expected {
            assert_eq!(
                len,
                payload_len(status),
                "Unexpected payload length for {status:#x}; expected left but got right"
            );
        }
    }

    #[test]
    fn channel_voice_categories_ignore_channel_nibble() {
        assert_eq!(Some(Category::NoteOn), category(0x90, all()));
        assert_eq!(Some(Category::NoteOn), category(0x9F, all()));
        assert_eq!(Some(Category::PitchWheelChange), category(0xE7, all()));
    }

    #[test]
    fn reserved_status_bytes_are_unclassified() {
        for status in [0xF4, 0xF5, 0xF9, 0xFD] {
            assert_eq!(None, category(status, all()), "{status:#x} should be unclassified");
        }
    }

    #[test]
    fn disabled_groups_are_unclassified_but_still_counted() {
        let groups = MessageGroup::ChannelMode;
        assert_eq!(None, category(0xF2, groups));
        assert_eq!(2, payload_len(0xF2));
        assert_eq!(None, category(0xF8, groups));
        assert_eq!(Some(Category::ControlChange), category(0xB0, groups));
    }

    #[test]
    fn status_predicates() {
        assert!(is_status(0x80));
        assert!(!is_status(0x7F));
        assert!(is_channel_voice(0xEF));
        assert!(!is_channel_voice(0xF0));
        assert!(!is_channel_voice(0x40));
        assert!(is_real_time(0xF8));
        assert!(!is_real_time(0xF7));
    }
}
