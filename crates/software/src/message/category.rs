//! The closed set of message categories a [`Receiver`](crate::receiver::Receiver) can dispatch, and the optional
//! groups they belong to.

use bitmask_enum::bitmask;
use num_derive::{FromPrimitive, ToPrimitive};

/// Optional groups of message categories, each of which may be independently enabled or disabled.
///
/// Channel Voice messages are not represented here because they are always received. Disabling a group only removes
/// its dispatch path: the payload bytes of its messages are still counted so the stream stays synchronized.
#[bitmask(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageGroup {
    /// The reserved Control Change controller numbers 120-127, e.g. All Notes Off.
    ChannelMode,
    /// Non-channel messages such as Song Select or Tune Request (status bytes `0xF0`-`0xF7`).
    SystemCommon,
    /// Single-byte timing and transport messages which may interleave with any other message (`0xF8`-`0xFF`).
    SystemRealTime,
}

/// Every category of message that may be handed to a handler.
///
/// Variant order is significant: it is the slot index used by [`Handlers`](crate::handlers::Handlers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, ToPrimitive, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Category {
    // Channel Voice
    NoteOff,
    NoteOn,
    PolyphonicKeyPressure,
    ControlChange,
    ProgramChange,
    ChannelPressure,
    PitchWheelChange,
    // Channel Mode
    AllSoundOff,
    ResetAllControllers,
    LocalControl,
    AllNotesOff,
    OmniModeOff,
    OmniModeOn,
    MonoModeOn,
    PolyModeOn,
    // System Common
    SystemExclusive,
    TimeCodeQuarterFrame,
    SongPositionPointer,
    SongSelect,
    TuneRequest,
    EndOfExclusive,
    // System Real-Time
    TimingClock,
    Start,
    Continue,
    Stop,
    ActiveSensing,
    Reset,
}

impl Category {
    /// The number of categories, i.e., the number of slots in a handler table.
    pub const COUNT: usize = Category::Reset as usize + 1;

    /// Returns the optional group this category belongs to, or `None` for the always-enabled Channel Voice messages.
    pub const fn group(self) -> Option<MessageGroup> {
        match self {
            Self::NoteOff
            | Self::NoteOn
            | Self::PolyphonicKeyPressure
            | Self::ControlChange
            | Self::ProgramChange
            | Self::ChannelPressure
            | Self::PitchWheelChange => None,
            Self::AllSoundOff
            | Self::ResetAllControllers
            | Self::LocalControl
            | Self::AllNotesOff
            | Self::OmniModeOff
            | Self::OmniModeOn
            | Self::MonoModeOn
            | Self::PolyModeOn => Some(MessageGroup::ChannelMode),
            Self::SystemExclusive
            | Self::TimeCodeQuarterFrame
            | Self::SongPositionPointer
            | Self::SongSelect
            | Self::TuneRequest
            | Self::EndOfExclusive => Some(MessageGroup::SystemCommon),
            Self::TimingClock
            | Self::Start
            | Self::Continue
            | Self::Stop
            | Self::ActiveSensing
            | Self::Reset => Some(MessageGroup::SystemRealTime),
        }
    }

    /// Determines whether this category is dispatched given the enabled groups.
    pub fn is_enabled(self, groups: MessageGroup) -> bool {
        self.group().is_none_or(|group| groups.contains(group))
    }
}
