use crate::message::is_channel_voice;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;
use wmidi::Channel;

/// The channel on which Channel Voice messages are received.
///
/// The discriminants match the conventional numbering: 0 is omni mode, 1-16 are the MIDI channels. Use
/// [`FromPrimitive::from_u8`] to build one from that number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ToPrimitive, FromPrimitive)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum ReceiveChannel {
    /// Receive Channel Voice messages on every channel.
    #[default]
    Omni,
    Ch1,
    Ch2,
    Ch3,
    Ch4,
    Ch5,
    Ch6,
    Ch7,
    Ch8,
    Ch9,
    Ch10,
    Ch11,
    Ch12,
    Ch13,
    Ch14,
    Ch15,
    Ch16,
}
impl super::CycleConfig for ReceiveChannel {}

impl ReceiveChannel {
    /// Returns 0 for omni mode, otherwise the channel number (1-16).
    pub fn number(self) -> u8 {
        self as u8
    }

    /// Returns the specific [`Channel`] received on, or `None` in omni mode.
    pub fn channel(self) -> Option<Channel> {
        match self {
            Self::Omni => None,
            _ => Channel::from_index(self.number() - 1).ok(),
        }
    }

    /// Decides whether a message with the given status byte should be dispatched.
    ///
    /// Only Channel Voice messages are filtered; System Common and System Real-Time messages are always admitted.
    pub fn admits(self, status: u8) -> bool {
        match self {
            Self::Omni => true,
            _ if !is_channel_voice(status) => true,
            _ => (status & 0x0F) + 1 == self.number(),
        }
    }
}

impl From<Channel> for ReceiveChannel {
    fn from(channel: Channel) -> Self {
        Self::from_u8(channel.number()).expect("every MIDI channel should have a receive channel")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::CycleConfig;

    #[test]
    fn from_number() {
        assert_eq!(Some(ReceiveChannel::Omni), ReceiveChannel::from_u8(0));
        assert_eq!(Some(ReceiveChannel::Ch1), ReceiveChannel::from_u8(1));
        assert_eq!(Some(ReceiveChannel::Ch16), ReceiveChannel::from_u8(16));
        assert_eq!(None, ReceiveChannel::from_u8(17), "Channel numbers stop at 16");
    }

    #[test]
    fn from_channel() {
        assert_eq!(ReceiveChannel::Ch5, ReceiveChannel::from(Channel::Ch5));
        assert_eq!(Some(Channel::Ch5), ReceiveChannel::Ch5.channel());
        assert_eq!(None, ReceiveChannel::Omni.channel());
    }

    #[test]
    fn omni_admits_every_channel() {
        for status in 0x90..=0x9F {
            assert!(ReceiveChannel::Omni.admits(status), "{status:#x} should be admitted");
        }
    }

    #[test]
    fn specific_channel_admits_only_itself() {
        assert!(ReceiveChannel::Ch5.admits(0x94));
        assert!(!ReceiveChannel::Ch5.admits(0x92));
        assert!(ReceiveChannel::Ch16.admits(0xEF));
        assert!(!ReceiveChannel::Ch1.admits(0xEF));
    }

    #[test]
    fn system_messages_are_always_admitted() {
        for status in [0xF0, 0xF2, 0xF6, 0xF8, 0xFE, 0xFF] {
            assert!(ReceiveChannel::Ch5.admits(status), "{status:#x} should be admitted");
        }
    }

    #[test]
    fn cycle_wraps_after_last_channel() {
        assert_eq!(ReceiveChannel::Ch1, ReceiveChannel::Omni.cycle());
        assert_eq!(ReceiveChannel::Omni, ReceiveChannel::Ch16.cycle());
    }
}
