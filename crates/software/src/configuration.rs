//! This module contains the receiver's configuration along with a trait to make user-selectable settings easier to
//! work with in code.

mod receive_channel;
pub use receive_channel::*;

use crate::message::MessageGroup;
use num_traits::{FromPrimitive, ToPrimitive};

/// A trait which allows infinite cycling of an enum's variants.
///
/// Useful for pushbutton user interfaces, allowing presses to advance from the current to the next variant,
/// cycling back to the beginning when all variants have been exhausted.
pub trait CycleConfig {
    /// Return the next variant, cycling back to the beginning as needed.
    fn cycle(self) -> Self
    where
        Self: FromPrimitive + ToPrimitive + Sized,
    {
        let index = self
            .to_u8()
            .expect("enum variants should be castable to u8");
        match <Self as FromPrimitive>::from_u8(index + 1) {
            Some(new_selection) => new_selection,
            None => FromPrimitive::from_u8(0).expect("enum should not be empty"),
        }
    }
}

/// Settings a [`Receiver`](crate::receiver::Receiver) is initialized with.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverConfig {
    /// Channel Voice messages on other channels are consumed but not dispatched.
    pub channel: ReceiveChannel,
    /// Optional message groups to dispatch. Channel Voice messages are always dispatched.
    pub groups: MessageGroup,
}

impl Default for ReceiverConfig {
    /// Omni mode, with the message groups selected by the crate's `channel-mode`, `system-common`, and
    /// `system-real-time` features.
    fn default() -> Self {
        Self {
            channel: ReceiveChannel::default(),
            groups: default_groups(),
        }
    }
}

/// Returns the message groups enabled at build time.
pub fn default_groups() -> MessageGroup {
    let mut groups = MessageGroup::none();
    if cfg!(feature = "channel-mode") {
        groups |= MessageGroup::ChannelMode;
    }
    if cfg!(feature = "system-common") {
        groups |= MessageGroup::SystemCommon;
    }
    if cfg!(feature = "system-real-time") {
        groups |= MessageGroup::SystemRealTime;
    }
    groups
}
