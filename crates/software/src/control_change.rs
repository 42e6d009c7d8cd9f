//! Routing of Control Change messages by controller number.
//!
//! Controller numbers 120-127 are reserved for Channel Mode messages, which carry device-mode directives rather than
//! controller values. When [`MessageGroup::ChannelMode`] is enabled these are dispatched to their own categories;
//! otherwise every Control Change goes to the generic handler.

use crate::message::{Category, MessageGroup};

/// The first controller number reserved for Channel Mode messages.
pub const CHANNEL_MODE_FIRST: u8 = 120;

/// Channel Mode categories, indexed by controller number minus [`CHANNEL_MODE_FIRST`].
const CHANNEL_MODE: [Category; 8] = [
    Category::AllSoundOff,
    Category::ResetAllControllers,
    Category::LocalControl,
    Category::AllNotesOff,
    Category::OmniModeOff,
    Category::OmniModeOn,
    Category::MonoModeOn,
    Category::PolyModeOn,
];

/// Selects the category of a Control Change message given its controller number (the first data byte).
pub fn route(controller: u8, groups: MessageGroup) -> Category {
    if !groups.contains(MessageGroup::ChannelMode) {
        return Category::ControlChange;
    }

    controller
        .checked_sub(CHANNEL_MODE_FIRST)
        .and_then(|offset| CHANNEL_MODE.get(offset as usize))
        .copied()
        .unwrap_or(Category::ControlChange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinary_controllers_are_generic() {
        for controller in [0, 7, 64, 119] {
            assert_eq!(
                Category::ControlChange,
                route(controller, MessageGroup::ChannelMode),
                "Controller {controller} should route to the generic handler"
            );
        }
    }

    #[test]
    fn reserved_controllers_route_to_channel_mode() {
        assert_eq!(Category::AllSoundOff, route(120, MessageGroup::ChannelMode));
        assert_eq!(Category::AllNotesOff, route(123, MessageGroup::ChannelMode));
        assert_eq!(Category::PolyModeOn, route(127, MessageGroup::ChannelMode));
    }

    #[test]
    fn out_of_range_controller_is_generic() {
        // data bytes never exceed 127, but the router must not index past its table if one does
        assert_eq!(Category::ControlChange, route(200, MessageGroup::ChannelMode));
    }

    #[test]
    fn disabled_channel_mode_is_always_generic() {
        let groups = MessageGroup::SystemCommon | MessageGroup::SystemRealTime;
        for controller in [7, 120, 123, 127] {
            assert_eq!(Category::ControlChange, route(controller, groups));
        }
    }
}
