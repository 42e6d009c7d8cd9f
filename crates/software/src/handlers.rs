//! A table of optional callbacks, one slot per [`Category`].

use crate::message::{Category, Message};

/// A handler for one category of message.
///
/// Handlers receive the caller-owned context `C` (e.g., the state of a voice) along with the completed message. They
/// run synchronously while a byte is being received, so they should be short and must not block.
pub type Callback<C> = fn(&mut C, &Message);

/// Maps each [`Category`] to at most one [`Callback`]. Categories without a callback are silently ignored.
pub struct Handlers<C> {
    slots: [Option<Callback<C>>; Category::COUNT],
}

impl<C> Default for Handlers<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Clone for Handlers<C> {
    fn clone(&self) -> Self {
        Self { slots: self.slots }
    }
}

impl<C> Handlers<C> {
    /// Constructs an empty table.
    pub const fn new() -> Self {
        Self {
            slots: [None; Category::COUNT],
        }
    }

    /// Sets the callback for a category, replacing and returning any previous one.
    pub fn register(&mut self, category: Category, callback: Callback<C>) -> Option<Callback<C>> {
        self.slots[category as usize].replace(callback)
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with(mut self, category: Category, callback: Callback<C>) -> Self {
        self.register(category, callback);
        self
    }

    /// Removes and returns the callback for a category.
    pub fn unregister(&mut self, category: Category) -> Option<Callback<C>> {
        self.slots[category as usize].take()
    }

    /// Determines whether a callback is registered for a category.
    pub fn is_registered(&self, category: Category) -> bool {
        self.slots[category as usize].is_some()
    }

    /// Calls the callback registered for `category`, if any. Returns whether a callback was called.
    pub fn invoke(&self, category: Category, context: &mut C, message: &Message) -> bool {
        match self.slots[category as usize] {
            Some(callback) => {
                callback(context, message);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(log: &mut Vec<u8>, message: &Message) {
        log.push(message.data_byte(0));
    }

    fn record_doubled(log: &mut Vec<u8>, message: &Message) {
        log.push(message.data_byte(0) * 2);
    }

    #[test]
    fn unregistered_category_is_ignored() {
        let handlers = Handlers::<Vec<u8>>::new();
        let mut log = Vec::new();

        let invoked = handlers.invoke(Category::NoteOn, &mut log, &Message::new(0x90, &[60, 1]));

        assert!(!invoked);
        assert!(log.is_empty());
    }

    #[test]
    fn registered_callback_is_invoked() {
        let handlers = Handlers::new().with(Category::NoteOn, record);
        let mut log = Vec::new();

        assert!(handlers.invoke(Category::NoteOn, &mut log, &Message::new(0x90, &[60, 1])));
        assert!(!handlers.invoke(Category::NoteOff, &mut log, &Message::new(0x80, &[61, 1])));

        assert_eq!(vec![60], log, "Expected left but got right");
    }

    #[test]
    fn register_overwrites() {
        let mut handlers = Handlers::new();
        assert!(handlers.register(Category::SongSelect, record).is_none());
        assert!(handlers.register(Category::SongSelect, record_doubled).is_some());

        let mut log = Vec::new();
        handlers.invoke(Category::SongSelect, &mut log, &Message::new(0xF3, &[4]));

        assert_eq!(vec![8], log, "Only the latest callback should run; expected left but got right");
    }

    #[test]
    fn unregister() {
        let mut handlers = Handlers::new().with(Category::Start, record);
        assert!(handlers.is_registered(Category::Start));

        assert!(handlers.unregister(Category::Start).is_some());
        assert!(!handlers.is_registered(Category::Start));
        assert!(handlers.unregister(Category::Start).is_none());
    }
}
