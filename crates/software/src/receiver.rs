//! The streaming decoder at the heart of the device.
//!
//! A [`Receiver`] is fed the raw serial MIDI stream one byte at a time. It tracks running status, accumulates payload,
//! lets System Real-Time messages through at any point (even mid-message), filters Channel Voice messages by the
//! [`ReceiveChannel`], and hands each completed message to the callback registered for its [`Category`].
//!
//! There is no explicit state enum: the receiver is idle when no payload is outstanding and collecting otherwise, which
//! is derived from its counters.

use crate::{
    configuration::{ReceiveChannel, ReceiverConfig},
    handlers::Handlers,
    message::{BUFFER_LEN, Category, Message, MessageGroup, is_real_time, is_status, payload_len},
};

/// Decodes a MIDI 1.0 byte stream and dispatches completed messages to [`Handlers`].
///
/// `C` is the context handed to every callback, owned by the caller and passed to [`receive`](Self::receive).
pub struct Receiver<C> {
    handlers: Handlers<C>,
    groups: MessageGroup,
    channel: ReceiveChannel,
    /// The last status byte which wasn't System Real-Time; reused by data bytes that arrive without one.
    running_status: Option<u8>,
    /// Payload length of the current message.
    expected: u8,
    /// Payload bytes still outstanding for the current message; never exceeds `expected`.
    remaining: u8,
    buffer: [u8; BUFFER_LEN],
    position: usize,
}

impl<C> Receiver<C> {
    /// Constructs a [`Receiver`] which is ready to accept bytes.
    pub fn new(config: ReceiverConfig, handlers: Handlers<C>) -> Self {
        let mut receiver = Self {
            handlers,
            groups: config.groups,
            channel: config.channel,
            running_status: None,
            expected: 0,
            remaining: 0,
            buffer: [0; BUFFER_LEN],
            position: 0,
        };
        receiver.begin(config.channel);
        receiver
    }

    /// Begins receiving on `channel`, discarding running status and any partially received message.
    pub fn begin(&mut self, channel: ReceiveChannel) {
        info!("Receiving MIDI on channel {} (0 is omni)", channel.number());
        self.channel = channel;
        self.running_status = None;
        self.expected = 0;
        self.remaining = 0;
        self.buffer = [0; BUFFER_LEN];
        self.position = 0;
    }

    /// Processes a single byte of the stream, invoking at most one callback.
    pub fn receive(&mut self, byte: u8, context: &mut C) {
        if is_status(byte) {
            if is_real_time(byte) {
                // real-time messages have no payload and must not disturb a message in progress
                self.dispatch(&Message::new(byte, &[]), context);
                return;
            }

            if self.remaining > 0 {
                trace!(
                    "Abandoning incomplete message {=u8:#x} with {} byte(s) outstanding",
                    self.running_status.unwrap_or_default(),
                    self.remaining
                );
            }
            self.running_status = Some(byte);
            self.expected = payload_len(byte);
            self.remaining = self.expected;
            self.position = 0;
        } else if self.remaining == 0 {
            // no message is expecting payload, e.g., before the first status byte or after Tune Request
            trace!("Stray data byte {=u8:#x}", byte);
            if self.position < BUFFER_LEN {
                self.buffer[self.position] = byte;
                self.position += 1;
            }
            return;
        } else if self.position < BUFFER_LEN {
            self.buffer[self.position] = byte;
            self.position += 1;
            self.remaining -= 1;
        } else {
            return;
        }

        if self.remaining == 0 {
            self.complete(context);
        }
    }

    /// Processes each byte of `bytes` in order.
    pub fn receive_all(&mut self, bytes: &[u8], context: &mut C) {
        for &byte in bytes {
            self.receive(byte, context);
        }
    }

    /// Dispatches the current message and rearms for running status.
    fn complete(&mut self, context: &mut C) {
        if let Some(status) = self.running_status {
            let message = Message::new(status, &self.buffer[..self.position]);
            self.dispatch(&message, context);
        }
        self.position = 0;
        // a following data byte without a new status byte reuses the same category and length
        self.remaining = self.expected;
    }

    fn dispatch(&self, message: &Message, context: &mut C) {
        if !self.channel.admits(message.status()) {
            return;
        }

        if let Some(category) = message.category(self.groups) {
            if !self.handlers.invoke(category, context, message) {
                trace!("No handler registered for {}", category);
            }
        }
    }

    /// Returns the channel being received on.
    pub fn channel(&self) -> ReceiveChannel {
        self.channel
    }

    /// Returns the enabled message groups.
    pub fn groups(&self) -> MessageGroup {
        self.groups
    }

    /// Returns the status byte that data bytes without a preceding status byte will be attributed to.
    pub fn running_status(&self) -> Option<u8> {
        self.running_status
    }

    /// Determines whether no partial payload has been collected, i.e., the next data byte would begin a new message.
    pub fn is_idle(&self) -> bool {
        self.remaining == self.expected
    }

    /// Returns the registered handlers.
    pub fn handlers(&self) -> &Handlers<C> {
        &self.handlers
    }

    /// Returns the registered handlers for modification.
    pub fn handlers_mut(&mut self) -> &mut Handlers<C> {
        &mut self.handlers
    }
}
