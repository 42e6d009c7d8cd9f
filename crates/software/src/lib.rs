//! This crate contains architecture-agnostic logic for a serial MIDI receiver which drives a monophonic analog
//! synthesizer over [CV/gate](https://en.wikipedia.org/wiki/CV/gate).
//!
//! Bytes of a [MIDI 1.0](https://midi.org/midi-1-0) stream are fed one at a time to a [`receiver::Receiver`], which
//! assembles them into [`message::Message`]s and dispatches each to the callback registered for its
//! [`message::Category`]. The [`voice`] module provides the callbacks that turn those messages into note and gate
//! state.

#![deny(missing_docs)]
#![cfg_attr(not(test), no_std)]

// must come first so the logging macros are visible to the modules below
mod fmt;

pub mod configuration;

pub mod control_change;

pub mod handlers;

pub mod message;

pub mod receiver;

pub mod voice;
