//! Core types for the icebreaker bot data store.
//!
//! Pure data and contracts only: the record types stored by the bot and the
//! traits a backing table store has to implement. No I/O happens here.

pub mod bot;
pub mod storage;
