//! Turns the backend's shape-variable JSON replies into fixed internal
//! shapes. Each reply kind has an ordered list of typed parse attempts; the
//! first attempt that matches wins.

mod chat_list;
mod chat_reply;
mod lenient;
mod transcript;

pub use chat_list::{ChatListing, RawChat, parse_chat_list};
pub use chat_reply::{ChatReply, parse_chat_reply};
pub use transcript::{RawMessage, parse_transcript};

pub(crate) use lenient::is_truthy;
