//! Core types and helpers for catalog-feed
//!
//! Domain types shared by the storage, source, service and HTTP crates.

mod allow_list;
pub mod constants;
mod error;
mod feed;
mod game;

pub use allow_list::{parse_allow_list, read_allow_list};
pub use error::{AllowListError, ParseError};
pub use feed::FeedItem;
pub use game::{CanonicalRecord, GameId, GameView, RawEntry};
