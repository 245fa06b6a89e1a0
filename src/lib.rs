//! This crate drives the weekly view of a Wasabicalendar calendar.
//!
//! It talks to the AJAX endpoints of the server with a [`Client`](client::Client), that can be used as a stand-alone module.
//!
//! The view itself is a [`CalendarPage`]: it keeps the state of the displayed week (selected slots, visible face of the card,
//! requests in flight), and writes to a [`Document`](traits::Document) through [`Mutation`]s. \
//! HTML is produced by the pure functions of the [`render`] module. \
//! A [`Poller`] keeps a page up to date in the background.
//!
//! Failed requests are turned into a status message and a redirection by a [`Reporter`](reporter::Reporter).

pub mod traits;

pub mod config;
pub mod error;
pub use error::RequestError;
pub mod ids;
pub mod slot;
pub mod tag;
pub mod task;
pub mod week;

pub mod client;
pub use client::Client;
pub mod http;
#[cfg(any(test, feature = "mock_transport"))]
pub mod mock_transport;

pub mod document;
pub use document::{Mutation, MemoryDocument};
pub mod render;
pub mod flip;
pub mod reporter;
pub mod sequence;
pub mod page;
pub use page::CalendarPage;
pub mod poller;
pub use poller::Poller;

pub mod utils;
