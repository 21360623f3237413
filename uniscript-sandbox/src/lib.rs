//! Sandbox runner support for compiled Uniscript documents.
//!
//! A compiled document runs inside an isolated frame. This crate prepares
//! the document for that frame and makes sense of what comes back:
//!
//! - [`instrument`] injects a script that forwards runtime errors and
//!   `console.log` calls to the parent window as structured messages.
//! - [`Notification`] decodes those messages.
//! - [`relay`] hands them to a [`Logger`] for display.

pub mod logger;
pub mod notification;
pub mod shim;

pub use logger::{LogLevel, Logger};
pub use notification::{Notification, NotificationError, relay};
pub use shim::instrument;
