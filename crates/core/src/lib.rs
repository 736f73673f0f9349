//! Domain types and pure logic for CampusGig notifications.
//!
//! Nothing in this crate performs I/O. The dispatcher in `campusgig-notify`
//! and the HTTP layer in `campusgig-api` build on these types.

pub mod channels;
pub mod dispatch;
pub mod error;
pub mod notification_type;
pub mod preferences;
pub mod settings;
pub mod types;
