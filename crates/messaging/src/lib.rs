//! Deep links to the messaging service and the message bodies sent through them.
//!
//! Everything here is pure: no network access, no filesystem.

pub mod link;
pub mod templates;

pub use link::{build_messaging_link, LinkConfig};
pub use templates::{birthday_greeting, interview_invitation, weekday_label, BirthdayStyle, OfficeProfile};
