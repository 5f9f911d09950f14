//! API Routes
//!
//! Route handlers organized by functionality.

pub mod calendar;
pub mod countdown;
pub mod excitement;
pub mod guestbook;
pub mod health;
pub mod site;
