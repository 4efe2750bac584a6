//! Route handlers for the page server.

pub mod health;
pub mod pages;
pub mod session;
