//! Row types for every table plus the insert payloads the services accept.

mod post;
mod shop;
mod user;

pub use post::*;
pub use shop::*;
pub use user::*;
