//! Form submissions and their declarative field constraints. Each form validates
//! into a typed value or a set of per-field error messages for inline display.

mod fields;
mod login;
mod post;
mod registration;

pub use fields::{FormErrors, Rule};
pub use login::{Credentials, LoginForm};
pub use post::{PostDraft, PostForm};
pub use registration::{Registration, RegistrationForm};
