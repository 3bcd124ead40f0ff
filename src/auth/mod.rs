//! Session machinery: password hashing, signed session tokens, cookies and flash messages.

pub mod cookie;
pub mod flash;
pub mod password;
pub mod token;

pub use cookie::{clear_cookie, read_cookie, set_cookie, FLASH_COOKIE, SESSION_COOKIE};
pub use flash::{Flash, FlashCategory};
pub use password::{hash_password, verify_password};
pub use token::{SessionClaims, SessionKeys};
