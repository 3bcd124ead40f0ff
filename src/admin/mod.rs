//! Table-bound admin panel model: which tables are exposed, their columns, allowed
//! operations and per-column rules. Handlers in `handlers::admin` drive generic CRUD from it.

pub mod model;
pub mod registry;
pub mod validator;

pub use model::*;
pub use registry::default_model;
pub use validator::validate;
