//! Persistence services: typed repositories for the site and generic CRUD for the admin panel.

mod crud;
mod posts;
mod shops;
mod users;
mod validation;

pub use crud::CrudService;
pub use posts::PostService;
pub use shops::ShopService;
pub use users::UserService;
pub use validation::{is_email, RequestValidator};
