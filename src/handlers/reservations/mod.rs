mod create;
mod delete;
mod list;
mod status;

pub use create::create;
pub use delete::delete;
pub use list::{get, list};
pub use status::update_status;
