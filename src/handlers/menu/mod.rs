mod create;
mod delete;
mod list;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::{get, list};
pub use update::update;
