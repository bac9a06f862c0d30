mod create;
mod delete;
mod list;
mod stats;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::list;
pub use stats::stats;
pub use update::update;
