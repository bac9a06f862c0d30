mod cancel;
mod create;
mod list;
mod status;

pub use cancel::cancel;
pub use create::create;
pub use list::{get, list};
pub use status::update_status;
