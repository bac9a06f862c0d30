mod orders;
mod revenue;
mod stats;
mod users;

pub use orders::orders;
pub use revenue::revenue;
pub use stats::stats;
pub use users::{update_role, users};
