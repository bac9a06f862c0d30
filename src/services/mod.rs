pub mod menu_service;
pub mod order_service;
pub mod reservation_service;
pub mod stats_service;
pub mod user_service;

pub use menu_service::MenuService;
pub use order_service::{CancelOutcome, OrderError, OrderService};
pub use reservation_service::{NewReservation, ReservationService};
pub use stats_service::StatsService;
pub use user_service::{UserError, UserService};
