pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod user;

pub use menu_item::{Category, MenuItem, CATEGORIES};
pub use order::{Order, OrderLine, OrderStatus, ORDER_STATUSES};
pub use reservation::{
    Reservation, ReservationDish, ReservationStatus, ReservationType, RESERVATION_STATUSES,
    RESERVATION_TYPES,
};
pub use user::{Role, User};
