//! Database Models
//!
//! Entity structs shared by the repository layer and the API handlers.

pub mod serde_helpers;

mod menu_item;
mod reservation;
mod table_type;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use reservation::{
    PreOrderRow, Reservation, ReservationCreate, ReservationStatus, SelectedItem,
};
pub use table_type::{TableAvailability, TableType, TableTypeCreate, TableTypeUpdate};
