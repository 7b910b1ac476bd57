mod bookings;
mod seats;
mod trains;

pub use bookings::*;
pub use seats::*;
pub use trains::*;
