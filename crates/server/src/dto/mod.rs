mod booking;
mod seats;
mod trains;

pub use booking::*;
pub use seats::*;
pub use trains::*;
