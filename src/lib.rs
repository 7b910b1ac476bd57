pub mod booking;
pub mod network;
pub mod seed;
