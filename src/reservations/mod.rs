//! # Reservations Module
//!
//! Accepts booking requests from the public site:
//! - Body collection with a size cap, JSON or form decoding
//! - Field, email and booking-window validation
//! - Appending accepted requests to the reservation log

pub mod decode;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod routes;
pub mod store;
pub mod validators;


pub use routes::reservations_routes;
