//! Request handlers

pub mod expenses;
pub mod health;
pub mod participants;
pub mod settlement;
pub mod trips;
