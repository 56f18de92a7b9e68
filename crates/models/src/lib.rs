//! Persistence model: sea-orm entities plus the pure building blocks the
//! service layer composes (identifier generation and field validators).

pub mod errors;
pub mod db;
pub mod ids;
pub mod validation;
pub mod user;
pub mod car;
pub mod package;
pub mod service_record;
pub mod payment;

#[cfg(test)]
mod tests;
