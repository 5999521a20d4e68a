pub mod account;
pub mod customer;
pub mod error;
pub mod history;
pub mod registry;
pub mod transaction;
