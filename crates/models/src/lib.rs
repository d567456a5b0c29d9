pub mod client;
pub mod db;
pub mod errors;
pub mod payment;
pub mod service_item;
pub mod task;
pub mod transaction;
