pub mod customers;
pub mod packages;
pub mod webhooks;
