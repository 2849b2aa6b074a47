pub mod gateway;
pub mod identity;
pub mod observability;
