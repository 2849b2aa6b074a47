mod chat_gateway;
mod identity_store;

pub use chat_gateway::{ChatGateway, GatewayError};
pub use identity_store::{IdentityError, IdentityStore};
