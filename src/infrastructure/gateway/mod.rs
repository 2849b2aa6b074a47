mod http_chat_gateway;
mod mock_chat_gateway;

pub use http_chat_gateway::{HttpChatGateway, decode_body};
pub use mock_chat_gateway::{GatewayCall, MockChatGateway};
