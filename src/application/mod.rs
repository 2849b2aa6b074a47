pub mod normalize;
pub mod ports;
pub mod services;
