pub mod candles;
pub mod chunks;
pub mod direct;
pub mod synthetic;
