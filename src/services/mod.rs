pub mod binance;

pub mod admin_service;
pub mod balance_service;
pub mod order_service;
