pub mod admin_controller;
pub mod balance_controller;
pub mod order_controller;
pub mod realtime_controller;
pub mod transaction_controller;
