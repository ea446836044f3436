pub mod options;
pub mod pool;
pub mod request_manager;
