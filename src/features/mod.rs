// Background features driven by gateway events
pub mod event_handler;
pub mod event_logger;
pub mod log_events;
pub mod message_tracker;
