/// Command definitions, routing and message handlers
pub mod handlers;
/// Reply delivery over Telegram with photo-to-text fallback
pub mod messaging;
