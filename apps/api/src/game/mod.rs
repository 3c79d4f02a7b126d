// Negotiation game: pure engine (state machine, AI model, skill scoring)
// plus the session map and HTTP handlers that drive it. The engine files
// perform no I/O; everything stateful lives in `session`.

pub mod ai;
pub mod engine;
pub mod handlers;
pub mod session;
pub mod skills;
