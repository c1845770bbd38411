//! Dispatch handlers. Each recognises one event kind and returns `Continue` for anything else;
//! [`GroupGateHandler`] runs first and drops unaddressed group messages in `before`.

mod action;
mod chat;
mod group_gate;
mod photo;
pub mod replies;
mod start;
mod turn;

pub use action::ActionHandler;
pub use chat::ChatHandler;
pub use group_gate::GroupGateHandler;
pub use photo::PhotoHandler;
pub use start::StartHandler;
pub use turn::TurnRunner;
