//! Application layer for A2S.
//!
//! Wires the workflow shell to the task scheduler and publishes what happens
//! as a stream of [`ShowroomEvent`]s for the front ends.

pub mod events;
pub mod showroom_usecase;

pub use events::{ChatMessage, ChatSender, OrderConfirmation, ShowroomEvent};
pub use showroom_usecase::ShowroomUseCase;
