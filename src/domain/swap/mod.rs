//! Swap request domain - the lifecycle state machine.

mod aggregate;
mod errors;

pub use aggregate::{
    transition, ActorRule, ParticipantRole, SwapAction, SwapRequest, MAX_SKILL_LENGTH,
};
pub use errors::SwapError;
