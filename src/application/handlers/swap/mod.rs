//! Swap request command and query handlers.

mod create_swap;
mod delete_swap;
mod get_swap;
mod list_swaps;
mod my_requests;
mod transition_swap;
mod update_swap;

pub use create_swap::{CreateSwapCommand, CreateSwapHandler};
pub use delete_swap::{DeleteSwapCommand, DeleteSwapHandler};
pub use get_swap::{GetSwapHandler, GetSwapQuery};
pub use list_swaps::ListSwapsHandler;
pub use my_requests::{MyRequestsHandler, MySwapRequests};
pub use transition_swap::{TransitionSwapCommand, TransitionSwapHandler};
pub use update_swap::{UpdateSwapCommand, UpdateSwapHandler};
