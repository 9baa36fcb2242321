pub mod keyboard;
pub mod permission;
pub mod pointer;

pub use keyboard::on_modal_command;
pub use permission::{MotionGate, MotionPermissionRequest};
pub use pointer::{PointerFeed, Subscription};
