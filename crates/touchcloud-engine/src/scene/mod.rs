//! Scene state and the command path that mutates it.
//!
//! Responsibilities:
//! - own the process-wide drawing parameters (style, spin, light, viewport)
//! - serialize input from any thread into commands drained once per frame
//! - keep the rule for when a style switch clears the accumulated geometry

mod adapter;
mod cmd;
mod state;

pub use adapter::{channel, CommandQueue, CommandSender, SceneInput};
pub use cmd::SceneCommand;
pub use state::{SceneState, DEFAULT_SPIN_STEP, SPIN_STEP_PER_SLIDER};
