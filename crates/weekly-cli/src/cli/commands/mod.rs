//! CLI command handlers, one file per command.

mod base64;
mod input;
mod new_weekly;
mod paste;
mod title;

pub use base64::{run_base64_decode, run_base64_encode};
pub use new_weekly::run_new_weekly;
pub use paste::run_paste;
pub use title::run_title;
