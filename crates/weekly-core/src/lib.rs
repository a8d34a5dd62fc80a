pub mod config;
pub mod logging;

pub mod base64_tools;
pub mod smart_paste;
pub mod weekly;
