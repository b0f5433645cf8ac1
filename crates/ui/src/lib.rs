#![forbid(unsafe_code)]

pub mod app;
pub mod context;
pub mod views;
pub mod vm;

pub use app::App;
pub use context::AppContext;
pub use views::{SessionScreen, SessionView};
pub use vm::{SessionScreenVm, map_session_screen};
