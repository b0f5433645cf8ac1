mod screen;
mod session;
#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use screen::SessionScreen;
pub use session::SessionView;
