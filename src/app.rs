mod app;
pub mod movie;
pub mod omd;
pub mod store;
pub mod watched;

pub use app::{App, CurrentScreen};
