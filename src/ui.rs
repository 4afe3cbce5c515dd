mod footer;
mod header;
pub mod movie_result;
mod ui;
pub mod watched_list;

pub use ui::ui;
