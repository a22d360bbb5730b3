pub mod panel;
pub mod repository;
pub mod utils;

pub use panel::ContentPage;
