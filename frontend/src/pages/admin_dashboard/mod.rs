pub mod panel;

pub use panel::AdminDashboardPage;
