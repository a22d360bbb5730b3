pub mod admin_analytics;
pub mod admin_bookings;
pub mod admin_catalog;
pub mod admin_content;
pub mod admin_dashboard;
pub mod admin_inquiries;
pub mod admin_roles;
pub mod admin_schedules;
pub mod contact;
pub mod fitness;
pub mod home;

pub use admin_analytics::AnalyticsPage;
pub use admin_bookings::BookingsPage;
pub use admin_catalog::{BannersPage, ClassesPage, ClubsPage, PackagesPage};
pub use admin_content::ContentPage;
pub use admin_dashboard::AdminDashboardPage;
pub use admin_inquiries::InquiriesPage;
pub use admin_roles::UserRolesPage;
pub use admin_schedules::SchedulesPage;
pub use contact::ContactPage;
pub use fitness::FitnessPage;
pub use home::HomePage;
