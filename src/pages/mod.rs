mod auth;
mod catalog;
mod items;
mod matches;
mod misc;

pub use auth::{LoginPage, ProfilePage, RegisterPage};
pub use catalog::{DashboardPage, ItemDetailPage};
pub use items::{MyItemsPage, ReportFoundPage, ReportLostPage};
pub use matches::MatchesPage;
pub use misc::{AboutPage, LandingPage, PrivacyPage};
