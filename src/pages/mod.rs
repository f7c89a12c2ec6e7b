//! Pages
//!
//! One component per route.

mod auth;
mod index;
mod settings;
mod tasks;

pub use auth::{LoginPage, RegisterPage};
pub use index::IndexPage;
pub use settings::SettingsPage;
pub use tasks::TasksPage;
