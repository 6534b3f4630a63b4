pub mod action;
pub mod controller;
pub mod notify;
pub mod overlay;
pub mod session;
pub mod theme;

pub use action::{Action, KeyPress};
pub use controller::{Dashboard, DashboardOptions};
pub use overlay::{LoadKind, Phase};
