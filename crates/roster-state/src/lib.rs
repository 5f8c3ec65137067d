//! The contact screen controller.
//!
//! [`ContactStateController`] owns the sort selector and the draft form,
//! derives the ordered contact list from a [`roster_core::ContactDao`], and
//! publishes the combined [`roster_core::UiState`] to any number of
//! [`StateSubscription`]s.

mod config;
mod controller;
mod subscription;

pub use config::ControllerConfig;
pub use controller::ContactStateController;
pub use subscription::StateSubscription;
