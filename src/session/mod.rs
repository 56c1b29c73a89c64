//! Session orchestration: controller state machine, form values, view trait.

pub mod controller;
pub mod form;
pub mod view;

pub use controller::{SessionController, SessionError, SessionState};
pub use form::{FormInput, ValidationError};
pub use view::SessionView;
