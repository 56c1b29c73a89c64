//! Presentation surface consumed by the session controller.

use crate::workouts::types::Workout;

/// The handful of presentation operations the controller drives.
///
/// The actual form, list and notice rendering live outside this crate;
/// implementations adapt whatever surface the host provides. Tests inject a
/// recording implementation.
pub trait SessionView {
    /// Append a list entry for `workout`.
    fn render_entry(&mut self, workout: &Workout);

    /// Reveal the workout form and focus the distance field.
    fn show_form(&mut self);

    /// Clear the form fields and hide the form. Implementations own the
    /// short-delay layout restore that lets the hide transition animate.
    fn hide_form(&mut self);

    /// Swap the cadence/elevation row visibility to match the selected kind.
    fn toggle_kind_fields(&mut self);

    /// Show a user-visible notice (sensor failure, rejected input).
    fn show_notice(&mut self, message: &str);
}
