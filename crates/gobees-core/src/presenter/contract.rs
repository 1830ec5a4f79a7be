//! Contracts between the presenters and the display surfaces.
//!
//! Each screen implements the view trait for its role; presenters drive it
//! and never touch the surface directly. Implementations must be
//! thread-safe (`Send + Sync`) because display calls resume from
//! asynchronous completions.

use chrono::{DateTime, Utc};

use crate::models::{ApiaryId, Hive, HiveId, Recording};

/// Request code for a delegated monitoring session.
pub const REQUEST_MONITORING: i32 = 1;
/// Request code for the add/edit hive flow.
pub const REQUEST_ADD_EDIT_HIVE: i32 = 2;

/// Result code reported by a sub-task that completed successfully.
pub const RESULT_OK: i32 = -1;
/// Result code reported by a sub-task that was cancelled.
pub const RESULT_CANCELED: i32 = 0;

/// Error classification: the recorded session was too short to keep.
pub const ERROR_RECORDING_TOO_SHORT: i32 = 1;
/// Error classification: the session could not be saved.
pub const ERROR_SAVING_RECORDING: i32 = 2;

/// Capabilities shared by every screen bound to a presenter.
pub trait BaseView: Send + Sync {
    /// Whether the surface still exists and can safely receive display
    /// updates.
    fn is_active(&self) -> bool;

    /// Displays or hides the loading indicator.
    fn set_loading_indicator(&self, active: bool);

    /// Sets the screen title.
    fn show_title(&self, title: &str);
}

/// Display surface for the recordings of one hive.
pub trait HiveView: BaseView {
    /// Shows the list of recordings (never empty).
    fn show_recordings(&self, recordings: Vec<Recording>);

    /// Makes visible the no-recordings view.
    fn show_no_recordings(&self);

    fn show_loading_recordings_error(&self);

    fn show_successfully_saved_message(&self);

    fn show_successfully_deleted_message(&self);

    fn show_deleted_error_message(&self);

    fn show_recording_too_short_error_message(&self);

    fn show_save_error_message(&self);

    /// Capability check performed by the surface before a new recording
    /// may start.
    fn check_camera_permission(&self) -> bool;

    /// Opens the monitoring flow for the given hive.
    fn start_new_recording(&self, apiary_id: ApiaryId, hive_id: HiveId);

    /// Opens the detail view for one recording.
    fn show_recording_detail(&self, apiary_id: ApiaryId, hive_id: HiveId, date: DateTime<Utc>);
}

/// Display surface for the hives of one apiary.
pub trait ApiaryView: BaseView {
    /// Shows the list of hives (never empty).
    fn show_hives(&self, hives: Vec<Hive>);

    /// Makes visible the no-hives view.
    fn show_no_hives(&self);

    fn show_loading_hives_error(&self);

    /// Opens the flow to add a hive (`None`) or edit an existing one.
    fn show_add_edit_hive(&self, apiary_id: ApiaryId, hive_id: Option<HiveId>);

    /// Opens the detail view for one hive.
    fn show_hive_detail(&self, apiary_id: ApiaryId, hive_id: HiveId);

    fn show_successfully_saved_message(&self);

    fn show_successfully_deleted_message(&self);

    fn show_deleted_error_message(&self);
}
