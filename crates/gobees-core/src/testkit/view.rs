//! Spy view recording every display call for assertion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::models::{ApiaryId, Hive, HiveId, Recording};
use crate::presenter::{ApiaryView, BaseView, HiveView};

/// Display calls in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayEvent {
    LoadingIndicator(bool),
    Title(String),
    Recordings(usize),
    NoRecordings,
    LoadingRecordingsError,
    Hives(usize),
    NoHives,
    LoadingHivesError,
    SuccessfullySaved,
    SuccessfullyDeleted,
    DeletedError,
    RecordingTooShortError,
    SaveError,
    AddEditHive(ApiaryId, Option<HiveId>),
    HiveDetail(ApiaryId, HiveId),
    NewRecording(ApiaryId, HiveId),
    RecordingDetail(ApiaryId, HiveId, DateTime<Utc>),
}

/// Implements both screen contracts and records every call.
///
/// The `active` flag mirrors view liveness: flip it off to simulate a
/// screen torn down while an operation is in flight.
pub struct SpyView {
    active: AtomicBool,
    camera_permission: AtomicBool,
    events: Mutex<Vec<DisplayEvent>>,
}

impl SpyView {
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(true),
            camera_permission: AtomicBool::new(true),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }

    pub fn set_camera_permission(&self, granted: bool) {
        self.camera_permission.store(granted, Ordering::SeqCst);
    }

    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Index of the first occurrence of `event`, if recorded.
    pub fn position_of(&self, event: &DisplayEvent) -> Option<usize> {
        self.events.lock().unwrap().iter().position(|e| e == event)
    }

    fn record(&self, event: DisplayEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl Default for SpyView {
    fn default() -> Self {
        Self::new()
    }
}

impl BaseView for SpyView {
    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn set_loading_indicator(&self, active: bool) {
        self.record(DisplayEvent::LoadingIndicator(active));
    }

    fn show_title(&self, title: &str) {
        self.record(DisplayEvent::Title(title.to_string()));
    }
}

impl HiveView for SpyView {
    fn show_recordings(&self, recordings: Vec<Recording>) {
        self.record(DisplayEvent::Recordings(recordings.len()));
    }

    fn show_no_recordings(&self) {
        self.record(DisplayEvent::NoRecordings);
    }

    fn show_loading_recordings_error(&self) {
        self.record(DisplayEvent::LoadingRecordingsError);
    }

    fn show_successfully_saved_message(&self) {
        self.record(DisplayEvent::SuccessfullySaved);
    }

    fn show_successfully_deleted_message(&self) {
        self.record(DisplayEvent::SuccessfullyDeleted);
    }

    fn show_deleted_error_message(&self) {
        self.record(DisplayEvent::DeletedError);
    }

    fn show_recording_too_short_error_message(&self) {
        self.record(DisplayEvent::RecordingTooShortError);
    }

    fn show_save_error_message(&self) {
        self.record(DisplayEvent::SaveError);
    }

    fn check_camera_permission(&self) -> bool {
        self.camera_permission.load(Ordering::SeqCst)
    }

    fn start_new_recording(&self, apiary_id: ApiaryId, hive_id: HiveId) {
        self.record(DisplayEvent::NewRecording(apiary_id, hive_id));
    }

    fn show_recording_detail(&self, apiary_id: ApiaryId, hive_id: HiveId, date: DateTime<Utc>) {
        self.record(DisplayEvent::RecordingDetail(apiary_id, hive_id, date));
    }
}

impl ApiaryView for SpyView {
    fn show_hives(&self, hives: Vec<Hive>) {
        self.record(DisplayEvent::Hives(hives.len()));
    }

    fn show_no_hives(&self) {
        self.record(DisplayEvent::NoHives);
    }

    fn show_loading_hives_error(&self) {
        self.record(DisplayEvent::LoadingHivesError);
    }

    fn show_add_edit_hive(&self, apiary_id: ApiaryId, hive_id: Option<HiveId>) {
        self.record(DisplayEvent::AddEditHive(apiary_id, hive_id));
    }

    fn show_hive_detail(&self, apiary_id: ApiaryId, hive_id: HiveId) {
        self.record(DisplayEvent::HiveDetail(apiary_id, hive_id));
    }

    fn show_successfully_saved_message(&self) {
        self.record(DisplayEvent::SuccessfullySaved);
    }

    fn show_successfully_deleted_message(&self) {
        self.record(DisplayEvent::SuccessfullyDeleted);
    }

    fn show_deleted_error_message(&self) {
        self.record(DisplayEvent::DeletedError);
    }
}
