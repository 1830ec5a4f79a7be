//! Presenter for the recordings screen of one hive.

use std::sync::Arc;

use tracing::warn;

use crate::cache::GoBeesRepository;
use crate::models::{ApiaryId, HiveId, Recording};

use super::contract::{
    HiveView, ERROR_RECORDING_TOO_SHORT, REQUEST_MONITORING, RESULT_CANCELED, RESULT_OK,
};

/// Listens to user actions from the recordings screen, retrieves the data
/// and updates the display as required.
pub struct HivePresenter<V: HiveView> {
    repository: Arc<GoBeesRepository>,
    view: Arc<V>,
    apiary_id: ApiaryId,
    hive_id: HiveId,
    /// Force a cache refresh the first time.
    first_load: bool,
}

impl<V: HiveView> HivePresenter<V> {
    pub fn new(
        repository: Arc<GoBeesRepository>,
        view: Arc<V>,
        apiary_id: ApiaryId,
        hive_id: HiveId,
    ) -> Self {
        Self {
            repository,
            view,
            apiary_id,
            hive_id,
            first_load: true,
        }
    }

    /// Lifecycle hook invoked when the screen becomes active.
    pub async fn start(&mut self) {
        self.load_recordings(false).await;
    }

    /// Loads the recordings of the hive, refreshing the cache when forced.
    ///
    /// The loading indicator is shown strictly before any terminal
    /// outcome reaches the view. A view that went inactive while the load
    /// was in flight receives no display update at all.
    pub async fn load_recordings(&mut self, force_update: bool) {
        // Force update the first time
        let force_update = force_update || self.first_load;
        self.first_load = false;
        self.view.set_loading_indicator(true);
        if force_update {
            self.repository.refresh_recordings(self.hive_id).await;
        }
        match self.repository.get_hive_with_recordings(self.hive_id).await {
            Ok(hive) => {
                // The view may not be able to handle display updates anymore
                if !self.view.is_active() {
                    return;
                }
                self.view.set_loading_indicator(false);
                self.view.show_title(&hive.name);
                if hive.recordings.is_empty() {
                    self.view.show_no_recordings();
                } else {
                    self.view.show_recordings(hive.recordings);
                }
            }
            Err(e) => {
                warn!(hive_id = self.hive_id, error = %e, "loading recordings failed");
                if !self.view.is_active() {
                    return;
                }
                self.view.set_loading_indicator(false);
                self.view.show_loading_recordings_error();
            }
        }
    }

    /// Deletes the given recording and, on success, reloads the list.
    pub async fn delete_recording(&mut self, recording: &Recording) {
        self.view.set_loading_indicator(true);
        match self
            .repository
            .delete_recording(self.hive_id, recording)
            .await
        {
            Ok(()) => {
                if !self.view.is_active() {
                    return;
                }
                self.load_recordings(true).await;
                if self.view.is_active() {
                    self.view.show_successfully_deleted_message();
                }
            }
            Err(e) => {
                warn!(hive_id = self.hive_id, error = %e, "deleting recording failed");
                if !self.view.is_active() {
                    return;
                }
                self.view.set_loading_indicator(false);
                self.view.show_deleted_error_message();
            }
        }
    }

    /// Starts a new monitoring session if the surface holds the required
    /// capability.
    pub fn start_new_recording(&self) {
        if self.view.check_camera_permission() {
            self.view.start_new_recording(self.apiary_id, self.hive_id);
        }
    }

    /// Pure navigation request; no cache interaction.
    pub fn open_recording_detail(&self, recording: &Recording) {
        self.view
            .show_recording_detail(self.apiary_id, self.hive_id, recording.date);
    }

    /// Interprets the outcome of a delegated monitoring session.
    pub async fn handle_result(&mut self, request_code: i32, result_code: i32, error: Option<i32>) {
        if request_code != REQUEST_MONITORING {
            return;
        }
        if result_code == RESULT_OK {
            // A recording was saved: refresh and confirm
            self.load_recordings(true).await;
            if self.view.is_active() {
                self.view.show_successfully_saved_message();
            }
        } else if result_code == RESULT_CANCELED {
            match error {
                Some(ERROR_RECORDING_TOO_SHORT) => {
                    self.view.show_recording_too_short_error_message();
                }
                Some(_) => self.view.show_save_error_message(),
                None => {}
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::contract::ERROR_SAVING_RECORDING;
    use crate::source::GoBeesDataSource;
    use crate::testkit::{sample_apiary, DisplayEvent, ScriptedSource, SpyView};

    const APIARY: ApiaryId = 1;
    const HIVE: HiveId = 10;

    fn presenter(
        recordings: u32,
    ) -> (
        HivePresenter<SpyView>,
        Arc<SpyView>,
        Arc<ScriptedSource>,
        Arc<GoBeesRepository>,
    ) {
        let source = Arc::new(ScriptedSource::with_apiaries(vec![sample_apiary(
            APIARY,
            &[(HIVE, recordings)],
        )]));
        let dyn_source: Arc<dyn GoBeesDataSource> = source.clone();
        let repository = Arc::new(GoBeesRepository::new(dyn_source));
        let view = Arc::new(SpyView::new());
        let presenter = HivePresenter::new(repository.clone(), view.clone(), APIARY, HIVE);
        (presenter, view, source, repository)
    }

    #[tokio::test]
    async fn load_recordings_shows_recordings_in_order() {
        let (mut presenter, view, _, _) = presenter(3);

        presenter.load_recordings(true).await;

        let shown = view.position_of(&DisplayEvent::LoadingIndicator(true));
        let hidden = view.position_of(&DisplayEvent::LoadingIndicator(false));
        assert!(shown.unwrap() < hidden.unwrap());
        assert_eq!(
            view.position_of(&DisplayEvent::Title("Hive 10".into())),
            Some(2)
        );
        assert!(view.position_of(&DisplayEvent::Recordings(3)).is_some());
        assert!(view.position_of(&DisplayEvent::NoRecordings).is_none());
    }

    #[tokio::test]
    async fn load_recordings_empty_shows_no_recordings() {
        let (mut presenter, view, _, _) = presenter(0);

        presenter.load_recordings(true).await;

        assert!(view.position_of(&DisplayEvent::NoRecordings).is_some());
        assert!(view
            .events()
            .iter()
            .all(|e| !matches!(e, DisplayEvent::Recordings(_))));
    }

    #[tokio::test]
    async fn load_failure_shows_loading_error() {
        let (mut presenter, view, source, _) = presenter(3);
        source.fail_reads(true);

        presenter.load_recordings(true).await;

        assert_eq!(
            view.events(),
            vec![
                DisplayEvent::LoadingIndicator(true),
                DisplayEvent::LoadingIndicator(false),
                DisplayEvent::LoadingRecordingsError,
            ]
        );
    }

    #[tokio::test]
    async fn inactive_view_discards_the_result_silently() {
        let (mut presenter, view, _, _) = presenter(3);
        view.set_active(false);

        presenter.load_recordings(true).await;

        // Only the synchronous loading signal; the completion is a no-op
        assert_eq!(view.events(), vec![DisplayEvent::LoadingIndicator(true)]);
    }

    #[tokio::test]
    async fn inactive_view_discards_the_failure_silently() {
        let (mut presenter, view, source, _) = presenter(3);
        source.fail_reads(true);
        view.set_active(false);

        presenter.load_recordings(true).await;

        assert_eq!(view.events(), vec![DisplayEvent::LoadingIndicator(true)]);
    }

    #[tokio::test]
    async fn first_load_forces_a_refresh_once() {
        let (mut presenter, _, source, repository) = presenter(2);

        // Warm the cache behind the presenter's back
        repository.get_hive_with_recordings(HIVE).await.unwrap();
        assert_eq!(source.fetches(), 1);

        // First non-forced load still refreshes
        presenter.load_recordings(false).await;
        assert_eq!(source.fetches(), 2);

        // Second non-forced load is served from the cache
        presenter.load_recordings(false).await;
        assert_eq!(source.fetches(), 2);

        presenter.load_recordings(true).await;
        assert_eq!(source.fetches(), 3);
    }

    #[tokio::test]
    async fn start_triggers_a_load() {
        let (mut presenter, view, source, _) = presenter(1);

        presenter.start().await;

        assert_eq!(source.fetches(), 1);
        assert!(view.position_of(&DisplayEvent::Recordings(1)).is_some());
    }

    #[tokio::test]
    async fn delete_success_reloads_before_the_message() {
        let (mut presenter, view, source, repository) = presenter(3);
        let target = repository
            .get_hive_with_recordings(HIVE)
            .await
            .unwrap()
            .recordings[0]
            .clone();

        presenter.delete_recording(&target).await;

        // Forced reload hit the store again
        assert_eq!(source.fetches(), 2);
        let reloaded = view.position_of(&DisplayEvent::Recordings(2)).unwrap();
        let message = view.position_of(&DisplayEvent::SuccessfullyDeleted).unwrap();
        assert!(reloaded < message);
    }

    #[tokio::test]
    async fn delete_failure_shows_the_error() {
        let (mut presenter, view, source, _) = presenter(2);
        source.fail_writes(true);
        let target = crate::testkit::sample_recording(HIVE, 0);

        presenter.delete_recording(&target).await;

        assert_eq!(
            view.events(),
            vec![
                DisplayEvent::LoadingIndicator(true),
                DisplayEvent::LoadingIndicator(false),
                DisplayEvent::DeletedError,
            ]
        );
        assert_eq!(source.fetches(), 0);
    }

    #[tokio::test]
    async fn delete_with_inactive_view_updates_nothing() {
        let (mut presenter, view, _, repository) = presenter(2);
        let target = repository
            .get_hive_with_recordings(HIVE)
            .await
            .unwrap()
            .recordings[0]
            .clone();
        view.set_active(false);

        presenter.delete_recording(&target).await;

        assert_eq!(view.events(), vec![DisplayEvent::LoadingIndicator(true)]);
    }

    #[tokio::test]
    async fn monitoring_success_reloads_and_confirms() {
        let (mut presenter, view, source, _) = presenter(2);

        presenter
            .handle_result(REQUEST_MONITORING, RESULT_OK, None)
            .await;

        assert_eq!(source.fetches(), 1);
        let reloaded = view.position_of(&DisplayEvent::Recordings(2)).unwrap();
        let message = view.position_of(&DisplayEvent::SuccessfullySaved).unwrap();
        assert!(reloaded < message);
    }

    #[tokio::test]
    async fn monitoring_cancelled_too_short_shows_only_that_message() {
        let (mut presenter, view, _, _) = presenter(2);

        presenter
            .handle_result(
                REQUEST_MONITORING,
                RESULT_CANCELED,
                Some(ERROR_RECORDING_TOO_SHORT),
            )
            .await;

        assert_eq!(view.events(), vec![DisplayEvent::RecordingTooShortError]);
    }

    #[tokio::test]
    async fn monitoring_cancelled_unrecognized_defaults_to_save_error() {
        let (mut presenter, view, _, _) = presenter(2);

        presenter
            .handle_result(REQUEST_MONITORING, RESULT_CANCELED, Some(99))
            .await;
        assert_eq!(view.events(), vec![DisplayEvent::SaveError]);

        let (mut presenter, view) = presenter_pair();
        presenter
            .handle_result(
                REQUEST_MONITORING,
                RESULT_CANCELED,
                Some(ERROR_SAVING_RECORDING),
            )
            .await;
        assert_eq!(view.events(), vec![DisplayEvent::SaveError]);
    }

    fn presenter_pair() -> (HivePresenter<SpyView>, Arc<SpyView>) {
        let (p, v, _, _) = presenter(2);
        (p, v)
    }

    #[tokio::test]
    async fn monitoring_cancelled_without_classification_is_ignored() {
        let (mut presenter, view, _, _) = presenter(2);

        presenter
            .handle_result(REQUEST_MONITORING, RESULT_CANCELED, None)
            .await;

        assert!(view.events().is_empty());
    }

    #[tokio::test]
    async fn unrelated_request_codes_are_ignored() {
        let (mut presenter, view, source, _) = presenter(2);

        presenter.handle_result(42, RESULT_OK, None).await;

        assert!(view.events().is_empty());
        assert_eq!(source.fetches(), 0);
    }

    #[tokio::test]
    async fn new_recording_is_gated_on_the_camera_permission() {
        let (presenter, view, _, _) = presenter(0);

        presenter.start_new_recording();
        assert_eq!(
            view.events(),
            vec![DisplayEvent::NewRecording(APIARY, HIVE)]
        );

        let (presenter, view) = presenter_denied();
        presenter.start_new_recording();
        assert!(view.events().is_empty());
    }

    fn presenter_denied() -> (HivePresenter<SpyView>, Arc<SpyView>) {
        let (p, v, _, _) = presenter(0);
        v.set_camera_permission(false);
        (p, v)
    }

    #[tokio::test]
    async fn open_recording_detail_delegates_to_the_view() {
        let (presenter, view, _, _) = presenter(1);
        let recording = crate::testkit::sample_recording(HIVE, 0);

        presenter.open_recording_detail(&recording);

        assert_eq!(
            view.events(),
            vec![DisplayEvent::RecordingDetail(APIARY, HIVE, recording.date)]
        );
    }
}
