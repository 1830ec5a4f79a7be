//! Presenter for the hives screen of one apiary.

use std::sync::Arc;

use tracing::warn;

use crate::cache::GoBeesRepository;
use crate::models::{ApiaryId, Hive, HiveId};

use super::contract::{ApiaryView, REQUEST_ADD_EDIT_HIVE, RESULT_OK};

/// Listens to user actions from the hives screen, retrieves the data and
/// updates the display as required.
pub struct ApiaryPresenter<V: ApiaryView> {
    repository: Arc<GoBeesRepository>,
    view: Arc<V>,
    apiary_id: ApiaryId,
    /// Force a cache refresh the first time.
    first_load: bool,
}

impl<V: ApiaryView> ApiaryPresenter<V> {
    pub fn new(repository: Arc<GoBeesRepository>, view: Arc<V>, apiary_id: ApiaryId) -> Self {
        Self {
            repository,
            view,
            apiary_id,
            first_load: true,
        }
    }

    /// Lifecycle hook invoked when the screen becomes active.
    pub async fn start(&mut self) {
        self.load_hives(false).await;
    }

    /// Loads the hives of the apiary, refreshing the cache when forced.
    pub async fn load_hives(&mut self, force_update: bool) {
        // Force update the first time
        let force_update = force_update || self.first_load;
        self.first_load = false;
        self.view.set_loading_indicator(true);
        if force_update {
            self.repository.refresh_hives(self.apiary_id).await;
        }
        match self.repository.get_apiary_with_hives(self.apiary_id).await {
            Ok(apiary) => {
                // The view may not be able to handle display updates anymore
                if !self.view.is_active() {
                    return;
                }
                self.view.set_loading_indicator(false);
                self.view.show_title(&apiary.name);
                if apiary.hives.is_empty() {
                    self.view.show_no_hives();
                } else {
                    self.view.show_hives(apiary.hives);
                }
            }
            Err(e) => {
                warn!(apiary_id = self.apiary_id, error = %e, "loading hives failed");
                if !self.view.is_active() {
                    return;
                }
                self.view.set_loading_indicator(false);
                self.view.show_loading_hives_error();
            }
        }
    }

    /// Opens the flow to add a hive (`None`) or edit an existing one.
    pub fn add_edit_hive(&self, hive_id: Option<HiveId>) {
        self.view.show_add_edit_hive(self.apiary_id, hive_id);
    }

    /// Pure navigation request; no cache interaction.
    pub fn open_hive_detail(&self, hive: &Hive) {
        self.view.show_hive_detail(self.apiary_id, hive.id);
    }

    /// Deletes the given hive and, on success, reloads the list.
    pub async fn delete_hive(&mut self, hive: &Hive) {
        self.view.set_loading_indicator(true);
        match self.repository.delete_hive(self.apiary_id, hive.id).await {
            Ok(()) => {
                if !self.view.is_active() {
                    return;
                }
                self.load_hives(true).await;
                if self.view.is_active() {
                    self.view.show_successfully_deleted_message();
                }
            }
            Err(e) => {
                warn!(hive_id = hive.id, error = %e, "deleting hive failed");
                if !self.view.is_active() {
                    return;
                }
                self.view.set_loading_indicator(false);
                self.view.show_deleted_error_message();
            }
        }
    }

    /// Interprets the outcome of the delegated add/edit hive flow.
    pub async fn handle_result(&mut self, request_code: i32, result_code: i32) {
        if request_code != REQUEST_ADD_EDIT_HIVE {
            return;
        }
        if result_code == RESULT_OK {
            self.load_hives(true).await;
            if self.view.is_active() {
                self.view.show_successfully_saved_message();
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
    use crate::source::GoBeesDataSource;
    use crate::testkit::{sample_apiary, sample_hive, DisplayEvent, ScriptedSource, SpyView};

    const APIARY: ApiaryId = 1;

    fn presenter(
        hives: &[(HiveId, u32)],
    ) -> (
        ApiaryPresenter<SpyView>,
        Arc<SpyView>,
        Arc<ScriptedSource>,
    ) {
        let source = Arc::new(ScriptedSource::with_apiaries(vec![sample_apiary(
            APIARY, hives,
        )]));
        let dyn_source: Arc<dyn GoBeesDataSource> = source.clone();
        let repository = Arc::new(GoBeesRepository::new(dyn_source));
        let view = Arc::new(SpyView::new());
        let presenter = ApiaryPresenter::new(repository, view.clone(), APIARY);
        (presenter, view, source)
    }

    #[tokio::test]
    async fn load_hives_shows_hives_in_order() {
        let (mut presenter, view, _) = presenter(&[(10, 0), (11, 2)]);

        presenter.load_hives(true).await;

        let shown = view.position_of(&DisplayEvent::LoadingIndicator(true));
        let hidden = view.position_of(&DisplayEvent::LoadingIndicator(false));
        assert!(shown.unwrap() < hidden.unwrap());
        assert!(view
            .position_of(&DisplayEvent::Title("Apiary 1".into()))
            .is_some());
        assert!(view.position_of(&DisplayEvent::Hives(2)).is_some());
        assert!(view.position_of(&DisplayEvent::NoHives).is_none());
    }

    #[tokio::test]
    async fn load_hives_empty_shows_no_hives() {
        let (mut presenter, view, _) = presenter(&[]);

        presenter.load_hives(true).await;

        assert!(view.position_of(&DisplayEvent::NoHives).is_some());
    }

    #[tokio::test]
    async fn load_failure_shows_loading_error() {
        let (mut presenter, view, source) = presenter(&[(10, 0)]);
        source.fail_reads(true);

        presenter.load_hives(true).await;

        assert_eq!(
            view.events(),
            vec![
                DisplayEvent::LoadingIndicator(true),
                DisplayEvent::LoadingIndicator(false),
                DisplayEvent::LoadingHivesError,
            ]
        );
    }

    #[tokio::test]
    async fn inactive_view_discards_the_result_silently() {
        let (mut presenter, view, _) = presenter(&[(10, 0)]);
        view.set_active(false);

        presenter.load_hives(true).await;

        assert_eq!(view.events(), vec![DisplayEvent::LoadingIndicator(true)]);
    }

    #[tokio::test]
    async fn first_load_forces_a_refresh_once() {
        let (mut presenter, _, source) = presenter(&[(10, 0)]);

        presenter.load_hives(false).await;
        presenter.load_hives(false).await;

        assert_eq!(source.fetches(), 1);
    }

    #[tokio::test]
    async fn delete_hive_reloads_before_the_message() {
        let (mut presenter, view, source) = presenter(&[(10, 1), (11, 0)]);
        let target = sample_hive(APIARY, 10, 1);

        presenter.delete_hive(&target).await;

        assert_eq!(source.fetches(), 1);
        let reloaded = view.position_of(&DisplayEvent::Hives(1)).unwrap();
        let message = view.position_of(&DisplayEvent::SuccessfullyDeleted).unwrap();
        assert!(reloaded < message);
    }

    #[tokio::test]
    async fn delete_failure_shows_the_error() {
        let (mut presenter, view, source) = presenter(&[(10, 1)]);
        source.fail_writes(true);
        let target = sample_hive(APIARY, 10, 1);

        presenter.delete_hive(&target).await;

        assert_eq!(
            view.events(),
            vec![
                DisplayEvent::LoadingIndicator(true),
                DisplayEvent::LoadingIndicator(false),
                DisplayEvent::DeletedError,
            ]
        );
    }

    #[tokio::test]
    async fn saved_result_reloads_and_confirms() {
        let (mut presenter, view, source) = presenter(&[(10, 0)]);

        presenter
            .handle_result(REQUEST_ADD_EDIT_HIVE, RESULT_OK)
            .await;

        assert_eq!(source.fetches(), 1);
        let reloaded = view.position_of(&DisplayEvent::Hives(1)).unwrap();
        let message = view.position_of(&DisplayEvent::SuccessfullySaved).unwrap();
        assert!(reloaded < message);
    }

    #[tokio::test]
    async fn navigation_requests_delegate_to_the_view() {
        let (presenter, view, _) = presenter(&[(10, 0)]);

        presenter.add_edit_hive(None);
        presenter.add_edit_hive(Some(10));
        presenter.open_hive_detail(&sample_hive(APIARY, 10, 0));

        assert_eq!(
            view.events(),
            vec![
                DisplayEvent::AddEditHive(APIARY, None),
                DisplayEvent::AddEditHive(APIARY, Some(10)),
                DisplayEvent::HiveDetail(APIARY, 10),
            ]
        );
    }
}
