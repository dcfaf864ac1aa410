use std::sync::Arc;

use crate::{
    controllers::confirm::Confirmed,
    error::AppResult,
    gateway::MediaGateway,
    models::{Media, MediaId, MediaPage, PageRequest},
    visibility::{Observer, VisibilitySignal},
};

/// Loaded rows and paging state of the incremental list
///
/// Pure state machine: a fetch starts with a [`PageRequest`] handed out by this
/// type and finishes with [`ListState::apply_page`]. Records keep server order
/// within a page and pages are concatenated in fetch order.
#[derive(Debug, Clone)]
pub struct ListState {
    records: Vec<Media>,
    current_page: u32,
    total_pages: u32,
    page_size: u32,
    loading: bool,
    mounted: bool,
    observer: Option<Observer>,
    observer_generation: u64,
}

impl ListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            records: Vec::new(),
            current_page: 1,
            total_pages: 1,
            page_size: page_size.max(1),
            loading: false,
            mounted: false,
            observer: None,
            observer_generation: 0,
        }
    }

    pub fn records(&self) -> &[Media] {
        &self.records
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn observer(&self) -> Option<Observer> {
        self.observer
    }

    pub fn has_more(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn find(&self, id: MediaId) -> Option<&Media> {
        self.records.iter().find(|media| media.id == Some(id))
    }

    /// Id of the last rendered row, the one the observer watches
    pub fn last_row_id(&self) -> Option<MediaId> {
        self.records.last().and_then(|media| media.id)
    }

    /// Starts from a clean slate and requests the first page
    pub fn mount(&mut self) -> PageRequest {
        let generation = self.observer_generation;
        *self = Self::new(self.page_size);
        self.observer_generation = generation;
        self.mounted = true;
        self.begin_fetch(1)
    }

    /// Stops observing; fetches resolving after this are dropped
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.teardown_observer();
    }

    /// Re-requests page 1 while keeping the current rows until it arrives
    pub fn begin_refresh(&mut self) -> Option<PageRequest> {
        if !self.mounted || self.loading {
            return None;
        }
        Some(self.begin_fetch(1))
    }

    /// Handles the last row becoming visible
    ///
    /// `seen` is the observer the event was captured against. The page only
    /// advances when it is still the armed observer (same generation and
    /// target), nothing is loading and more pages remain.
    pub fn on_last_row_visible(&mut self, seen: Observer) -> Option<PageRequest> {
        if !self.mounted || self.loading || !self.has_more() {
            return None;
        }

        if self.observer != Some(seen) {
            tracing::trace!(
                generation = seen.generation(),
                target = seen.target(),
                "Visibility event from a stale observer"
            );
            return None;
        }

        self.current_page += 1;
        Some(self.begin_fetch(self.current_page))
    }

    /// Finishes a fetch started by this state
    ///
    /// Returns false when the result was dropped because the list is gone.
    pub fn apply_page(&mut self, request: PageRequest, outcome: AppResult<MediaPage>) -> bool {
        if !self.mounted {
            tracing::debug!(page = request.page, "Dropping page fetched after unmount");
            return false;
        }

        match outcome {
            Ok(page) => {
                let received = page.media.len();
                if request.page == 1 {
                    self.records = page.media;
                } else {
                    self.records.extend(page.media);
                }
                self.current_page = request.page;
                self.total_pages = page.total_pages;

                tracing::info!(
                    page = request.page,
                    received,
                    loaded = self.records.len(),
                    total_pages = self.total_pages,
                    "Media page loaded"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, page = request.page, "Error fetching media");
            }
        }

        // Loading flips back here, so the observer is always re-created
        self.loading = false;
        self.recreate_observer();
        true
    }

    /// Drops the row with `id` without touching paging
    ///
    /// Returns whether anything was removed. Total pages are not adjusted.
    pub fn remove(&mut self, id: MediaId) -> bool {
        let before = self.records.len();
        self.records.retain(|media| media.id != Some(id));
        let removed = self.records.len() != before;

        if removed && self.observer.is_some_and(|observer| observer.observes(id)) {
            self.recreate_observer();
        }

        removed
    }

    /// Swaps in an edited record at its current position
    ///
    /// Order, paging and the observer are untouched. Returns false when no
    /// loaded row carries the record's id.
    pub fn replace(&mut self, media: Media) -> bool {
        let Some(id) = media.id else {
            return false;
        };

        match self.records.iter_mut().find(|existing| existing.id == Some(id)) {
            Some(slot) => {
                *slot = media;
                true
            }
            None => false,
        }
    }

    fn begin_fetch(&mut self, page: u32) -> PageRequest {
        self.loading = true;
        self.teardown_observer();
        PageRequest {
            page,
            limit: self.page_size,
        }
    }

    fn teardown_observer(&mut self) {
        if let Some(observer) = self.observer.take() {
            tracing::trace!(
                generation = observer.generation(),
                target = observer.target(),
                "Observer disconnected"
            );
        }
    }

    fn recreate_observer(&mut self) {
        self.teardown_observer();

        if !self.mounted || self.loading || !self.has_more() {
            return;
        }

        if let Some(target) = self.last_row_id() {
            self.observer_generation += 1;
            self.observer = Some(Observer::new(self.observer_generation, target));
        }
    }
}

/// Drives a [`ListState`] against a gateway
///
/// Gateway failures stop here: they are logged and the list keeps its last
/// good contents.
pub struct ListController {
    gateway: Arc<dyn MediaGateway>,
    state: ListState,
}

impl ListController {
    pub fn new(gateway: Arc<dyn MediaGateway>, page_size: u32) -> Self {
        Self {
            gateway,
            state: ListState::new(page_size),
        }
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn records(&self) -> &[Media] {
        self.state.records()
    }

    pub async fn mount(&mut self) {
        let request = self.state.mount();
        self.fetch(request).await;
    }

    pub fn unmount(&mut self) {
        self.state.unmount();
    }

    /// Reloads page 1, used after a record was created
    pub async fn refresh(&mut self) {
        if let Some(request) = self.state.begin_refresh() {
            self.fetch(request).await;
        }
    }

    /// Shows an edited record in place without refetching
    pub fn replace(&mut self, media: Media) -> bool {
        let id = media.id;
        let replaced = self.state.replace(media);
        tracing::debug!(?id, replaced, "Edited media replaced in list");
        replaced
    }

    /// Reports that the last rendered row is visible
    ///
    /// Returns true when a new page was requested.
    pub async fn notify_visible(&mut self) -> bool {
        let Some(observer) = self.state.observer() else {
            return false;
        };

        match self.state.on_last_row_visible(observer) {
            Some(request) => {
                self.fetch(request).await;
                true
            }
            None => false,
        }
    }

    /// Polls `signal` and loads the next page when it fires
    pub async fn poll(&mut self, signal: &mut dyn VisibilitySignal) -> bool {
        if signal.last_row_visible(self.state.records().len()) {
            self.notify_visible().await
        } else {
            false
        }
    }

    /// Deletes a confirmed record and drops it from the loaded rows
    ///
    /// Returns false when the gateway call failed; the rows are left as they were.
    pub async fn delete(&mut self, confirmed: Confirmed) -> bool {
        let id = confirmed.id();

        match self.gateway.delete_by_id(id).await {
            Ok(()) => {
                let removed = self.state.remove(id);
                tracing::info!(id, removed, "Media removed from list");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, id, gateway = self.gateway.name(), "Error deleting media");
                false
            }
        }
    }

    async fn fetch(&mut self, request: PageRequest) {
        let outcome = self.gateway.list_page(request.page, request.limit).await;
        self.state.apply_page(request, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        controllers::confirm::ConfirmationGate,
        error::AppError,
        gateway::MockMediaGateway,
        models::MediaType,
        stub::MediaStore,
        visibility::{ManualTrigger, ScrollPoll},
    };
    use mockall::predicate::eq;
    use std::sync::Mutex;

    fn media(id: MediaId) -> Media {
        Media {
            id: Some(id),
            title: format!("Title {}", id),
            media_type: MediaType::Movie,
            director: "Director".to_string(),
            budget: "1M".to_string(),
            location: "Somewhere".to_string(),
            duration: "90".to_string(),
            year: "2000".to_string(),
        }
    }

    fn page_of(ids: std::ops::RangeInclusive<MediaId>, total_pages: u32) -> MediaPage {
        MediaPage {
            media: ids.map(media).collect(),
            total_pages,
        }
    }

    fn ids(records: &[Media]) -> Vec<MediaId> {
        records.iter().filter_map(|m| m.id).collect()
    }

    fn armed(state: &ListState) -> Observer {
        state.observer().expect("observer armed")
    }

    /// Gateway over the stub server's in-memory store
    struct StoreGateway {
        store: Mutex<MediaStore>,
        list_calls: Mutex<Vec<u32>>,
    }

    impl StoreGateway {
        fn with_records(count: usize) -> Self {
            let mut store = MediaStore::new();
            for n in 0..count {
                let mut draft = media(0);
                draft.id = None;
                draft.title = format!("Entry {}", n);
                store.insert(draft);
            }
            Self {
                store: Mutex::new(store),
                list_calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl MediaGateway for StoreGateway {
        async fn list_page(&self, page: u32, limit: u32) -> AppResult<MediaPage> {
            self.list_calls.lock().unwrap().push(page);
            self.store.lock().unwrap().page(page, limit)
        }

        async fn create(&self, media: &Media) -> AppResult<Media> {
            Ok(self.store.lock().unwrap().insert(media.clone()))
        }

        async fn update(&self, id: MediaId, media: &Media) -> AppResult<Media> {
            self.store.lock().unwrap().replace(id, media.clone())
        }

        async fn delete_by_id(&self, id: MediaId) -> AppResult<()> {
            self.store.lock().unwrap().remove(id)
        }

        fn name(&self) -> &'static str {
            "store"
        }
    }

    #[test]
    fn test_first_page_replaces_and_later_pages_append() {
        let mut state = ListState::new(3);
        let first = state.mount();
        assert_eq!(first, PageRequest { page: 1, limit: 3 });
        assert!(state.is_loading());

        assert!(state.apply_page(first, Ok(page_of(1..=3, 2))));
        assert_eq!(ids(state.records()), vec![1, 2, 3]);
        assert_eq!(state.total_pages(), 2);
        assert!(!state.is_loading());

        let second = state.on_last_row_visible(armed(&state)).unwrap();
        assert_eq!(second.page, 2);
        state.apply_page(second, Ok(page_of(4..=5, 2)));
        assert_eq!(ids(state.records()), vec![1, 2, 3, 4, 5]);
        assert!(!state.has_more());
    }

    #[test]
    fn test_no_advance_while_loading() {
        let mut state = ListState::new(10);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=10, 3)));

        let observer = armed(&state);
        let second = state.on_last_row_visible(observer);
        assert!(second.is_some());
        assert!(state.is_loading());
        assert_eq!(state.on_last_row_visible(observer), None);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_single_page_never_arms_observer() {
        let mut state = ListState::new(10);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=4, 1)));

        assert_eq!(state.observer(), None);
        assert_eq!(state.on_last_row_visible(Observer::new(1, 4)), None);
    }

    #[test]
    fn test_observer_recreated_after_each_load() {
        let mut state = ListState::new(2);
        let first = state.mount();
        assert_eq!(state.observer(), None);

        state.apply_page(first, Ok(page_of(1..=2, 3)));
        let armed = state.observer().unwrap();
        assert_eq!(armed.target(), 2);

        let second = state.on_last_row_visible(armed).unwrap();
        assert_eq!(state.observer(), None);

        state.apply_page(second, Ok(page_of(3..=4, 3)));
        let rearmed = state.observer().unwrap();
        assert_eq!(rearmed.target(), 4);
        assert!(rearmed.generation() > armed.generation());
    }

    #[test]
    fn test_visibility_of_other_row_ignored() {
        let mut state = ListState::new(2);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=2, 2)));
        let current = armed(&state);

        let other_row = Observer::new(current.generation(), 1);
        assert_eq!(state.on_last_row_visible(other_row), None);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_event_from_older_generation_ignored() {
        let mut state = ListState::new(2);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=2, 4)));
        let stale = armed(&state);

        // A failed fetch re-arms on the same row under a new generation
        let second = state.on_last_row_visible(stale).unwrap();
        let failure = AppError::Status {
            status: 503,
            body: String::new(),
        };
        state.apply_page(second, Err(failure));
        let current = armed(&state);
        assert_eq!(current.target(), stale.target());
        assert!(current.generation() > stale.generation());

        assert_eq!(state.on_last_row_visible(stale), None);
        assert_eq!(state.current_page(), 2);
        assert!(!state.is_loading());

        let third = state.on_last_row_visible(current).unwrap();
        assert_eq!(third.page, 3);
    }

    #[test]
    fn test_unmount_tears_down_and_drops_late_page() {
        let mut state = ListState::new(2);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=2, 3)));
        let observer = armed(&state);
        let second = state.on_last_row_visible(observer).unwrap();

        state.unmount();
        assert_eq!(state.observer(), None);
        assert!(!state.apply_page(second, Ok(page_of(3..=4, 3))));
        assert_eq!(ids(state.records()), vec![1, 2]);
        assert_eq!(state.on_last_row_visible(observer), None);
    }

    #[test]
    fn test_failed_fetch_keeps_rows_and_stops_loading() {
        let mut state = ListState::new(2);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=2, 3)));
        let second = state.on_last_row_visible(armed(&state)).unwrap();

        let failure = AppError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        state.apply_page(second, Err(failure));
        assert_eq!(ids(state.records()), vec![1, 2]);
        assert!(!state.is_loading());
        assert_eq!(state.total_pages(), 3);
    }

    #[test]
    fn test_remove_present_and_absent_ids() {
        let mut state = ListState::new(10);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=5, 2)));

        assert!(state.remove(3));
        assert_eq!(ids(state.records()), vec![1, 2, 4, 5]);
        assert_eq!(state.total_pages(), 2);

        assert!(!state.remove(99));
        assert_eq!(ids(state.records()), vec![1, 2, 4, 5]);
    }

    #[test]
    fn test_removing_observed_row_retargets_observer() {
        let mut state = ListState::new(3);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=3, 2)));
        assert_eq!(state.observer().unwrap().target(), 3);

        let before = armed(&state);
        state.remove(3);
        let retargeted = armed(&state);
        assert_eq!(retargeted.target(), 2);
        assert_eq!(state.on_last_row_visible(before), None);
        assert!(state.on_last_row_visible(retargeted).is_some());
    }

    #[test]
    fn test_refresh_keeps_rows_until_page_arrives() {
        let mut state = ListState::new(2);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=2, 2)));
        let second = state.on_last_row_visible(armed(&state)).unwrap();
        state.apply_page(second, Ok(page_of(3..=4, 2)));

        let refresh = state.begin_refresh().unwrap();
        assert_eq!(refresh.page, 1);
        assert_eq!(state.records().len(), 4);

        state.apply_page(refresh, Ok(page_of(10..=11, 2)));
        assert_eq!(ids(state.records()), vec![10, 11]);
        assert_eq!(state.current_page(), 1);
        assert!(state.has_more());
    }

    #[test]
    fn test_replace_keeps_position_and_paging() {
        let mut state = ListState::new(2);
        let first = state.mount();
        state.apply_page(first, Ok(page_of(1..=2, 3)));
        let second = state.on_last_row_visible(armed(&state)).unwrap();
        state.apply_page(second, Ok(page_of(3..=4, 3)));
        let observer = armed(&state);

        let edited = Media {
            title: "Edited".to_string(),
            ..media(3)
        };
        assert!(state.replace(edited));
        assert_eq!(ids(state.records()), vec![1, 2, 3, 4]);
        assert_eq!(state.find(3).unwrap().title, "Edited");
        assert_eq!(state.current_page(), 2);
        assert_eq!(state.observer(), Some(observer));

        assert!(!state.replace(media(99)));
        assert!(!state.replace(Media::blank()));
        assert_eq!(state.records().len(), 4);
    }

    #[tokio::test]
    async fn test_mount_fetches_first_page() {
        let mut gateway = MockMediaGateway::new();
        gateway
            .expect_list_page()
            .with(eq(1), eq(10))
            .times(1)
            .returning(|_, _| Ok(page_of(1..=10, 2)));

        let mut list = ListController::new(Arc::new(gateway), 10);
        list.mount().await;

        assert_eq!(list.records().len(), 10);
        assert_eq!(list.state().total_pages(), 2);
    }

    #[tokio::test]
    async fn test_two_pages_load_fourteen_records() {
        let mut gateway = MockMediaGateway::new();
        gateway
            .expect_list_page()
            .with(eq(1), eq(10))
            .times(1)
            .returning(|_, _| Ok(page_of(1..=10, 2)));
        gateway
            .expect_list_page()
            .with(eq(2), eq(10))
            .times(1)
            .returning(|_, _| Ok(page_of(11..=14, 2)));

        let mut list = ListController::new(Arc::new(gateway), 10);
        list.mount().await;
        assert!(list.notify_visible().await);
        assert!(!list.notify_visible().await);

        assert_eq!(list.records().len(), 14);
        assert_eq!(ids(list.records()), (1..=14).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_failed_mount_leaves_empty_list() {
        let mut gateway = MockMediaGateway::new();
        gateway
            .expect_list_page()
            .times(1)
            .returning(|_, _| {
                Err(AppError::Status {
                    status: 500,
                    body: String::new(),
                })
            });
        gateway.expect_name().return_const("mock");

        let mut list = ListController::new(Arc::new(gateway), 10);
        list.mount().await;

        assert!(list.records().is_empty());
        assert!(!list.state().is_loading());
        assert!(!list.notify_visible().await);
    }

    #[tokio::test]
    async fn test_every_page_size_loads_all_records_in_order() {
        for total in [0usize, 1, 9, 10, 11, 23] {
            for limit in 1..=7u32 {
                let gateway = Arc::new(StoreGateway::with_records(total));
                let mut list = ListController::new(gateway.clone(), limit);

                list.mount().await;
                while list.notify_visible().await {}

                let loaded = ids(list.records());
                let expected: Vec<MediaId> = (1..=total as MediaId).collect();
                assert_eq!(loaded, expected, "total={} limit={}", total, limit);
                assert_eq!(
                    list.state().current_page(),
                    list.state().total_pages().max(1),
                    "total={} limit={}",
                    total,
                    limit
                );

                let calls = gateway.list_calls.lock().unwrap().clone();
                let expected_calls: Vec<u32> =
                    (1..=list.state().total_pages().max(1)).collect();
                assert_eq!(calls, expected_calls);
            }
        }
    }

    #[tokio::test]
    async fn test_poll_uses_visibility_signal() {
        let gateway = Arc::new(StoreGateway::with_records(12));
        let mut list = ListController::new(gateway, 5);
        list.mount().await;

        let mut trigger = ManualTrigger::new();
        assert!(!list.poll(&mut trigger).await);
        trigger.trigger();
        assert!(list.poll(&mut trigger).await);
        assert_eq!(list.records().len(), 10);

        // Viewport taller than the list sees the last row straight away
        let mut scroll = ScrollPoll::new(20);
        assert!(list.poll(&mut scroll).await);
        assert_eq!(list.records().len(), 12);
        assert!(!list.poll(&mut scroll).await);
    }

    #[tokio::test]
    async fn test_confirmed_delete_removes_row_without_refetch() {
        let mut gateway = MockMediaGateway::new();
        gateway
            .expect_list_page()
            .times(1)
            .returning(|_, _| Ok(page_of(1..=4, 3)));
        gateway
            .expect_delete_by_id()
            .with(eq(2))
            .times(1)
            .returning(|_| Ok(()));

        let mut list = ListController::new(Arc::new(gateway), 4);
        list.mount().await;

        let mut gate = ConfirmationGate::new();
        gate.request(2);
        let confirmed = gate.confirm().unwrap();
        assert!(list.delete(confirmed).await);

        assert_eq!(ids(list.records()), vec![1, 3, 4]);
        assert_eq!(list.state().total_pages(), 3);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_row() {
        let mut gateway = MockMediaGateway::new();
        gateway
            .expect_list_page()
            .times(1)
            .returning(|_, _| Ok(page_of(1..=3, 1)));
        gateway
            .expect_delete_by_id()
            .times(1)
            .returning(|_| Err(AppError::NotFound(1)));
        gateway.expect_name().return_const("mock");

        let mut list = ListController::new(Arc::new(gateway), 10);
        list.mount().await;

        let mut gate = ConfirmationGate::new();
        gate.request(1);
        assert!(!list.delete(gate.confirm().unwrap()).await);
        assert_eq!(ids(list.records()), vec![1, 2, 3]);
    }
}
