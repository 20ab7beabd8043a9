//! Search screen state machine.
//!
//! [`Controller`] owns the result set and everything the screen shows around
//! it: the busy indicator and the empty-state notice. It never performs I/O
//! on its own except through its two collaborators. Fetches are described by
//! a [`FetchTicket`] which the caller runs elsewhere and reports back through
//! [`Controller::complete`].
//!
//! # Ordering
//!
//! Every accepted search bumps a generation counter. A completion whose
//! generation is not the current one belongs to a superseded search and is
//! dropped, so the visible results always come from the latest search even
//! when responses arrive out of order. The transport is never cancelled.

use std::sync::Arc;

use pustaka_client::{Book, Connectivity, FetchError, LinkOpener, SearchQuery, build_query};
use pustaka_core::{Error, Notice};

/// Whether a fetch is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
}

/// A fetch the controller wants run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: SearchQuery,
}

/// One rendered row of the result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub title: String,
    pub authors: String,
    /// Openable detail page, `None` when the book has no usable link.
    pub link: Option<String>,
}

/// Everything the view needs to draw the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenView {
    pub rows: Vec<ResultRow>,
    pub busy: bool,
    pub notice: Option<&'static str>,
}

pub struct Controller {
    connectivity: Arc<dyn Connectivity>,
    opener: Arc<dyn LinkOpener>,
    generation: u64,
    phase: Phase,
    results: Vec<Book>,
    notice: Option<Notice>,
}

impl Controller {
    /// Create the screen in `Idle` with no results.
    ///
    /// Connectivity is checked right away so an offline start shows the
    /// notice before the first search.
    pub fn new(connectivity: Arc<dyn Connectivity>, opener: Arc<dyn LinkOpener>) -> Self {
        let mut controller =
            Self { connectivity, opener, generation: 0, phase: Phase::Idle, results: Vec::new(), notice: None };

        if !controller.connectivity.is_network_available() {
            tracing::info!("no connectivity at startup");
            controller.notice = Some(Notice::NoInternet);
        }

        controller
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase == Phase::Searching
    }

    pub fn results(&self) -> &[Book] {
        &self.results
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    /// Handle the search action for the current input text.
    ///
    /// Returns the fetch to run, or `None` when the device is offline. In the
    /// offline case the result list is cleared and any in-flight fetch is
    /// invalidated before returning.
    pub fn search(&mut self, input: &str) -> Option<FetchTicket> {
        self.generation += 1;
        self.results.clear();

        if !self.connectivity.is_network_available() {
            tracing::info!("search blocked: {}", Error::NoConnectivity);
            self.phase = Phase::Idle;
            self.notice = Some(Notice::NoInternet);
            return None;
        }

        let query = build_query(input);
        tracing::info!(generation = self.generation, term = query.term(), "search started");

        self.phase = Phase::Searching;
        self.notice = None;

        Some(FetchTicket { generation: self.generation, query })
    }

    /// Apply the outcome of a fetch.
    ///
    /// Returns `false` when the outcome belongs to a superseded search and was
    /// ignored.
    pub fn complete(&mut self, generation: u64, result: Result<Vec<Book>, FetchError>) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "dropping stale fetch result");
            return false;
        }

        self.phase = Phase::Idle;

        match result {
            Ok(books) if !books.is_empty() => {
                tracing::debug!(generation, count = books.len(), "fetch completed");
                self.results = books;
                self.notice = None;
            }
            Ok(_) => {
                tracing::debug!(generation, "fetch completed with no books");
                self.results.clear();
                self.notice = Some(Notice::NoBooksFound);
            }
            Err(e) => {
                let err = Error::from(e);
                tracing::warn!(generation, "fetch failed: {err}");
                self.results.clear();
                self.notice = Some(Notice::from(&err));
            }
        }

        true
    }

    /// Open the detail page of the book at `index`.
    ///
    /// Returns `false` without side effects when the index is out of range or
    /// the book has no navigable link.
    pub fn select(&self, index: usize) -> bool {
        let Some(book) = self.results.get(index) else {
            return false;
        };

        match book.link() {
            Some(url) => {
                self.opener.open(&url);
                true
            }
            None => {
                tracing::debug!(index, title = book.title(), "selected book has no link");
                false
            }
        }
    }

    /// Drop the current results and forget any in-flight fetch.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Idle;
        self.results.clear();
        tracing::debug!(generation = self.generation, "results reset");
    }

    /// Snapshot of the screen for rendering.
    pub fn view(&self) -> ScreenView {
        let rows = self
            .results
            .iter()
            .map(|b| ResultRow {
                title: b.title().to_string(),
                authors: b.authors_line(),
                link: b.link().map(|url| url.to_string()),
            })
            .collect();

        let notice = if self.results.is_empty() && !self.is_busy() { self.notice.map(|n| n.message()) } else { None };

        ScreenView { rows, busy: self.is_busy(), notice }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    use url::Url;

    /// Connectivity whose answer can be flipped mid-test.
    #[derive(Default)]
    pub(crate) struct Switch {
        offline: AtomicBool,
        checks: AtomicUsize,
    }

    impl Switch {
        pub(crate) fn online() -> Arc<Self> {
            Arc::new(Self::default())
        }

        pub(crate) fn offline() -> Arc<Self> {
            let switch = Self::default();
            switch.offline.store(true, Ordering::SeqCst);
            Arc::new(switch)
        }

        pub(crate) fn set_online(&self, online: bool) {
            self.offline.store(!online, Ordering::SeqCst);
        }
    }

    impl Connectivity for Switch {
        fn is_network_available(&self) -> bool {
            self.checks.fetch_add(1, Ordering::SeqCst);
            !self.offline.load(Ordering::SeqCst)
        }
    }

    /// Opener that records what it was asked to open.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub(crate) opened: Mutex<Vec<Url>>,
    }

    impl LinkOpener for Recorder {
        fn open(&self, url: &Url) {
            self.opened.lock().unwrap().push(url.clone());
        }
    }

    pub(crate) fn book(title: &str, url: &str) -> Book {
        Book::new(title, vec!["Author".to_string()], url)
    }

    fn controller(switch: &Arc<Switch>) -> (Controller, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        (Controller::new(switch.clone(), recorder.clone()), recorder)
    }

    #[test]
    fn test_initial_state_online() {
        let switch = Switch::online();
        let (c, _) = controller(&switch);

        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.results().is_empty());
        assert_eq!(c.notice(), None);
        assert_eq!(switch.checks.load(Ordering::SeqCst), 1);
        assert_eq!(c.view(), ScreenView { rows: vec![], busy: false, notice: None });
    }

    #[test]
    fn test_initial_state_offline_shows_notice() {
        let (c, _) = controller(&Switch::offline());

        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.notice(), Some(Notice::NoInternet));
        assert_eq!(c.view().notice, Some("No internet connection"));
    }

    #[test]
    fn test_search_issues_ticket() {
        let (mut c, _) = controller(&Switch::online());

        let ticket = c.search("  harry potter ").unwrap();
        assert_eq!(ticket.generation, 1);
        assert_eq!(ticket.query.term(), "harrypotter");
        assert_eq!(c.phase(), Phase::Searching);

        let view = c.view();
        assert!(view.busy);
        assert_eq!(view.notice, None);
    }

    #[test]
    fn test_search_offline_clears_without_fetch() {
        let switch = Switch::online();
        let (mut c, _) = controller(&switch);

        let ticket = c.search("dune").unwrap();
        assert!(c.complete(ticket.generation, Ok(vec![book("Dune", "https://x/dune")])));
        assert_eq!(c.results().len(), 1);

        switch.set_online(false);
        assert!(c.search("dune messiah").is_none());
        assert!(c.results().is_empty());
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.view().notice, Some("No internet connection"));
    }

    #[test]
    fn test_offline_search_invalidates_in_flight_fetch() {
        let switch = Switch::online();
        let (mut c, _) = controller(&switch);

        let ticket = c.search("dune").unwrap();
        switch.set_online(false);
        assert!(c.search("dune").is_none());

        assert!(!c.complete(ticket.generation, Ok(vec![book("Dune", "https://x/dune")])));
        assert!(c.results().is_empty());
        assert_eq!(c.notice(), Some(Notice::NoInternet));
    }

    #[test]
    fn test_complete_with_books_populates() {
        let (mut c, _) = controller(&Switch::online());
        let ticket = c.search("t").unwrap();

        let books = vec![Book::new("T", vec!["A".into()], "http://x")];
        assert!(c.complete(ticket.generation, Ok(books.clone())));

        assert_eq!(c.results(), books.as_slice());
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(
            c.view(),
            ScreenView {
                rows: vec![ResultRow { title: "T".into(), authors: "A".into(), link: Some("http://x/".into()) }],
                busy: false,
                notice: None,
            }
        );
    }

    #[test]
    fn test_complete_empty_shows_no_books_found() {
        let (mut c, _) = controller(&Switch::online());
        let ticket = c.search("zzzz").unwrap();

        assert!(c.complete(ticket.generation, Ok(vec![])));
        assert!(c.results().is_empty());
        assert_eq!(c.notice(), Some(Notice::NoBooksFound));
        assert_eq!(c.view().notice, Some("No books found"));
    }

    #[test]
    fn test_complete_error_collapses_to_empty() {
        let (mut c, _) = controller(&Switch::online());

        let ticket = c.search("dune").unwrap();
        assert!(c.complete(ticket.generation, Err(FetchError::Timeout)));
        assert_eq!(c.view().notice, Some("No books found"));

        let ticket = c.search("dune").unwrap();
        assert!(c.complete(ticket.generation, Err(FetchError::Parse("not json".into()))));
        assert!(c.results().is_empty());
        assert_eq!(c.notice(), Some(Notice::NoBooksFound));
        assert!(!c.is_busy());
    }

    #[test]
    fn test_new_search_clears_previous_results() {
        let (mut c, _) = controller(&Switch::online());
        let first = c.search("a").unwrap();
        c.complete(first.generation, Ok(vec![book("A", "https://x/a")]));

        let _second = c.search("b").unwrap();
        assert!(c.results().is_empty());
        assert!(c.view().busy);
    }

    #[test]
    fn test_stale_completion_after_newer_is_ignored() {
        let (mut c, _) = controller(&Switch::online());

        let a = c.search("a").unwrap();
        let b = c.search("b").unwrap();
        assert!(b.generation > a.generation);

        assert!(c.complete(b.generation, Ok(vec![book("B", "https://x/b")])));
        assert!(!c.complete(a.generation, Ok(vec![book("A", "https://x/a")])));

        assert_eq!(c.results(), [book("B", "https://x/b")].as_slice());
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn test_stale_completion_before_newer_is_ignored() {
        let (mut c, _) = controller(&Switch::online());

        let a = c.search("a").unwrap();
        let b = c.search("b").unwrap();

        assert!(!c.complete(a.generation, Err(FetchError::Timeout)));
        assert!(c.is_busy());
        assert_eq!(c.notice(), None);

        assert!(c.complete(b.generation, Ok(vec![book("B", "https://x/b")])));
        assert_eq!(c.results().len(), 1);
    }

    #[test]
    fn test_select_opens_link() {
        let (mut c, recorder) = controller(&Switch::online());
        let ticket = c.search("x").unwrap();
        c.complete(ticket.generation, Ok(vec![book("A", "https://x/a"), book("B", "https://x/b")]));

        assert!(c.select(1));
        let opened = recorder.opened.lock().unwrap();
        assert_eq!(opened.as_slice(), [Url::parse("https://x/b").unwrap()].as_slice());
    }

    #[test]
    fn test_select_without_link_is_noop() {
        let (mut c, recorder) = controller(&Switch::online());
        let ticket = c.search("x").unwrap();
        c.complete(ticket.generation, Ok(vec![book("No link", ""), book("Bad", "javascript:void(0)")]));

        assert!(!c.select(0));
        assert!(!c.select(1));
        assert!(!c.select(7));
        assert!(recorder.opened.lock().unwrap().is_empty());
        assert!(c.view().rows.iter().all(|r| r.link.is_none()));
    }

    #[test]
    fn test_reset_clears_and_invalidates() {
        let (mut c, _) = controller(&Switch::online());
        let ticket = c.search("dune").unwrap();

        c.reset();
        assert!(!c.is_busy());
        assert!(!c.complete(ticket.generation, Ok(vec![book("Dune", "https://x/dune")])));
        assert!(c.results().is_empty());
    }
}
