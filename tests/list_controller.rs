//! End-to-end behaviour of the list controller over in-memory ports.

use blogfront::app::{ListController, ViewOptions, ViewTransform};
use blogfront::dom::{Dom, MemoryDom, NodeId};
use blogfront::fetch::{DataSource, HttpResponse, LoadOutcome, LoadRequest, NoDelay, Origin, RetryPolicy};
use blogfront::schedule::{Debouncer, VirtualScheduler};
use blogfront::storage::{KeyValueStore, MemoryStore};
use blogfront::{BlogfrontError, Record, Result, Theme};
use futures::executor::block_on;
use futures_util::future::LocalBoxFuture;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

const CACHE_KEY: &str = "blogs_cache_v1";

struct Scripted {
    responses: RefCell<VecDeque<Result<HttpResponse>>>,
    calls: Cell<usize>,
}

impl Scripted {
    fn new(responses: Vec<Result<HttpResponse>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: Cell::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl DataSource for Scripted {
    fn fetch<'a>(&'a self, _url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse>> {
        self.calls.set(self.calls.get() + 1);
        let next = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::new(500, "")));
        Box::pin(async move { next })
    }
}

struct Page {
    list: NodeId,
    content: NodeId,
    loading: NodeId,
    error: NodeId,
    sort: NodeId,
}

fn build_page(dom: &MemoryDom) -> Page {
    let list = dom.append(dom.root(), "section", &[("class", "blog-list")]);
    let sort = dom.append(list, "select", &[("class", "sort-select")]);
    dom.append(list, "select", &[("class", "filter-select")]);
    dom.append(list, "input", &[("class", "search-input")]);
    let loading = dom.append(list, "div", &[("class", "loading-indicator hidden")]);
    let error = dom.append(list, "p", &[("class", "error-container hidden")]);
    let content = dom.append(list, "div", &[("class", "blog-list-content")]);
    Page { list, content, loading, error, sort }
}

fn request() -> LoadRequest {
    LoadRequest {
        url: "/blogsData.json".to_string(),
        cache_key: CACHE_KEY.to_string(),
        policy: RetryPolicy::default(),
    }
}

fn controller<'a>(dom: &'a MemoryDom, page: &Page) -> ListController<&'a MemoryDom> {
    ListController::new(dom, page.list, ViewOptions::default(), request(), Theme::default())
}

fn feed() -> Value {
    json!([
        {"id": 1, "title": "Rust ownership", "category": "rust", "tags": ["memory"],
         "published_date": "2024-01-10", "reading_time": 7},
        {"id": 2, "title": "Ruby gems", "category": "ruby", "tags": ["rust"],
         "published_date": "2024-03-02", "reading_time": "3 min"},
        {"id": 3, "title": "Rusty tools", "category": "tooling",
         "published_date": "not a date", "reading_time": 12},
        {"id": 4, "title": "Async in practice", "category": "rust",
         "published_date": "2023-12-24"}
    ])
}

fn numbered_feed(count: usize) -> String {
    let records: Vec<Value> = (1..=count)
        .map(|i| json!({"title": format!("Post {i}"), "category": "misc"}))
        .collect();
    Value::Array(records).to_string()
}

fn titles(records: &[Record]) -> Vec<&str> {
    records.iter().map(Record::title_or_empty).collect()
}

#[test]
fn failed_fetch_shows_the_error_and_hides_loading() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::default();
    let source = Scripted::new(vec![
        Ok(HttpResponse::new(500, "")),
        Ok(HttpResponse::new(500, "")),
        Ok(HttpResponse::new(500, "")),
    ]);
    let mut list = controller(&dom, &page);

    let loaded = block_on(list.init(&store, &source, &NoDelay));

    assert!(!loaded);
    assert_eq!(source.calls(), 3);
    assert_eq!(dom.text(page.error), "Error: Failed to fetch blogs");
    assert!(!dom.has_class(&page.error, "hidden"));
    assert!(dom.has_class(&page.loading, "hidden"));
    assert!(list.controls().is_none());
    assert_eq!(dom.inner_html(page.content), "");
    assert_eq!(store.write_count(), 0);
}

#[test]
fn loading_indicator_is_shown_while_the_load_is_pending() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let mut list = controller(&dom, &page);

    list.begin();
    assert!(!dom.has_class(&page.loading, "hidden"));
    assert!(dom.has_class(&page.error, "hidden"));

    let loaded = list.complete(Err(BlogfrontError::Status { status: 502 }));

    assert!(!loaded);
    assert!(dom.has_class(&page.loading, "hidden"));
    assert_eq!(dom.text(page.error), "Error: Failed to fetch blogs");
}

#[test]
fn entries_with_odd_field_types_still_load_and_render() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::default();
    let body = json!([
        {"title": "Strings everywhere", "tags": "rust", "author": null},
        {"title": 42, "reading_time": true},
        {"title": "Typed", "tags": ["wasm"], "reading_time": 7.0}
    ]);
    let source = Scripted::new(vec![Ok(HttpResponse::new(200, body.to_string()))]);
    let mut list = controller(&dom, &page);

    assert!(block_on(list.init(&store, &source, &NoDelay)));

    assert_eq!(source.calls(), 1);
    assert!(dom.has_class(&page.error, "hidden"));
    let html = dom.inner_html(page.content);
    assert_eq!(html.matches("<article").count(), 3);
    assert!(html.contains("Strings everywhere"));
    assert!(html.contains("7 min read"));
    assert!(!html.contains("7.0"));

    let cached = store.get(CACHE_KEY).unwrap().expect("collection cached");
    assert_eq!(serde_json::from_str::<Value>(&cached).unwrap(), body);
}

#[test]
fn valid_cache_skips_the_network_and_renders_one_page() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::with_entry(CACHE_KEY, &numbered_feed(12));
    let source = Scripted::new(vec![]);
    let mut list = controller(&dom, &page);

    assert!(block_on(list.init(&store, &source, &NoDelay)));

    assert_eq!(source.calls(), 0);
    assert_eq!(list.state().working().len(), 12);
    let html = dom.inner_html(page.content);
    assert_eq!(html.matches("<article").count(), 10);
    assert!(html.contains("Post 10"));
    assert!(!html.contains("Post 11"));
}

#[test]
fn fetched_collection_round_trips_through_the_cache() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::default();
    let source = Scripted::new(vec![Ok(HttpResponse::new(200, feed().to_string()))]);
    let mut list = controller(&dom, &page);

    assert!(block_on(list.init(&store, &source, &NoDelay)));

    let cached = store.get(CACHE_KEY).unwrap().expect("collection cached");
    assert_eq!(serde_json::from_str::<Value>(&cached).unwrap(), feed());

    let again = Scripted::new(vec![]);
    let mut second = controller(&dom, &page);
    assert!(block_on(second.init(&store, &again, &NoDelay)));
    assert_eq!(again.calls(), 0);
    assert_eq!(second.state().items(), list.state().items());
}

#[test]
fn retries_until_the_feed_answers() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::default();
    let source = Scripted::new(vec![
        Ok(HttpResponse::new(503, "")),
        Err(BlogfrontError::Network("connection reset".to_string())),
        Ok(HttpResponse::new(200, feed().to_string())),
    ]);
    let mut list = controller(&dom, &page);

    assert!(block_on(list.init(&store, &source, &NoDelay)));

    assert_eq!(source.calls(), 3);
    assert!(dom.has_class(&page.error, "hidden"));
    assert!(dom.has_class(&page.loading, "hidden"));
    assert_eq!(list.state().items().len(), 4);
}

#[test]
fn cache_write_failure_still_shows_the_list() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::default();
    store.reject_writes(true);
    let source = Scripted::new(vec![Ok(HttpResponse::new(200, feed().to_string()))]);
    let mut list = controller(&dom, &page);

    assert!(block_on(list.init(&store, &source, &NoDelay)));
    assert_eq!(dom.inner_html(page.content).matches("<article").count(), 4);
    assert_eq!(store.get(CACHE_KEY).unwrap(), None);
}

#[test]
fn controls_are_bound_after_a_successful_load() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::with_entry(CACHE_KEY, &feed().to_string());
    let mut list = controller(&dom, &page);

    assert!(list.controls().is_none());
    assert!(block_on(list.init(&store, &Scripted::new(vec![]), &NoDelay)));

    let controls = list.controls().expect("controls bound");
    assert_eq!(controls.sort, Some(page.sort));
    assert!(controls.filter.is_some());
    assert!(controls.search.is_some());
}

#[test]
fn sorts_replace_each_other_over_the_full_collection() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::with_entry(CACHE_KEY, &feed().to_string());
    let mut list = controller(&dom, &page);
    assert!(block_on(list.init(&store, &Scripted::new(vec![]), &NoDelay)));

    list.on_sort_change("date");
    assert_eq!(
        titles(list.state().working()),
        vec!["Ruby gems", "Rust ownership", "Async in practice", "Rusty tools"]
    );

    list.on_sort_change("reading_time");
    assert_eq!(
        titles(list.state().working()),
        vec!["Ruby gems", "Rust ownership", "Rusty tools", "Async in practice"]
    );

    list.on_sort_change("category");
    assert_eq!(
        titles(list.state().working()),
        vec!["Ruby gems", "Rust ownership", "Async in practice", "Rusty tools"]
    );
}

#[test]
fn filter_keeps_matches_in_original_order() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::with_entry(CACHE_KEY, &feed().to_string());
    let mut list = controller(&dom, &page);
    assert!(block_on(list.init(&store, &Scripted::new(vec![]), &NoDelay)));

    list.on_sort_change("date");
    list.on_filter_change("rust");
    assert_eq!(
        titles(list.state().working()),
        vec!["Rust ownership", "Ruby gems", "Async in practice"]
    );

    list.on_filter_change("");
    assert_eq!(list.state().working().len(), 4);
}

#[test]
fn search_matches_titles_and_shows_the_placeholder_when_empty() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::with_entry(CACHE_KEY, &feed().to_string());
    let mut list = controller(&dom, &page);
    assert!(block_on(list.init(&store, &Scripted::new(vec![]), &NoDelay)));

    list.on_search_input("RUST");
    assert_eq!(titles(list.state().working()), vec!["Rust ownership", "Rusty tools"]);

    list.on_search_input("haskell");
    assert!(list.state().working().is_empty());
    let html = dom.inner_html(page.content);
    assert!(html.contains("No blogs found"));
    assert!(!html.contains("<article"));

    list.on_search_input("");
    assert_eq!(list.state().working().len(), 4);
}

#[test]
fn unknown_sort_value_keeps_the_current_view() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::with_entry(CACHE_KEY, &feed().to_string());
    let mut list = controller(&dom, &page);
    assert!(block_on(list.init(&store, &Scripted::new(vec![]), &NoDelay)));

    list.on_filter_change("ruby");
    list.on_sort_change("popularity");

    assert_eq!(list.state().transform(), &ViewTransform::Filtered("ruby".to_string()));
    assert_eq!(titles(list.state().working()), vec!["Ruby gems"]);
}

#[test]
fn late_response_replaces_the_current_view() {
    let dom = MemoryDom::new();
    let page = build_page(&dom);
    let store = MemoryStore::with_entry(CACHE_KEY, &feed().to_string());
    let mut list = controller(&dom, &page);
    assert!(block_on(list.init(&store, &Scripted::new(vec![]), &NoDelay)));
    list.on_search_input("rust");

    let late: Vec<Record> = serde_json::from_str(&numbered_feed(3)).unwrap();
    assert!(list.complete(Ok(LoadOutcome {
        records: late,
        origin: Origin::Network,
        attempts: 1,
    })));

    assert_eq!(list.state().transform(), &ViewTransform::None);
    assert_eq!(titles(list.state().working()), vec!["Post 1", "Post 2", "Post 3"]);
}

#[test]
fn search_burst_runs_one_search_with_the_last_value() {
    // Scheduled tasks must be 'static, so the document lives for the test run.
    let dom: &'static MemoryDom = Box::leak(Box::new(MemoryDom::new()));
    let page = build_page(dom);
    let store = MemoryStore::with_entry(CACHE_KEY, &feed().to_string());
    let list = Rc::new(RefCell::new(controller(dom, &page)));
    assert!(block_on(list.borrow_mut().init(&store, &Scripted::new(vec![]), &NoDelay)));

    let clock = VirtualScheduler::new();
    let mut debouncer = Debouncer::new(&clock, 250);
    let searches = Rc::new(Cell::new(0));

    for query in ["r", "ru", "rus"] {
        let list = Rc::clone(&list);
        let searches = Rc::clone(&searches);
        debouncer.call(move || {
            searches.set(searches.get() + 1);
            list.borrow_mut().on_search_input(query);
        });
        clock.advance(100);
    }

    assert_eq!(searches.get(), 0);
    assert_eq!(list.borrow().state().transform(), &ViewTransform::None);

    clock.advance(250);

    assert_eq!(searches.get(), 1);
    assert_eq!(
        list.borrow().state().transform(),
        &ViewTransform::Searched("rus".to_string())
    );
    assert_eq!(
        titles(list.borrow().state().working()),
        vec!["Rust ownership", "Rusty tools"]
    );
}
