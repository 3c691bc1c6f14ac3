//! List region controller.
//!
//! Owns the [`ListState`] of one `.blog-list` container and the handles of the
//! elements inside it. Events go through [`handle_event`]; the returned actions
//! are executed against the [`Dom`] and the list body is re-rendered on request.
//!
//! # Load lifecycle
//!
//! ```text
//! begin()  → loading shown
//! LoadRequest::run(..).await   (no controller borrow held)
//! complete(result)
//!   Ok  → collection set, controls bound, list rendered, loading hidden
//!   Err → "Error: {message}" shown, loading hidden, controls never bound
//! ```

use super::handler::{handle_event, Event};
use super::state::{ListState, ViewOptions};
use super::Action;
use crate::dom::Dom;
use crate::domain::error::Result;
use crate::fetch::{DataSource, LoadOutcome, LoadRequest, Sleeper};
use crate::storage::KeyValueStore;
use crate::ui::{render_list, Theme};

/// Element handles inside the list container. Any of them may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ListElements<N> {
    /// `.blog-list-content`
    pub content: Option<N>,
    /// `.loading-indicator`
    pub loading: Option<N>,
    /// `.error-container`
    pub error: Option<N>,
}

/// Control handles resolved by [`Action::BindControls`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListControls<N> {
    /// `.sort-select`
    pub sort: Option<N>,
    /// `.filter-select`
    pub filter: Option<N>,
    /// `.search-input`
    pub search: Option<N>,
}

/// Controller for one list container.
#[derive(Debug)]
pub struct ListController<D: Dom> {
    dom: D,
    container: D::Node,
    elements: ListElements<D::Node>,
    controls: Option<ListControls<D::Node>>,
    state: ListState,
    theme: Theme,
    request: LoadRequest,
}

impl<D: Dom> ListController<D> {
    /// Resolves the container's child elements. Nothing is shown or fetched yet.
    pub fn new(
        dom: D,
        container: D::Node,
        options: ViewOptions,
        request: LoadRequest,
        theme: Theme,
    ) -> Self {
        let elements = ListElements {
            content: dom.query(Some(&container), ".blog-list-content"),
            loading: dom.query(Some(&container), ".loading-indicator"),
            error: dom.query(Some(&container), ".error-container"),
        };

        tracing::debug!(
            has_content = elements.content.is_some(),
            has_loading = elements.loading.is_some(),
            has_error = elements.error.is_some(),
            "list controller created"
        );

        Self {
            dom,
            container,
            elements,
            controls: None,
            state: ListState::new(options),
            theme,
            request,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    #[must_use]
    pub const fn container(&self) -> &D::Node {
        &self.container
    }

    #[must_use]
    pub const fn elements(&self) -> &ListElements<D::Node> {
        &self.elements
    }

    /// Resolved controls, present only after a successful load.
    #[must_use]
    pub const fn controls(&self) -> Option<&ListControls<D::Node>> {
        self.controls.as_ref()
    }

    /// The load this controller performs on start.
    #[must_use]
    pub const fn request(&self) -> &LoadRequest {
        &self.request
    }

    /// Shows the loading indicator.
    pub fn begin(&mut self) {
        self.dispatch(&Event::LoadStarted);
    }

    /// Applies the outcome of the load started by [`ListController::begin`].
    ///
    /// Returns `true` when the collection was loaded.
    pub fn complete(&mut self, result: Result<LoadOutcome>) -> bool {
        match result {
            Ok(outcome) => {
                tracing::info!(
                    origin = ?outcome.origin,
                    count = outcome.records.len(),
                    attempts = outcome.attempts,
                    "blogs loaded"
                );
                self.dispatch(&Event::LoadSucceeded(outcome.records));
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load blogs");
                self.dispatch(&Event::LoadFailed(e.to_string()));
                false
            }
        }
    }

    /// Runs the whole lifecycle in one call.
    ///
    /// Borrows the controller across the await, so it suits hosts where nothing
    /// else can reach it meanwhile. The browser shim uses `begin`/`complete`.
    pub async fn init<S, Src, Sl>(&mut self, store: S, source: &Src, sleeper: &Sl) -> bool
    where
        S: KeyValueStore,
        Src: DataSource + ?Sized,
        Sl: Sleeper + ?Sized,
    {
        self.begin();
        let request = self.request.clone();
        let result = request.run(store, source, sleeper).await;
        self.complete(result)
    }

    pub fn on_sort_change(&mut self, value: &str) {
        self.dispatch(&Event::SortChanged(value.to_string()));
    }

    pub fn on_filter_change(&mut self, value: &str) {
        self.dispatch(&Event::FilterChanged(value.to_string()));
    }

    /// Applies a search immediately. Debouncing is the caller's job.
    pub fn on_search_input(&mut self, value: &str) {
        self.dispatch(&Event::SearchChanged(value.to_string()));
    }

    /// Feeds one event through the handler, executes its actions, renders if
    /// asked. Returns whether a render happened.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.state, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled"
                );
                for action in &actions {
                    self.execute_action(action);
                }
                if should_render {
                    self.render();
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    pub fn execute_action(&mut self, action: &Action) {
        tracing::debug!(?action, "executing action");
        let hidden = self.theme.hidden.as_str();

        match action {
            Action::ShowLoading => {
                if let Some(loading) = &self.elements.loading {
                    self.dom.remove_classes(loading, hidden);
                }
            }
            Action::HideLoading => {
                if let Some(loading) = &self.elements.loading {
                    self.dom.add_classes(loading, hidden);
                }
            }
            Action::ShowError(message) => {
                if let Some(error) = &self.elements.error {
                    self.dom.remove_classes(error, hidden);
                    self.dom.set_text(error, &format!("Error: {message}"));
                }
            }
            Action::BindControls => {
                let controls = ListControls {
                    sort: self.dom.query(Some(&self.container), ".sort-select"),
                    filter: self.dom.query(Some(&self.container), ".filter-select"),
                    search: self.dom.query(Some(&self.container), ".search-input"),
                };
                self.controls = Some(controls);
            }
        }
    }

    /// Writes the visible slice into `.blog-list-content`.
    pub fn render(&self) {
        let Some(content) = &self.elements.content else {
            tracing::debug!("no list body to render into");
            return;
        };

        let vm = self.state.compute_viewmodel();
        tracing::debug!(
            rendered = vm.items.len(),
            working = self.state.working().len(),
            page = self.state.page(),
            "rendering list"
        );
        self.dom.set_inner_html(content, &render_list(&vm, &self.theme));
    }
}
