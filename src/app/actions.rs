//! Side effects requested by the event handler.
//!
//! [`handle_event`](crate::app::handle_event) mutates [`ListState`] and returns
//! actions; the controller executes them against the document in order, then
//! re-renders when asked to.
//!
//! [`ListState`]: crate::app::ListState

/// Document effects outside the list body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Un-hides `.loading-indicator`.
    ShowLoading,

    /// Hides `.loading-indicator`. Emitted at the end of every load, success or
    /// failure.
    HideLoading,

    /// Un-hides `.error-container` and sets its text to `Error: {message}`.
    ShowError(String),

    /// Looks up the sort, filter and search controls so the host can attach
    /// listeners. Only emitted after a successful load.
    BindControls,
}
