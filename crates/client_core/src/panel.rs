//! Mounting: binds a view-model to a view and keeps the view in sync.

use std::sync::Arc;

use futures::{stream, StreamExt};
use shared::domain::{Catalog, MailingListKey};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::{Collaborators, NotificationsError, NotificationsViewModel, StatusMessage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckboxState {
    pub key: MailingListKey,
    pub checked: bool,
}

/// The mount point: a checkbox group plus a status banner.
pub trait NotificationsView: Send + Sync + 'static {
    fn render_checkboxes(&self, checkboxes: &[CheckboxState]);
    fn render_status(&self, status: &StatusMessage);
}

enum Change {
    Subscribed,
    Status(StatusMessage),
}

pub struct NotificationsPanel {
    view_model: Arc<NotificationsViewModel>,
    initial_load: Option<JoinHandle<Result<(), NotificationsError>>>,
    render_task: JoinHandle<()>,
}

impl NotificationsPanel {
    /// Renders `view` once, keeps it in sync with the view-model and starts
    /// loading the current subscriptions. Must be called inside a tokio
    /// runtime.
    pub fn mount<V: NotificationsView>(
        view: Arc<V>,
        catalog: Catalog,
        collaborators: Collaborators,
    ) -> Self {
        let view_model = NotificationsViewModel::new(catalog, collaborators);

        // Subscribe before the first render so no change slips in between.
        let changes = stream::select(
            view_model
                .subscribed_observable()
                .changes()
                .map(|_| Change::Subscribed),
            view_model.status_observable().changes().map(Change::Status),
        );
        view.render_checkboxes(&view_model.checkboxes());
        view.render_status(&view_model.status());

        let render_task = tokio::spawn(run_render_loop(
            Arc::clone(&view_model),
            view,
            changes,
        ));

        let loader = Arc::clone(&view_model);
        let initial_load = tokio::spawn(async move { loader.load().await });

        Self {
            view_model,
            initial_load: Some(initial_load),
            render_task,
        }
    }

    pub fn view_model(&self) -> &Arc<NotificationsViewModel> {
        &self.view_model
    }

    /// Waits for the initial load. Later calls return `Ok(())` immediately.
    pub async fn loaded(&mut self) -> Result<(), NotificationsError> {
        let Some(handle) = self.initial_load.take() else {
            return Ok(());
        };
        handle
            .await
            .map_err(|e| NotificationsError::TaskStopped(e.to_string()))?
    }
}

impl Drop for NotificationsPanel {
    fn drop(&mut self) {
        self.render_task.abort();
    }
}

async fn run_render_loop<V, S>(view_model: Arc<NotificationsViewModel>, view: Arc<V>, changes: S)
where
    V: NotificationsView,
    S: stream::Stream<Item = Change> + Send,
{
    tokio::pin!(changes);
    while let Some(change) = changes.next().await {
        match change {
            Change::Subscribed => view.render_checkboxes(&view_model.checkboxes()),
            Change::Status(status) => view.render_status(&status),
        }
    }
    debug!("notifications: render loop finished");
}
