use api_types::ResourceId;

use crate::{
    error::ClientError,
    notify::Notifier,
    resource::{CrudApi, Resource},
    table::RowAction,
};

/// Which collection the list is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Active,
    Deleted,
}

impl Tab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Deleted => "Recently Deleted",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Active => Self::Deleted,
            Self::Deleted => Self::Active,
        }
    }

    pub fn row_actions(self) -> &'static [RowAction] {
        match self {
            Self::Active => &[RowAction::Edit, RowAction::Delete],
            Self::Deleted => &[RowAction::Restore],
        }
    }
}

/// Identifies one list fetch. Only the ticket of the most recent fetch is accepted back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    tab: Tab,
    seq: u64,
}

impl LoadTicket {
    pub fn tab(&self) -> Tab {
        self.tab
    }
}

/// Active and soft-deleted collections of one resource type.
///
/// Mutations are applied only after the backend confirms them; every failure becomes an error
/// notification with a fixed message.
#[derive(Debug)]
pub struct EntityList<R> {
    active: Vec<R>,
    deleted: Vec<R>,
    tab: Tab,
    loading: bool,
    seq: u64,
    in_flight: Option<LoadTicket>,
    selected: usize,
}

impl<R> Default for EntityList<R> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            deleted: Vec::new(),
            tab: Tab::Active,
            loading: false,
            seq: 0,
            in_flight: None,
            selected: 0,
        }
    }
}

impl<R: Resource> EntityList<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[R] {
        &self.active
    }

    pub fn deleted(&self) -> &[R] {
        &self.deleted
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Collection of the selected tab.
    pub fn visible(&self) -> &[R] {
        match self.tab {
            Tab::Active => &self.active,
            Tab::Deleted => &self.deleted,
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&R> {
        self.visible().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    /// Marks the list as loading and hands out the ticket for the fetch of the current tab.
    /// Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.seq += 1;
        let ticket = LoadTicket {
            tab: self.tab,
            seq: self.seq,
        };
        self.in_flight = Some(ticket);
        self.loading = true;
        ticket
    }

    /// Applies the outcome of the fetch identified by `ticket`.
    ///
    /// Returns `false` and changes nothing when a newer fetch has been started since.
    /// Otherwise the loading flag is cleared whether the fetch succeeded or not.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<R>, ClientError>,
        notifier: &mut Notifier,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!(
                resource = R::DESCRIPTOR.path,
                seq = ticket.seq,
                "dropping stale list response"
            );
            return false;
        }
        self.in_flight = None;
        self.loading = false;

        match result {
            Ok(items) => {
                match ticket.tab {
                    Tab::Active => self.active = items,
                    Tab::Deleted => self.deleted = items,
                }
                self.clamp_selection();
            }
            Err(err) => {
                tracing::warn!(resource = R::DESCRIPTOR.path, "list fetch failed: {err}");
                notifier.error(format!(
                    "Failed to fetch {}",
                    R::DESCRIPTOR.plural_noun()
                ));
            }
        }
        true
    }

    /// Fetches the collection of the selected tab.
    pub async fn refresh<A: CrudApi<R>>(&mut self, api: &A, notifier: &mut Notifier) {
        let ticket = self.begin_load();
        let result = match ticket.tab {
            Tab::Active => api.list().await,
            Tab::Deleted => api.list_deleted().await,
        };
        self.finish_load(ticket, result, notifier);
    }

    /// Switches tab and fetches its collection. Selecting the current tab does nothing.
    pub async fn select_tab<A: CrudApi<R>>(&mut self, tab: Tab, api: &A, notifier: &mut Notifier) {
        if tab == self.tab {
            return;
        }
        self.tab = tab;
        self.selected = 0;
        self.refresh(api, notifier).await;
    }

    /// Appends a resource the backend just created.
    pub fn push_created(&mut self, item: R) {
        self.active.push(item);
    }

    /// Merges confirmed draft fields into the matching active element.
    pub fn apply_update(&mut self, id: &ResourceId, draft: &R::Draft) -> bool {
        match self.active.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.apply_draft(draft);
                true
            }
            None => false,
        }
    }

    pub async fn soft_delete<A: CrudApi<R>>(
        &mut self,
        id: &ResourceId,
        api: &A,
        notifier: &mut Notifier,
    ) -> bool {
        let d = R::DESCRIPTOR;
        match api.soft_delete(id).await {
            Ok(()) => {
                self.active.retain(|item| item.id() != id);
                self.clamp_selection();
                notifier.success(format!("{} deleted successfully", d.label));
                true
            }
            Err(err) => {
                tracing::warn!(resource = d.path, %id, "soft delete failed: {err}");
                notifier.error(format!("Failed to delete {}", d.noun()));
                false
            }
        }
    }

    /// Restores a soft-deleted resource.
    ///
    /// The row leaves the deleted collection only; the active collection picks it up on its
    /// next fetch, which happens every time the Active tab is selected.
    pub async fn restore<A: CrudApi<R>>(
        &mut self,
        id: &ResourceId,
        api: &A,
        notifier: &mut Notifier,
    ) -> bool {
        let d = R::DESCRIPTOR;
        match api.restore(id).await {
            Ok(()) => {
                self.deleted.retain(|item| item.id() != id);
                self.clamp_selection();
                notifier.success(format!("{} restored successfully", d.label));
                true
            }
            Err(err) => {
                tracing::warn!(resource = d.path, %id, "restore failed: {err}");
                notifier.error(format!("Failed to restore {}", d.noun()));
                false
            }
        }
    }
}
