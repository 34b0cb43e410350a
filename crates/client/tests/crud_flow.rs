//! List state and form controller driven through an in-memory backend.
use std::cell::{Cell, RefCell};

use api_types::{Currency, ResourceId, category::Category, goal::Goal, wallet::Wallet};
use chrono::NaiveDate;
use client::{
    ClientError, CrudApi, CrudForm, EntityList, FormMode, Notifier, Resource, Severity,
    SubmitOutcome, Tab, validation::fields,
};
use rust_decimal::Decimal;

/// Keeps active and deleted rows in memory and counts every call.
struct FakeApi<R> {
    active: RefCell<Vec<R>>,
    deleted: RefCell<Vec<R>>,
    next_id: Cell<u32>,
    calls: Cell<usize>,
    fail: Cell<bool>,
}

impl<R: Resource> FakeApi<R> {
    fn new(active: Vec<R>, deleted: Vec<R>) -> Self {
        Self {
            active: RefCell::new(active),
            deleted: RefCell::new(deleted),
            next_id: Cell::new(100),
            calls: Cell::new(0),
            fail: Cell::new(false),
        }
    }

    fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    fn hit(&self) -> Result<(), ClientError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail.get() {
            Err(ClientError::Server {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: "boom".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn take(rows: &RefCell<Vec<R>>, id: &ResourceId) -> Result<R, ClientError> {
        let mut rows = rows.borrow_mut();
        let pos = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or(ClientError::NotFound)?;
        Ok(rows.remove(pos))
    }
}

impl<R: Resource> CrudApi<R> for FakeApi<R> {
    async fn list(&self) -> Result<Vec<R>, ClientError> {
        self.hit()?;
        Ok(self.active.borrow().clone())
    }

    async fn list_deleted(&self) -> Result<Vec<R>, ClientError> {
        self.hit()?;
        Ok(self.deleted.borrow().clone())
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, ClientError> {
        self.hit()?;
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let item = R::from_draft(ResourceId::from(id.to_string()), draft);
        self.active.borrow_mut().push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: &ResourceId, draft: &R::Draft) -> Result<R, ClientError> {
        self.hit()?;
        let mut rows = self.active.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(ClientError::NotFound)?;
        row.apply_draft(draft);
        Ok(row.clone())
    }

    async fn soft_delete(&self, id: &ResourceId) -> Result<(), ClientError> {
        self.hit()?;
        let row = Self::take(&self.active, id)?;
        self.deleted.borrow_mut().push(row);
        Ok(())
    }

    async fn restore(&self, id: &ResourceId) -> Result<(), ClientError> {
        self.hit()?;
        let row = Self::take(&self.deleted, id)?;
        self.active.borrow_mut().push(row);
        Ok(())
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 10).unwrap()
}

fn wallet(id: &str, name: &str) -> Wallet {
    Wallet {
        id: id.into(),
        name: name.to_string(),
        balance: Decimal::new(50, 0),
        currency: Currency::Vnd,
    }
}

fn goal(id: &str, name: &str) -> Goal {
    Goal {
        id: id.into(),
        name: name.to_string(),
        target_amount: Decimal::new(1000, 0),
        saved_amount: Decimal::new(100, 0),
        deadline: NaiveDate::from_ymd_opt(2026, 12, 1),
    }
}

fn message(notifier: &Notifier) -> Option<(&str, Severity)> {
    notifier
        .current()
        .map(|n| (n.message.as_str(), n.severity))
}

#[tokio::test]
async fn creating_a_wallet_appends_it_and_notifies() {
    let api = FakeApi::<Wallet>::empty();
    let mut list = EntityList::new();
    let mut form = CrudForm::new();
    let mut notifier = Notifier::new();

    list.refresh(&api, &mut notifier).await;
    assert!(list.active().is_empty());

    form.open_create();
    assert_eq!(form.mode(), &FormMode::Creating);
    form.set_input(fields::NAME, "Cash");
    form.set_input(fields::BALANCE, "100");
    form.set_input(fields::CURRENCY, "USD");

    let outcome = form.submit(&mut list, &api, &mut notifier, today()).await;
    assert_eq!(outcome, SubmitOutcome::Saved);
    assert!(!form.is_open());

    let active = list.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Cash");
    assert_eq!(active[0].balance, Decimal::new(100, 0));
    assert_eq!(active[0].currency, Currency::Usd);
    assert!(!active[0].id.as_str().is_empty());
    assert_eq!(
        message(&notifier),
        Some(("Wallet created successfully", Severity::Success))
    );
}

#[tokio::test]
async fn past_goal_deadline_never_reaches_the_backend() {
    let api = FakeApi::<Goal>::empty();
    let mut list = EntityList::new();
    let mut form = CrudForm::new();
    let mut notifier = Notifier::new();

    form.open_create();
    form.set_input(fields::NAME, "Trip");
    form.set_input(fields::TARGET_AMOUNT, "2000");
    form.set_input(fields::DEADLINE, "2026-06-09");

    let outcome = form.submit(&mut list, &api, &mut notifier, today()).await;
    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(api.calls.get(), 0);
    assert_eq!(
        form.field_error(fields::DEADLINE),
        Some("Deadline must be in the future")
    );
    assert!(form.is_open());
    assert!(notifier.current().is_none());
}

#[tokio::test]
async fn duplicate_name_is_caught_before_submit() {
    let api = FakeApi::new(vec![wallet("1", "Cash")], Vec::new());
    let mut list = EntityList::new();
    let mut form = CrudForm::new();
    let mut notifier = Notifier::new();
    list.refresh(&api, &mut notifier).await;
    let calls = api.calls.get();

    form.open_create();
    form.set_input(fields::NAME, "Cash");
    let outcome = form.submit(&mut list, &api, &mut notifier, today()).await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(api.calls.get(), calls);
    assert_eq!(
        form.field_error(fields::NAME),
        Some("Wallet name already exists")
    );
}

#[tokio::test]
async fn trailing_spaces_do_not_slip_past_the_duplicate_check() {
    let api = FakeApi::new(vec![wallet("1", "Cash")], Vec::new());
    let mut list = EntityList::new();
    let mut form = CrudForm::new();
    let mut notifier = Notifier::new();
    list.refresh(&api, &mut notifier).await;
    let calls = api.calls.get();

    form.open_create();
    form.set_input(fields::NAME, "Cash ");
    let outcome = form.submit(&mut list, &api, &mut notifier, today()).await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(api.calls.get(), calls);
    let names: Vec<_> = list.active().iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["Cash"]);
}

#[tokio::test]
async fn edited_names_are_stored_trimmed() {
    let api = FakeApi::new(vec![wallet("1", "Cash")], Vec::new());
    let mut list = EntityList::new();
    let mut form = CrudForm::new();
    let mut notifier = Notifier::new();
    list.refresh(&api, &mut notifier).await;

    let cash = list.active()[0].clone();
    form.open_edit(&cash);
    form.set_input(fields::NAME, "  Bank ");
    let outcome = form.submit(&mut list, &api, &mut notifier, today()).await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(list.active()[0].name, "Bank");
    assert_eq!(api.active.borrow()[0].name, "Bank");
}

#[tokio::test]
async fn created_rows_are_appended_exactly_once() {
    let api = FakeApi::new(vec![wallet("1", "A"), wallet("2", "B")], Vec::new());
    let mut list = EntityList::new();
    let mut form = CrudForm::new();
    let mut notifier = Notifier::new();
    list.refresh(&api, &mut notifier).await;

    form.open_create();
    form.set_input(fields::NAME, "C");
    form.submit(&mut list, &api, &mut notifier, today()).await;

    let names: Vec<_> = list.active().iter().map(|w| w.name.as_str()).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[tokio::test]
async fn edit_merges_into_the_existing_row() {
    let api = FakeApi::new(vec![goal("1", "Laptop"), goal("2", "Car")], Vec::new());
    let mut list = EntityList::new();
    let mut form = CrudForm::new();
    let mut notifier = Notifier::new();
    list.refresh(&api, &mut notifier).await;

    let laptop = list.active()[0].clone();
    form.open_edit(&laptop);
    form.set_input(fields::SAVED_AMOUNT, "400");
    let outcome = form.submit(&mut list, &api, &mut notifier, today()).await;

    assert_eq!(outcome, SubmitOutcome::Saved);
    let updated = &list.active()[0];
    assert_eq!(updated.name, "Laptop");
    assert_eq!(updated.saved_amount, Decimal::new(400, 0));
    assert_eq!(updated.target_amount, Decimal::new(1000, 0));
    assert_eq!(list.active().len(), 2);
    assert_eq!(
        message(&notifier),
        Some(("Goal updated successfully", Severity::Success))
    );
}

#[tokio::test]
async fn failed_save_keeps_the_form_open() {
    let api = FakeApi::<Category>::empty();
    let mut list = EntityList::new();
    let mut form = CrudForm::new();
    let mut notifier = Notifier::new();

    form.open_create();
    form.set_input(fields::NAME, "Rent");
    api.fail.set(true);
    let outcome = form.submit(&mut list, &api, &mut notifier, today()).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert!(form.is_open());
    assert!(!form.is_pending());
    assert_eq!(form.draft().name, "Rent");
    assert!(list.active().is_empty());
    assert_eq!(
        message(&notifier),
        Some(("Failed to save category", Severity::Error))
    );

    api.fail.set(false);
    let outcome = form.submit(&mut list, &api, &mut notifier, today()).await;
    assert_eq!(outcome, SubmitOutcome::Saved);
    assert_eq!(list.active().len(), 1);
}

#[tokio::test]
async fn delete_removes_exactly_one_row() {
    let api = FakeApi::new(
        vec![wallet("1", "A"), wallet("2", "B"), wallet("3", "C")],
        Vec::new(),
    );
    let mut list = EntityList::new();
    let mut notifier = Notifier::new();
    list.refresh(&api, &mut notifier).await;

    assert!(list.soft_delete(&"2".into(), &api, &mut notifier).await);
    assert_eq!(list.active().len(), 2);
    assert!(list.active().iter().all(|w| w.id.as_str() != "2"));
    assert_eq!(
        message(&notifier),
        Some(("Wallet deleted successfully", Severity::Success))
    );

    assert!(!list.soft_delete(&"2".into(), &api, &mut notifier).await);
    assert_eq!(list.active().len(), 2);
    assert_eq!(
        message(&notifier),
        Some(("Failed to delete wallet", Severity::Error))
    );
}

#[tokio::test]
async fn restore_leaves_the_active_list_to_the_next_fetch() {
    let api = FakeApi::new(vec![goal("1", "Laptop")], vec![goal("2", "Car")]);
    let mut list = EntityList::new();
    let mut notifier = Notifier::new();

    list.refresh(&api, &mut notifier).await;
    list.select_tab(Tab::Deleted, &api, &mut notifier).await;
    assert_eq!(list.visible().len(), 1);

    assert!(list.restore(&"2".into(), &api, &mut notifier).await);
    assert!(list.deleted().is_empty());
    assert_eq!(list.active().len(), 1);
    assert_eq!(
        message(&notifier),
        Some(("Goal restored successfully", Severity::Success))
    );

    list.select_tab(Tab::Active, &api, &mut notifier).await;
    let names: Vec<_> = list.active().iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["Laptop", "Car"]);
}

#[tokio::test]
async fn selecting_the_current_tab_does_not_refetch() {
    let api = FakeApi::<Category>::empty();
    let mut list = EntityList::new();
    let mut notifier = Notifier::new();

    list.select_tab(Tab::Active, &api, &mut notifier).await;
    assert_eq!(api.calls.get(), 0);
}

#[tokio::test]
async fn failed_fetch_clears_loading_and_reports() {
    let api = FakeApi::new(vec![goal("1", "Laptop")], Vec::new());
    let mut list = EntityList::new();
    let mut notifier = Notifier::new();

    api.fail.set(true);
    list.refresh(&api, &mut notifier).await;
    assert!(!list.is_loading());
    assert!(list.active().is_empty());
    assert_eq!(
        message(&notifier),
        Some(("Failed to fetch goals", Severity::Error))
    );
}

#[tokio::test]
async fn stale_fetch_does_not_overwrite_the_newer_one() {
    let api = FakeApi::new(vec![wallet("1", "A")], vec![wallet("9", "Z")]);
    let mut list = EntityList::<Wallet>::new();
    let mut notifier = Notifier::new();

    let stale = list.begin_load();
    let stale_result = api.list().await;
    list.select_tab(Tab::Deleted, &api, &mut notifier).await;

    assert!(!list.finish_load(stale, stale_result, &mut notifier));
    assert!(list.active().is_empty());
    assert_eq!(list.deleted().len(), 1);
    assert!(!list.is_loading());
}
