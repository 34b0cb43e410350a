//! Modal create/edit form controller.
use std::{collections::BTreeMap, fmt, str::FromStr};

use api_types::ResourceId;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    list::EntityList,
    notify::Notifier,
    resource::{CrudApi, Resource},
    validation::FieldErrors,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Amount,
    Date,
    /// Fixed set of values, cycled rather than typed.
    Choice,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Shown when creating only.
    pub create_only: bool,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            kind,
            create_only: false,
        }
    }

    pub const fn create_only(mut self) -> Self {
        self.create_only = true;
        self
    }
}

/// Text-input view of a draft: the ordered field list and the conversion between raw input
/// and typed draft values.
pub trait DraftFields: Clone + fmt::Debug + Default {
    const FIELDS: &'static [FieldSpec];

    /// Current value of `key` as editable text.
    fn display(&self, key: &str) -> String;

    /// Parses `raw` into the field `key`. On error the draft is left untouched.
    fn parse_into(&mut self, key: &str, raw: &str) -> Result<(), String>;

    /// Steps a [`FieldKind::Choice`] field to its next or previous value.
    fn cycle(&mut self, _key: &str, _forward: bool) {}
}

/// Parses an amount typed by the user. Blank input is `None`; `,` separators are ignored.
pub fn parse_amount(raw: &str) -> Result<Option<Decimal>, String> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(&cleaned)
        .map(Some)
        .map_err(|_| "Enter a valid number".to_string())
}

/// Parses a `YYYY-MM-DD` date. Blank input is `None`.
pub fn parse_date(raw: &str) -> Result<Option<NaiveDate>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| "Use the YYYY-MM-DD format".to_string())
}

pub fn display_amount(amount: Decimal) -> String {
    amount.normalize().to_string()
}

pub fn display_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Closed,
    Creating,
    Editing(ResourceId),
}

impl FormMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to submit.
    Closed,
    /// A submit is already in flight.
    Busy,
    /// Field errors were found; nothing was sent.
    Invalid,
    Saved,
    /// The backend rejected the request; the form stays open.
    Failed,
}

/// Draft plus mode of the create/edit modal for one resource type.
#[derive(Debug)]
pub struct CrudForm<R: Resource> {
    mode: FormMode,
    draft: R::Draft,
    errors: FieldErrors,
    input_errors: FieldErrors,
    inputs: BTreeMap<&'static str, String>,
    pending: bool,
    focus: usize,
}

impl<R: Resource> Default for CrudForm<R> {
    fn default() -> Self {
        Self {
            mode: FormMode::Closed,
            draft: R::Draft::default(),
            errors: FieldErrors::new(),
            input_errors: FieldErrors::new(),
            inputs: BTreeMap::new(),
            pending: false,
            focus: 0,
        }
    }
}

impl<R: Resource> CrudForm<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_open()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut R::Draft {
        &mut self.draft
    }

    pub fn open_create(&mut self) {
        self.open(FormMode::Creating, R::Draft::default());
    }

    pub fn open_edit(&mut self, item: &R) {
        self.open(FormMode::Editing(item.id().clone()), item.to_draft());
    }

    fn open(&mut self, mode: FormMode, draft: R::Draft) {
        tracing::debug!(resource = R::DESCRIPTOR.path, ?mode, "form opened");
        self.mode = mode;
        self.draft = draft;
        self.errors.clear();
        self.input_errors.clear();
        self.pending = false;
        self.focus = 0;
        self.inputs = R::Draft::FIELDS
            .iter()
            .map(|field| (field.key, self.draft.display(field.key)))
            .collect();
    }

    /// Discards the draft and closes the modal.
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    /// Fields shown for the current mode, in display order.
    pub fn visible_fields(&self) -> Vec<&'static FieldSpec> {
        let editing = matches!(self.mode, FormMode::Editing(_));
        R::Draft::FIELDS
            .iter()
            .filter(|field| !(editing && field.create_only))
            .collect()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<&'static FieldSpec> {
        self.visible_fields().get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        let count = self.visible_fields().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.visible_fields().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    pub fn input_text(&self, key: &str) -> &str {
        self.inputs.get(key).map_or("", String::as_str)
    }

    /// Error to show under `key`: a parse error first, then a validation error.
    pub fn field_error(&self, key: &str) -> Option<&str> {
        self.input_errors.get(key).or_else(|| self.errors.get(key))
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Stores the raw text of `key` and parses it into the draft right away.
    pub fn set_input(&mut self, key: &'static str, raw: impl Into<String>) {
        let raw = raw.into();
        match self.draft.parse_into(key, &raw) {
            Ok(()) => self.input_errors.remove(key),
            Err(message) => {
                self.input_errors.remove(key);
                self.input_errors.insert(key, message);
            }
        }
        self.errors.remove(key);
        self.inputs.insert(key, raw);
    }

    pub fn push_char(&mut self, ch: char) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.kind == FieldKind::Choice {
            return;
        }
        let mut raw = self.input_text(field.key).to_string();
        raw.push(ch);
        self.set_input(field.key, raw);
    }

    pub fn pop_char(&mut self) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.kind == FieldKind::Choice {
            return;
        }
        let mut raw = self.input_text(field.key).to_string();
        raw.pop();
        self.set_input(field.key, raw);
    }

    pub fn cycle_focused(&mut self, forward: bool) {
        let Some(field) = self.focused_field() else {
            return;
        };
        if field.kind != FieldKind::Choice {
            return;
        }
        self.draft.cycle(field.key, forward);
        let shown = self.draft.display(field.key);
        self.inputs.insert(field.key, shown);
    }

    /// Validates the draft and, when it is clean, creates or updates it through `api`.
    ///
    /// Invalid drafts never reach the network and produce no notification. A backend failure
    /// keeps the form open with its draft so the user can retry.
    pub async fn submit<A: CrudApi<R>>(
        &mut self,
        list: &mut EntityList<R>,
        api: &A,
        notifier: &mut Notifier,
        today: NaiveDate,
    ) -> SubmitOutcome {
        let editing = match &self.mode {
            FormMode::Closed => return SubmitOutcome::Closed,
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id.clone()),
        };
        if self.pending {
            return SubmitOutcome::Busy;
        }

        let mut errors = self.input_errors.clone();
        errors.extend(&R::validate(
            &self.draft,
            list.active(),
            editing.as_ref(),
            today,
        ));
        if !errors.is_valid() {
            tracing::debug!(
                resource = R::DESCRIPTOR.path,
                fields = errors.len(),
                "submit blocked by field errors"
            );
            self.errors = errors;
            return SubmitOutcome::Invalid;
        }
        self.errors.clear();

        let d = R::DESCRIPTOR;
        self.pending = true;
        let result = match &editing {
            None => api.create(&self.draft).await.map(|item| {
                list.push_created(item);
                "created"
            }),
            Some(id) => api.update(id, &self.draft).await.map(|_| {
                list.apply_update(id, &self.draft);
                "updated"
            }),
        };
        self.pending = false;

        match result {
            Ok(verb) => {
                notifier.success(format!("{} {verb} successfully", d.label));
                self.cancel();
                SubmitOutcome::Saved
            }
            Err(err) => {
                tracing::warn!(resource = d.path, "save failed: {err}");
                notifier.error(format!("Failed to save {}", d.noun()));
                SubmitOutcome::Failed
            }
        }
    }
}
