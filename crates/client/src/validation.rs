//! Client-side validation run before every submit.
//!
//! Rules are pure: they look only at the draft, the active collection (for name uniqueness),
//! the id being edited, and today's date. Nothing here touches the network.
use std::collections::BTreeMap;

use api_types::{ResourceId, category::Category, goal::Goal, wallet::Wallet};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    categories::CategoryDraft, goals::GoalDraft, resource::Resource, wallets::WalletDraft,
};

/// Wire names of the validated fields, used as error keys.
pub mod fields {
    pub const NAME: &str = "name";
    pub const BALANCE: &str = "balance";
    pub const CURRENCY: &str = "currency";
    pub const TARGET_AMOUNT: &str = "target_amount";
    pub const SAVED_AMOUNT: &str = "saved_amount";
    pub const DEADLINE: &str = "deadline";
}

/// Per-field error messages. Empty means the draft may be submitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` for `field` unless that field already has an error.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn extend(&mut self, other: &FieldErrors) {
        for (field, message) in &other.0 {
            self.insert(*field, message.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

fn check_name<R: Resource>(
    errors: &mut FieldErrors,
    name: &str,
    active: &[R],
    editing: Option<&ResourceId>,
) {
    let label = R::DESCRIPTOR.label;
    // Compared as sent: request bodies carry the trimmed name.
    let name = name.trim();
    if name.is_empty() {
        errors.insert(fields::NAME, format!("{label} name is required"));
        return;
    }
    let taken = active
        .iter()
        .any(|other| other.name().trim() == name && Some(other.id()) != editing);
    if taken {
        errors.insert(fields::NAME, format!("{label} name already exists"));
    }
}

pub fn validate_wallet(
    draft: &WalletDraft,
    active: &[Wallet],
    editing: Option<&ResourceId>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, &draft.name, active, editing);
    // The balance is only entered at creation time.
    if editing.is_none() && draft.balance < Decimal::ZERO {
        errors.insert(fields::BALANCE, "Balance cannot be negative");
    }
    errors
}

pub fn validate_category(
    draft: &CategoryDraft,
    active: &[Category],
    editing: Option<&ResourceId>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, &draft.name, active, editing);
    errors
}

pub fn validate_goal(
    draft: &GoalDraft,
    active: &[Goal],
    editing: Option<&ResourceId>,
    today: NaiveDate,
) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_name(&mut errors, &draft.name, active, editing);

    match draft.target_amount {
        Some(target) if target > Decimal::ZERO => {}
        _ => errors.insert(
            fields::TARGET_AMOUNT,
            "Target amount is required and must be greater than 0",
        ),
    }

    if draft.saved_amount < Decimal::ZERO {
        errors.insert(fields::SAVED_AMOUNT, "Saved amount cannot be negative");
    }

    match draft.deadline {
        None => errors.insert(fields::DEADLINE, "Deadline is required"),
        Some(deadline) if deadline < today => {
            errors.insert(fields::DEADLINE, "Deadline must be in the future")
        }
        Some(_) => {}
    }

    errors
}
