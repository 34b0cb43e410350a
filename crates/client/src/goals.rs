use api_types::{
    ResourceId,
    goal::{Goal, GoalNew},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    form::{
        DraftFields, FieldKind, FieldSpec, display_amount, display_date, parse_amount, parse_date,
    },
    money,
    resource::{Descriptor, Resource},
    table::{Align, CellValue, Column},
    validation::{FieldErrors, fields, validate_goal},
};

/// Editable goal fields. `target_amount` and `deadline` stay empty until the user fills them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoalDraft {
    pub name: String,
    pub target_amount: Option<Decimal>,
    pub saved_amount: Decimal,
    pub deadline: Option<NaiveDate>,
}

impl DraftFields for GoalDraft {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new(fields::NAME, "Goal Name", FieldKind::Text),
        FieldSpec::new(fields::TARGET_AMOUNT, "Target Amount", FieldKind::Amount),
        FieldSpec::new(fields::SAVED_AMOUNT, "Saved Amount", FieldKind::Amount),
        FieldSpec::new(fields::DEADLINE, "Deadline (YYYY-MM-DD)", FieldKind::Date),
    ];

    fn display(&self, key: &str) -> String {
        match key {
            fields::NAME => self.name.clone(),
            fields::TARGET_AMOUNT => self.target_amount.map(display_amount).unwrap_or_default(),
            fields::SAVED_AMOUNT => display_amount(self.saved_amount),
            fields::DEADLINE => display_date(self.deadline),
            _ => String::new(),
        }
    }

    fn parse_into(&mut self, key: &str, raw: &str) -> Result<(), String> {
        match key {
            fields::NAME => self.name = raw.to_string(),
            fields::TARGET_AMOUNT => self.target_amount = parse_amount(raw)?,
            fields::SAVED_AMOUNT => self.saved_amount = parse_amount(raw)?.unwrap_or_default(),
            fields::DEADLINE => self.deadline = parse_date(raw)?,
            _ => {}
        }
        Ok(())
    }
}

fn progress_cell(goal: &Goal) -> CellValue {
    CellValue::Progress {
        percent: money::progress_percent(goal.saved_amount, goal.target_amount),
        label: format!(
            "Saved: {}/{}",
            money::format_number(goal.saved_amount),
            money::format_number(goal.target_amount)
        ),
    }
}

fn deadline_cell(goal: &Goal) -> CellValue {
    match goal.deadline {
        Some(deadline) => CellValue::text(deadline.format("%d/%m/%Y").to_string()),
        None => CellValue::text("-"),
    }
}

impl Resource for Goal {
    type Draft = GoalDraft;
    type CreateBody = GoalNew;
    type UpdateBody = GoalNew;

    const DESCRIPTOR: Descriptor = Descriptor {
        path: "goals",
        singular_key: "goal",
        list_key: "goals",
        deleted_key: "deleted_goals",
        label: "Goal",
        plural_label: "Goals",
    };

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn to_draft(&self) -> GoalDraft {
        GoalDraft {
            name: self.name.clone(),
            target_amount: Some(self.target_amount),
            saved_amount: self.saved_amount,
            deadline: self.deadline,
        }
    }

    fn apply_draft(&mut self, draft: &GoalDraft) {
        self.name = draft.name.trim().to_string();
        if let Some(target) = draft.target_amount {
            self.target_amount = target;
        }
        self.saved_amount = draft.saved_amount;
        self.deadline = draft.deadline;
    }

    fn from_draft(id: ResourceId, draft: &GoalDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            target_amount: draft.target_amount.unwrap_or_default(),
            saved_amount: draft.saved_amount,
            deadline: draft.deadline,
        }
    }

    fn create_body(draft: &GoalDraft) -> GoalNew {
        GoalNew {
            name: draft.name.trim().to_string(),
            target_amount: draft.target_amount.unwrap_or_default(),
            saved_amount: draft.saved_amount,
            deadline: draft.deadline,
        }
    }

    fn update_body(draft: &GoalDraft) -> GoalNew {
        Self::create_body(draft)
    }

    fn validate(
        draft: &GoalDraft,
        active: &[Self],
        editing: Option<&ResourceId>,
        today: NaiveDate,
    ) -> FieldErrors {
        validate_goal(draft, active, editing, today)
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Goal Name", |g: &Goal| CellValue::text(&g.name))
                .align(Align::Left)
                .width(25),
            Column::new("progress", "Progress", progress_cell).width(35),
            Column::new("deadline", "Deadline", deadline_cell).width(20),
            Column::actions().width(20),
        ]
    }
}
