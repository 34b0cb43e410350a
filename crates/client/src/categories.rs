use api_types::{
    ResourceId,
    category::{Category, CategoryNew},
};
use chrono::NaiveDate;

use crate::{
    form::{DraftFields, FieldKind, FieldSpec},
    resource::{Descriptor, Resource},
    table::{Align, CellValue, Column},
    validation::{FieldErrors, fields, validate_category},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
}

impl DraftFields for CategoryDraft {
    const FIELDS: &'static [FieldSpec] =
        &[FieldSpec::new(fields::NAME, "Category Name", FieldKind::Text)];

    fn display(&self, key: &str) -> String {
        match key {
            fields::NAME => self.name.clone(),
            _ => String::new(),
        }
    }

    fn parse_into(&mut self, key: &str, raw: &str) -> Result<(), String> {
        if key == fields::NAME {
            self.name = raw.to_string();
        }
        Ok(())
    }
}

impl Resource for Category {
    type Draft = CategoryDraft;
    type CreateBody = CategoryNew;
    type UpdateBody = CategoryNew;

    const DESCRIPTOR: Descriptor = Descriptor {
        path: "categories",
        singular_key: "category",
        list_key: "categories",
        deleted_key: "deleted_categories",
        label: "Category",
        plural_label: "Categories",
    };

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn to_draft(&self) -> CategoryDraft {
        CategoryDraft {
            name: self.name.clone(),
        }
    }

    fn apply_draft(&mut self, draft: &CategoryDraft) {
        self.name = draft.name.trim().to_string();
    }

    fn from_draft(id: ResourceId, draft: &CategoryDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
        }
    }

    fn create_body(draft: &CategoryDraft) -> CategoryNew {
        CategoryNew {
            name: draft.name.trim().to_string(),
        }
    }

    fn update_body(draft: &CategoryDraft) -> CategoryNew {
        Self::create_body(draft)
    }

    fn validate(
        draft: &CategoryDraft,
        active: &[Self],
        editing: Option<&ResourceId>,
        _today: NaiveDate,
    ) -> FieldErrors {
        validate_category(draft, active, editing)
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Category Name", |c: &Category| {
                CellValue::text(&c.name)
            })
            .align(Align::Left),
            Column::actions(),
        ]
    }
}
