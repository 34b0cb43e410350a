//! Front-end independent model of the tabbed resource table.
//!
//! [`TableModel::build`] turns the collection of the selected tab into headers, cells and the
//! row actions allowed on that tab. The terminal front-end only has to draw it.
use api_types::ResourceId;

use crate::{list::Tab, resource::Resource};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
    Restore,
}

impl RowAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Delete => "Delete",
            Self::Restore => "Restore",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    /// Completion bar: `percent` in `0..=100` plus a caption.
    Progress { percent: u8, label: String },
    Actions(&'static [RowAction]),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Column definition for a resource table.
///
/// Every data column carries a renderer; the actions column has none and is filled with the
/// actions of the current tab.
pub struct Column<R> {
    pub id: &'static str,
    pub label: &'static str,
    pub align: Align,
    /// Relative width in percent, if the column asks for one.
    pub width: Option<u16>,
    render: Option<fn(&R) -> CellValue>,
}

impl<R> Column<R> {
    pub fn new(id: &'static str, label: &'static str, render: fn(&R) -> CellValue) -> Self {
        Self {
            id,
            label,
            align: Align::Center,
            width: None,
            render: Some(render),
        }
    }

    pub fn actions() -> Self {
        Self {
            id: "actions",
            label: "Actions",
            align: Align::Center,
            width: None,
            render: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, percent: u16) -> Self {
        self.width = Some(percent);
        self
    }

    pub fn cell(&self, item: &R, actions: &'static [RowAction]) -> CellValue {
        match self.render {
            Some(render) => render(item),
            None => CellValue::Actions(actions),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub label: &'static str,
    pub align: Align,
    pub width: Option<u16>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub id: ResourceId,
    pub cells: Vec<CellValue>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableModel {
    pub headers: Vec<Header>,
    pub rows: Vec<TableRow>,
    pub actions: &'static [RowAction],
}

impl TableModel {
    pub fn build<R: Resource>(items: &[R], tab: Tab) -> Self {
        let columns = R::columns();
        let actions = tab.row_actions();
        let headers = columns
            .iter()
            .map(|column| Header {
                label: column.label,
                align: column.align,
                width: column.width,
            })
            .collect();
        let rows = items
            .iter()
            .map(|item| TableRow {
                id: item.id().clone(),
                cells: columns
                    .iter()
                    .map(|column| column.cell(item, actions))
                    .collect(),
            })
            .collect();
        Self {
            headers,
            rows,
            actions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use api_types::{Currency, goal::Goal, wallet::Wallet};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn active_rows_offer_edit_and_delete() {
        let wallets = vec![Wallet {
            id: "1".into(),
            name: "Cash".to_string(),
            balance: Decimal::new(1_500_000, 0),
            currency: Currency::Vnd,
        }];
        let model = TableModel::build(&wallets, Tab::Active);

        let labels: Vec<_> = model.headers.iter().map(|h| h.label).collect();
        assert_eq!(labels, ["Wallet Name", "Balance", "Currency", "Actions"]);
        assert_eq!(model.rows.len(), 1);
        assert_eq!(
            model.rows[0].cells,
            vec![
                CellValue::text("Cash"),
                CellValue::text("1,500,000"),
                CellValue::text("VND"),
                CellValue::Actions(&[RowAction::Edit, RowAction::Delete]),
            ]
        );
    }

    #[test]
    fn deleted_rows_offer_restore_only() {
        let goals = vec![Goal {
            id: "4".into(),
            name: "Trip".to_string(),
            target_amount: Decimal::new(1000, 0),
            saved_amount: Decimal::new(250, 0),
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31),
        }];
        let model = TableModel::build(&goals, Tab::Deleted);

        assert_eq!(model.actions, &[RowAction::Restore]);
        let cells = &model.rows[0].cells;
        assert_eq!(
            cells[1],
            CellValue::Progress {
                percent: 25,
                label: "Saved: 250/1,000".to_string()
            }
        );
        assert_eq!(cells[2], CellValue::text("31/12/2026"));
        assert_eq!(cells[3], CellValue::Actions(&[RowAction::Restore]));
        assert_eq!(model.headers[1].width, Some(35));
    }
}
