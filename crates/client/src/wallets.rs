use api_types::{
    Currency, ResourceId,
    wallet::{Wallet, WalletNew, WalletUpdate},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    form::{DraftFields, FieldKind, FieldSpec, display_amount, parse_amount},
    money,
    resource::{Descriptor, Resource},
    table::{Align, CellValue, Column},
    validation::{FieldErrors, fields, validate_wallet},
};

/// Editable wallet fields. The balance is only sent when creating.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletDraft {
    pub name: String,
    pub balance: Decimal,
    pub currency: Currency,
}

impl DraftFields for WalletDraft {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new(fields::NAME, "Wallet Name", FieldKind::Text),
        FieldSpec::new(fields::BALANCE, "Initial Balance", FieldKind::Amount).create_only(),
        FieldSpec::new(fields::CURRENCY, "Currency", FieldKind::Choice),
    ];

    fn display(&self, key: &str) -> String {
        match key {
            fields::NAME => self.name.clone(),
            fields::BALANCE => display_amount(self.balance),
            fields::CURRENCY => self.currency.code().to_string(),
            _ => String::new(),
        }
    }

    fn parse_into(&mut self, key: &str, raw: &str) -> Result<(), String> {
        match key {
            fields::NAME => self.name = raw.to_string(),
            fields::BALANCE => self.balance = parse_amount(raw)?.unwrap_or_default(),
            fields::CURRENCY => self.currency = Currency::try_from(raw)?,
            _ => {}
        }
        Ok(())
    }

    fn cycle(&mut self, key: &str, forward: bool) {
        if key == fields::CURRENCY {
            self.currency = if forward {
                self.currency.next()
            } else {
                self.currency.prev()
            };
        }
    }
}

impl Resource for Wallet {
    type Draft = WalletDraft;
    type CreateBody = WalletNew;
    type UpdateBody = WalletUpdate;

    const DESCRIPTOR: Descriptor = Descriptor {
        path: "wallets",
        singular_key: "wallet",
        list_key: "wallets",
        deleted_key: "deleted_wallets",
        label: "Wallet",
        plural_label: "Wallets",
    };

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn to_draft(&self) -> WalletDraft {
        WalletDraft {
            name: self.name.clone(),
            balance: self.balance,
            currency: self.currency,
        }
    }

    fn apply_draft(&mut self, draft: &WalletDraft) {
        self.name = draft.name.trim().to_string();
        self.currency = draft.currency;
    }

    fn from_draft(id: ResourceId, draft: &WalletDraft) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            balance: draft.balance,
            currency: draft.currency,
        }
    }

    fn create_body(draft: &WalletDraft) -> WalletNew {
        WalletNew {
            name: draft.name.trim().to_string(),
            balance: draft.balance,
            currency: draft.currency,
        }
    }

    fn update_body(draft: &WalletDraft) -> WalletUpdate {
        WalletUpdate {
            name: draft.name.trim().to_string(),
            currency: draft.currency,
        }
    }

    fn validate(
        draft: &WalletDraft,
        active: &[Self],
        editing: Option<&ResourceId>,
        _today: NaiveDate,
    ) -> FieldErrors {
        validate_wallet(draft, active, editing)
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Wallet Name", |w: &Wallet| CellValue::text(&w.name))
                .align(Align::Left),
            Column::new("balance", "Balance", |w: &Wallet| {
                CellValue::text(money::format_amount(w.balance, w.currency))
            })
            .align(Align::Right),
            Column::new("currency", "Currency", |w: &Wallet| {
                CellValue::text(w.currency.code())
            }),
            Column::actions(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keeps_the_balance() {
        let mut wallet = Wallet {
            id: "2".into(),
            name: "Bank".to_string(),
            balance: Decimal::new(900, 0),
            currency: Currency::Vnd,
        };
        let mut draft = wallet.to_draft();
        draft.name = "Savings".to_string();
        draft.balance = Decimal::ZERO;
        draft.currency = Currency::Krw;

        wallet.apply_draft(&draft);
        assert_eq!(wallet.name, "Savings");
        assert_eq!(wallet.currency, Currency::Krw);
        assert_eq!(wallet.balance, Decimal::new(900, 0));
    }

    #[test]
    fn bodies_trim_the_name() {
        let draft = WalletDraft {
            name: "  Cash ".to_string(),
            balance: Decimal::new(100, 0),
            currency: Currency::Usd,
        };
        let body = serde_json::to_value(Wallet::create_body(&draft)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Cash", "balance": 100.0, "currency": "USD"})
        );
        let body = serde_json::to_value(Wallet::update_body(&draft)).unwrap();
        assert_eq!(body, serde_json::json!({"name": "Cash", "currency": "USD"}));
    }

    #[test]
    fn bad_balance_text_is_reported() {
        let mut draft = WalletDraft::default();
        assert!(draft.parse_into(fields::BALANCE, "1O0").is_err());
        assert_eq!(draft.balance, Decimal::ZERO);
        draft.parse_into(fields::BALANCE, "-5").unwrap();
        assert_eq!(draft.balance, Decimal::new(-5, 0));
    }
}
