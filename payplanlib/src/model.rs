//! Доменные модели: плоская строка платёжного плана и сгруппированное дерево.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Код категории, помечающий строку как заголовок группы.
pub const HEADER_CATEGORY: &str = "1";

/// Строка платёжного плана в том порядке, в котором её вернул бэкенд.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanRecord {
    pub contract_id: String,
    pub item_id: String,
    /// `YYYYMMDD`, используется только как ключ группировки.
    pub date: String,
    pub category: String,
    pub category_text: String,
    pub amount: Decimal,
    pub currency: String,
    pub remaining_debit_amount: Decimal,
}

impl PlanRecord {
    pub fn is_header(&self) -> bool {
        self.category == HEADER_CATEGORY
    }
}

/// Позиция внутри группы: полная копия полей детальной строки.
pub type GroupItem = PlanRecord;

/// Поля заголовочной строки, поднятые на уровень группы.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderFields {
    pub contract_id: String,
    pub item_id: String,
    pub category: String,
    pub category_text: String,
    pub amount: Decimal,
    pub currency: String,
    pub remaining_debit_amount: Decimal,
}

impl HeaderFields {
    /// Обратно в плоскую строку с датой группы.
    pub fn to_record(&self, date: &str) -> PlanRecord {
        PlanRecord {
            contract_id: self.contract_id.clone(),
            item_id: self.item_id.clone(),
            date: date.to_string(),
            category: self.category.clone(),
            category_text: self.category_text.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
            remaining_debit_amount: self.remaining_debit_amount,
        }
    }
}

impl From<&PlanRecord> for HeaderFields {
    fn from(r: &PlanRecord) -> Self {
        HeaderFields {
            contract_id: r.contract_id.clone(),
            item_id: r.item_id.clone(),
            category: r.category.clone(),
            category_text: r.category_text.clone(),
            amount: r.amount,
            currency: r.currency.clone(),
            remaining_debit_amount: r.remaining_debit_amount,
        }
    }
}

/// Группа одной даты. `header` заполнен только если для даты встретилась
/// строка категории `"1"`; группа без заголовка — нормальное состояние.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupHeader {
    pub date: String,
    pub header: Option<HeaderFields>,
    pub items: Vec<GroupItem>,
}

impl GroupHeader {
    pub fn new(date: impl Into<String>) -> Self {
        GroupHeader {
            date: date.into(),
            header: None,
            items: Vec::new(),
        }
    }

    pub fn has_header(&self) -> bool {
        self.header.is_some()
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }
}
