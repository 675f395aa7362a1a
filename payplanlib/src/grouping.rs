//! Группировка плоского платёжного плана в двухуровневое дерево
//! «дата → заголовок + позиции».
//!
//! Порядок групп — порядок первого появления даты во входе (без сортировки).
//! Заголовочная строка (категория `"1"`) не попадает в `items`, её поля
//! поднимаются на группу; при нескольких заголовках одной даты побеждает
//! последний.

use crate::model::{GroupHeader, HeaderFields, PlanRecord};
use log::{debug, warn};
use std::collections::HashMap;

/// Инкрементальный построитель групп.
#[derive(Debug, Default)]
pub struct PaymentPlanGrouper {
    groups: Vec<GroupHeader>,
    // дата -> индекс в `groups`
    index: HashMap<String, usize>,
}

impl PaymentPlanGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Добавить строку. Заголовок для даты, у которой он уже есть,
    /// перезаписывает прежний (с предупреждением в лог).
    pub fn push(&mut self, record: &PlanRecord) {
        let idx = match self.index.get(&record.date) {
            Some(&i) => i,
            None => {
                let i = self.groups.len();
                self.groups.push(GroupHeader::new(record.date.clone()));
                self.index.insert(record.date.clone(), i);
                i
            }
        };
        let group = &mut self.groups[idx];

        if record.is_header() {
            if let Some(prev) = &group.header {
                warn!(
                    "date {}: header {} replaces earlier header {}",
                    group.date, record.item_id, prev.item_id
                );
            }
            group.header = Some(HeaderFields::from(record));
        } else {
            group.items.push(record.clone());
        }
    }

    pub fn extend<'a, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'a PlanRecord>,
    {
        for r in records {
            self.push(r);
        }
    }

    /// Число групп на данный момент.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn finish(self) -> Vec<GroupHeader> {
        let summary = GroupingSummary::of(&self.groups);
        debug!(
            "grouped payment plan: {} groups, {} headers, {} items",
            summary.groups, summary.headers, summary.items
        );
        self.groups
    }
}

/// Сгруппировать строки по дате. Тотальна: пустой вход даёт пустой результат.
pub fn group(records: &[PlanRecord]) -> Vec<GroupHeader> {
    let mut grouper = PaymentPlanGrouper::new();
    grouper.extend(records);
    grouper.finish()
}

/// Обратное представление: для каждой группы заголовочная строка (если есть),
/// затем позиции. `group(&flatten(&g)) == g` для любого `g`, полученного из `group`.
pub fn flatten(groups: &[GroupHeader]) -> Vec<PlanRecord> {
    let mut out = Vec::with_capacity(groups.iter().map(|g| g.items.len() + 1).sum());
    for g in groups {
        if let Some(h) = &g.header {
            out.push(h.to_record(&g.date));
        }
        out.extend(g.items.iter().cloned());
    }
    out
}

/// Оставить только строки одного договора, сохраняя порядок.
pub fn records_for_contract(records: &[PlanRecord], contract_id: &str) -> Vec<PlanRecord> {
    records
        .iter()
        .filter(|r| r.contract_id == contract_id)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupingSummary {
    pub groups: usize,
    pub headers: usize,
    pub items: usize,
}

impl GroupingSummary {
    pub fn of(groups: &[GroupHeader]) -> Self {
        GroupingSummary {
            groups: groups.len(),
            headers: groups.iter().filter(|g| g.has_header()).count(),
            items: groups.iter().map(GroupHeader::total_items).sum(),
        }
    }
}
