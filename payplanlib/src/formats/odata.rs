//! OData v2 JSON в том виде, в каком его отдаёт бэкенд:
//! `{"d":{"results":[{"ContractID":..,"Date":"20240101",..}]}}`.
//!
//! При чтении принимаются также `{"results":[..]}` и голый массив.
//! Суммы читаются из строк или чисел, пишутся строками (Edm.Decimal).

use crate::{
    error::{PlanError, Result},
    model::{GroupHeader, PlanRecord},
};
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Write};

#[derive(Serialize, Deserialize, Debug)]
struct ODataRow {
    #[serde(rename = "ContractID")]
    contract_id: String,
    #[serde(rename = "ItemID")]
    item_id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "CategoryTxt", default)]
    category_text: String,
    #[serde(rename = "Amount")]
    amount: Decimal,
    #[serde(rename = "Currency")]
    currency: String,
    #[serde(rename = "RemainingDebitAmount", default)]
    remaining_debit_amount: Decimal,
}

impl From<ODataRow> for PlanRecord {
    fn from(r: ODataRow) -> Self {
        PlanRecord {
            contract_id: r.contract_id,
            item_id: r.item_id,
            date: r.date,
            category: r.category,
            category_text: r.category_text,
            amount: r.amount,
            currency: r.currency,
            remaining_debit_amount: r.remaining_debit_amount,
        }
    }
}

impl From<&PlanRecord> for ODataRow {
    fn from(r: &PlanRecord) -> Self {
        ODataRow {
            contract_id: r.contract_id.clone(),
            item_id: r.item_id.clone(),
            date: r.date.clone(),
            category: r.category.clone(),
            category_text: r.category_text.clone(),
            amount: r.amount,
            currency: r.currency.clone(),
            remaining_debit_amount: r.remaining_debit_amount,
        }
    }
}

// Поля заголовка отсутствуют целиком, если у даты не было строки категории "1".
#[derive(Serialize, Debug)]
struct ODataGroup<'a> {
    #[serde(rename = "Date")]
    date: &'a str,
    #[serde(rename = "ContractID", skip_serializing_if = "Option::is_none")]
    contract_id: Option<&'a str>,
    #[serde(rename = "ItemID", skip_serializing_if = "Option::is_none")]
    item_id: Option<&'a str>,
    #[serde(rename = "Category", skip_serializing_if = "Option::is_none")]
    category: Option<&'a str>,
    #[serde(rename = "CategoryTxt", skip_serializing_if = "Option::is_none")]
    category_text: Option<&'a str>,
    #[serde(rename = "Amount", skip_serializing_if = "Option::is_none")]
    amount: Option<Decimal>,
    #[serde(rename = "Currency", skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
    #[serde(rename = "RemainingDebitAmount", skip_serializing_if = "Option::is_none")]
    remaining_debit_amount: Option<Decimal>,
    #[serde(rename = "Items")]
    items: Vec<ODataRow>,
}

impl<'a> From<&'a GroupHeader> for ODataGroup<'a> {
    fn from(g: &'a GroupHeader) -> Self {
        let h = g.header.as_ref();
        ODataGroup {
            date: &g.date,
            contract_id: h.map(|h| h.contract_id.as_str()),
            item_id: h.map(|h| h.item_id.as_str()),
            category: h.map(|h| h.category.as_str()),
            category_text: h.map(|h| h.category_text.as_str()),
            amount: h.map(|h| h.amount),
            currency: h.map(|h| h.currency.as_str()),
            remaining_debit_amount: h.map(|h| h.remaining_debit_amount),
            items: g.items.iter().map(ODataRow::from).collect(),
        }
    }
}

#[derive(Serialize)]
struct Results {
    results: Vec<ODataRow>,
}

#[derive(Serialize)]
struct Envelope {
    d: Results,
}

#[derive(Serialize)]
struct Tree<'a> {
    #[serde(rename = "Items")]
    items: Vec<ODataGroup<'a>>,
}

/// Достать массив строк из конверта; всё, что не последовательность, отвергается.
fn unwrap_results(v: Value) -> Result<Vec<Value>> {
    let v = match v {
        Value::Object(mut m) if m.contains_key("d") => m.remove("d").unwrap_or(Value::Null),
        other => other,
    };
    match v {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut m) => match m.remove("results") {
            Some(Value::Array(rows)) => Ok(rows),
            Some(other) => Err(PlanError::InvalidArgument(format!(
                "results must be an array, got {}",
                kind(&other)
            ))),
            None => Err(PlanError::InvalidArgument("missing results".into())),
        },
        other => Err(PlanError::InvalidArgument(format!(
            "expected a sequence of records, got {}",
            kind(&other)
        ))),
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

pub struct ODataJson;

impl crate::traits::ReadFormat for ODataJson {
    fn read<R: BufRead>(r: R) -> Result<Vec<PlanRecord>> {
        let v: Value = serde_json::from_reader(r)?;
        let rows = unwrap_results(v)?;
        let records = rows
            .into_iter()
            .map(|row| serde_json::from_value::<ODataRow>(row).map(PlanRecord::from))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        debug!("odata: read {} records", records.len());
        Ok(records)
    }
}

impl crate::traits::WriteFormat for ODataJson {
    fn write<W: Write>(mut w: W, records: &[PlanRecord]) -> Result<()> {
        let env = Envelope {
            d: Results {
                results: records.iter().map(ODataRow::from).collect(),
            },
        };
        serde_json::to_writer_pretty(&mut w, &env)?;
        writeln!(w)?;
        Ok(())
    }
}

impl crate::traits::WriteTree for ODataJson {
    fn write_tree<W: Write>(mut w: W, groups: &[GroupHeader]) -> Result<()> {
        let tree = Tree {
            items: groups.iter().map(ODataGroup::from).collect(),
        };
        serde_json::to_writer_pretty(&mut w, &tree)?;
        writeln!(w)?;
        Ok(())
    }
}
