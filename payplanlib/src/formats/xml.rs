//! Упрощённый XML сгруппированного плана:
//! <PaymentPlan><Group date=".."><Header ../>?<Item ../>*</Group>*</PaymentPlan>

use crate::{
    error::{PlanError, Result},
    grouping::flatten,
    model::{GroupHeader, HeaderFields, PlanRecord},
};
use log::debug;
use quick_xml::{de::from_reader, se::to_string};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

// Все поля — атрибуты: текст элементов quick-xml обрезает по краям,
// а значения атрибутов отдаёт как есть.
#[derive(Serialize, Deserialize, Debug)]
struct XmlItem {
    #[serde(rename = "@contract_id")]
    contract_id: String,
    #[serde(rename = "@item_id")]
    item_id: String,
    #[serde(rename = "@date")]
    date: String,
    #[serde(rename = "@category")]
    category: String,
    #[serde(rename = "@category_text")]
    category_text: String,
    #[serde(rename = "@amount", with = "rust_decimal::serde::str")]
    amount: Decimal,
    #[serde(rename = "@currency")]
    currency: String,
    #[serde(rename = "@remaining_debit_amount", with = "rust_decimal::serde::str")]
    remaining_debit_amount: Decimal,
}

#[derive(Serialize, Deserialize, Debug)]
struct XmlHeader {
    #[serde(rename = "@contract_id")]
    contract_id: String,
    #[serde(rename = "@item_id")]
    item_id: String,
    #[serde(rename = "@category")]
    category: String,
    #[serde(rename = "@category_text")]
    category_text: String,
    #[serde(rename = "@amount", with = "rust_decimal::serde::str")]
    amount: Decimal,
    #[serde(rename = "@currency")]
    currency: String,
    #[serde(rename = "@remaining_debit_amount", with = "rust_decimal::serde::str")]
    remaining_debit_amount: Decimal,
}

#[derive(Serialize, Deserialize, Debug)]
struct XmlGroup {
    #[serde(rename = "@date")]
    date: String,
    #[serde(rename = "Header", skip_serializing_if = "Option::is_none", default)]
    header: Option<XmlHeader>,
    #[serde(rename = "Item", default)]
    items: Vec<XmlItem>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename = "PaymentPlan")]
struct XmlPlan {
    #[serde(rename = "Group", default)]
    groups: Vec<XmlGroup>,
}

impl From<&PlanRecord> for XmlItem {
    fn from(r: &PlanRecord) -> Self {
        XmlItem {
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

impl From<XmlItem> for PlanRecord {
    fn from(x: XmlItem) -> Self {
        PlanRecord {
            contract_id: x.contract_id,
            item_id: x.item_id,
            date: x.date,
            category: x.category,
            category_text: x.category_text,
            amount: x.amount,
            currency: x.currency,
            remaining_debit_amount: x.remaining_debit_amount,
        }
    }
}

impl From<&HeaderFields> for XmlHeader {
    fn from(h: &HeaderFields) -> Self {
        XmlHeader {
            contract_id: h.contract_id.clone(),
            item_id: h.item_id.clone(),
            category: h.category.clone(),
            category_text: h.category_text.clone(),
            amount: h.amount,
            currency: h.currency.clone(),
            remaining_debit_amount: h.remaining_debit_amount,
        }
    }
}

impl From<XmlHeader> for HeaderFields {
    fn from(x: XmlHeader) -> Self {
        HeaderFields {
            contract_id: x.contract_id,
            item_id: x.item_id,
            category: x.category,
            category_text: x.category_text,
            amount: x.amount,
            currency: x.currency,
            remaining_debit_amount: x.remaining_debit_amount,
        }
    }
}

pub struct SimpleXml;

impl SimpleXml {
    /// Прочитать дерево как есть, без разворачивания в плоский список.
    pub fn read_tree<R: BufRead>(r: R) -> Result<Vec<GroupHeader>> {
        let x: XmlPlan = from_reader(r).map_err(|e| PlanError::Xml(format!("{e}")))?;
        let groups = x
            .groups
            .into_iter()
            .map(|g| GroupHeader {
                date: g.date,
                header: g.header.map(HeaderFields::from),
                items: g.items.into_iter().map(PlanRecord::from).collect(),
            })
            .collect::<Vec<_>>();
        debug!("xml: read {} groups", groups.len());
        Ok(groups)
    }
}

impl crate::traits::ReadFormat for SimpleXml {
    fn read<R: BufRead>(r: R) -> Result<Vec<PlanRecord>> {
        Ok(flatten(&SimpleXml::read_tree(r)?))
    }
}

impl crate::traits::WriteTree for SimpleXml {
    fn write_tree<W: Write>(mut w: W, groups: &[GroupHeader]) -> Result<()> {
        let x = XmlPlan {
            groups: groups
                .iter()
                .map(|g| XmlGroup {
                    date: g.date.clone(),
                    header: g.header.as_ref().map(XmlHeader::from),
                    items: g.items.iter().map(XmlItem::from).collect(),
                })
                .collect(),
        };

        let s = to_string(&x).map_err(|e| PlanError::Xml(format!("{e}")))?;
        w.write_all(s.as_bytes())?;
        Ok(())
    }
}
