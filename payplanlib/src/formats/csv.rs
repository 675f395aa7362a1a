//! Плоский CSV без группировки, заголовки:
//! contract_id,item_id,date,category,category_text,amount,currency,remaining_debit_amount

use crate::{
    error::{PlanError, Result},
    model::PlanRecord,
};
use csv::{ReaderBuilder, WriterBuilder};
use log::debug;
use rust_decimal::Decimal;
use std::io::{BufRead, Write};

#[derive(serde::Deserialize)]
struct CsvRow {
    contract_id: String,
    item_id: String,
    date: String,
    category: String,
    #[serde(default)]
    category_text: String,
    amount: String,
    currency: String,
    remaining_debit_amount: Option<String>,
}

#[derive(serde::Serialize)]
struct CsvOutRow<'a> {
    contract_id: &'a str,
    item_id: &'a str,
    date: &'a str,
    category: &'a str,
    category_text: &'a str,
    amount: String,
    currency: &'a str,
    remaining_debit_amount: String,
}

fn parse_amount(field: &str, v: &str) -> Result<Decimal> {
    v.trim()
        .parse::<Decimal>()
        .map_err(|e| PlanError::Parse(format!("{field} {v:?}: {e}")))
}

pub struct Csv;

impl crate::traits::ReadFormat for Csv {
    fn read<R: BufRead>(r: R) -> Result<Vec<PlanRecord>> {
        // строки не обрезаются: date сравнивается побайтно
        let mut rdr = ReaderBuilder::new().flexible(true).from_reader(r);
        let mut records = Vec::new();

        for rec in rdr.deserialize::<CsvRow>() {
            let row = rec?;
            records.push(PlanRecord {
                amount: parse_amount("amount", &row.amount)?,
                remaining_debit_amount: match row.remaining_debit_amount.as_deref() {
                    Some(v) if !v.trim().is_empty() => parse_amount("remaining_debit_amount", v)?,
                    _ => Decimal::ZERO,
                },
                contract_id: row.contract_id,
                item_id: row.item_id,
                date: row.date,
                category: row.category,
                category_text: row.category_text,
                currency: row.currency,
            });
        }

        debug!("csv: read {} records", records.len());
        Ok(records)
    }
}

impl crate::traits::WriteFormat for Csv {
    fn write<W: Write>(mut w: W, records: &[PlanRecord]) -> Result<()> {
        let mut wrt = WriterBuilder::new().from_writer(&mut w);

        for r in records {
            wrt.serialize(CsvOutRow {
                contract_id: &r.contract_id,
                item_id: &r.item_id,
                date: &r.date,
                category: &r.category,
                category_text: &r.category_text,
                amount: r.amount.to_string(),
                currency: &r.currency,
                remaining_debit_amount: r.remaining_debit_amount.to_string(),
            })?;
        }
        wrt.flush()?;
        Ok(())
    }
}
