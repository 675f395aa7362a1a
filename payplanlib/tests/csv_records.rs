use payplanlib::{
    error::PlanError,
    formats::csv::Csv,
    group,
    traits::{ReadFormat, WriteFormat},
};
use rust_decimal::Decimal;
use std::io::Cursor;

const INPUT: &str = "contract_id,item_id,date,category,category_text,amount,currency,remaining_debit_amount
C1,0001,20240101,1,Installment,100.00,EUR,900.00
C1,0002,20240101,2,Interest,10.00,EUR,0
C1,0003,20240201,2,Interest,5.50,EUR,0
";

#[test]
fn csv_read_and_group() {
    let recs = Csv::read(Cursor::new(INPUT)).expect("read csv");
    assert_eq!(recs.len(), 3);
    assert!(recs[0].is_header());
    assert_eq!(recs[2].amount, Decimal::from_str_exact("5.50").unwrap());

    let groups = group(&recs);
    assert_eq!(groups.len(), 2);
    assert_eq!(
        groups[0].header.as_ref().map(|h| h.remaining_debit_amount),
        Some(Decimal::new(900, 0))
    );
}

#[test]
fn csv_roundtrip() {
    let recs = Csv::read(Cursor::new(INPUT)).expect("read csv");
    let mut out = Vec::new();
    Csv::write(&mut out, &recs).expect("write csv");
    let text = String::from_utf8(out).expect("utf8");
    assert!(text.starts_with("contract_id,item_id,date,"));
    // масштаб сумм сохраняется
    assert!(text.contains("100.00"));

    let back = Csv::read(Cursor::new(text)).expect("read back");
    assert_eq!(back, recs);
}

#[test]
fn csv_missing_remaining_amount_defaults_to_zero() {
    let input = "contract_id,item_id,date,category,category_text,amount,currency,remaining_debit_amount
C1,0001,20240101,2,Fee,1.00,EUR,
";
    let recs = Csv::read(Cursor::new(input)).expect("read csv");
    assert_eq!(recs[0].remaining_debit_amount, Decimal::ZERO);
}

#[test]
fn csv_bad_amount_is_parse_error() {
    let input = "contract_id,item_id,date,category,category_text,amount,currency,remaining_debit_amount
C1,0001,20240101,2,Fee,abc,EUR,0
";
    let err = Csv::read(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, PlanError::Parse(_)), "{err}");
}

#[test]
fn csv_dates_compared_exactly() {
    let input = "contract_id,item_id,date,category,category_text,amount,currency,remaining_debit_amount
C1,0001,20240101,2,Fee,1.00,EUR,0
C1,0002, 20240101,2,  Padded text ,2.00,EUR, 0
";
    let recs = Csv::read(Cursor::new(input)).expect("read csv");
    assert_eq!(recs[1].date, " 20240101");
    assert_eq!(recs[1].category_text, "  Padded text ");
    assert_eq!(recs[1].remaining_debit_amount, Decimal::ZERO);

    let groups = group(&recs);
    assert_eq!(groups.len(), 2);

    let mut out = Vec::new();
    Csv::write(&mut out, &recs).expect("write csv");
    let back = Csv::read(Cursor::new(out)).expect("read back");
    assert_eq!(back, recs);
}
