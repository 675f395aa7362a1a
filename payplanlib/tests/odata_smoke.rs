use payplanlib::{
    error::PlanError,
    formats::odata::ODataJson,
    group,
    traits::{ReadFormat, WriteFormat, WriteTree},
};
use rust_decimal::Decimal;
use serde_json::Value;
use std::io::Cursor;

const ENVELOPE: &str = r#"{"d":{"results":[
  {"__metadata":{"type":"ZLOAN.PaymentPlan"},"ContractID":"C1","ItemID":"0001","Date":"20240101","Category":"1","CategoryTxt":"Installment","Amount":"100.00","Currency":"EUR","RemainingDebitAmount":"900.00"},
  {"ContractID":"C1","ItemID":"0002","Date":"20240101","Category":"2","CategoryTxt":"Interest","Amount":"10.00","Currency":"EUR","RemainingDebitAmount":"0.00"},
  {"ContractID":"C1","ItemID":"0003","Date":"20240201","Category":"2","CategoryTxt":"Interest","Amount":5,"Currency":"EUR","RemainingDebitAmount":0}
]}}"#;

#[test]
fn odata_read_envelope() {
    let recs = ODataJson::read(Cursor::new(ENVELOPE)).expect("read odata");
    assert_eq!(recs.len(), 3);
    assert_eq!(recs[0].item_id, "0001");
    assert_eq!(recs[0].category_text, "Installment");
    assert_eq!(recs[1].amount, Decimal::from_str_exact("10.00").unwrap());
    assert_eq!(recs[2].amount, Decimal::new(5, 0));
}

#[test]
fn odata_accepts_results_and_bare_array() {
    let results = r#"{"results":[{"ContractID":"C1","ItemID":"1","Date":"20240101","Category":"2","Amount":"1","Currency":"EUR"}]}"#;
    let bare = r#"[{"ContractID":"C1","ItemID":"1","Date":"20240101","Category":"2","Amount":"1","Currency":"EUR"}]"#;
    let a = ODataJson::read(Cursor::new(results)).expect("results");
    let b = ODataJson::read(Cursor::new(bare)).expect("bare");
    assert_eq!(a, b);
    assert_eq!(a[0].remaining_debit_amount, Decimal::ZERO);
    assert_eq!(a[0].category_text, "");
}

#[test]
fn odata_rejects_non_sequence() {
    for input in [r#"{"d":{"results":{"Date":"20240101"}}}"#, r#""text""#, r#"{"d":{}}"#] {
        let err = ODataJson::read(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, PlanError::InvalidArgument(_)), "{input}: {err}");
    }
}

#[test]
fn odata_missing_date_is_json_error() {
    let input = r#"[{"ContractID":"C1","ItemID":"1","Category":"2","Amount":"1","Currency":"EUR"}]"#;
    let err = ODataJson::read(Cursor::new(input)).unwrap_err();
    assert!(matches!(err, PlanError::Json(_)), "{err}");
}

#[test]
fn odata_flat_write_then_read_back() {
    let recs = ODataJson::read(Cursor::new(ENVELOPE)).expect("read odata");
    let mut out = Vec::new();
    ODataJson::write(&mut out, &recs).expect("write odata");
    let back = ODataJson::read(Cursor::new(out)).expect("read back");
    assert_eq!(back, recs);
}

#[test]
fn odata_tree_shape() {
    let recs = ODataJson::read(Cursor::new(ENVELOPE)).expect("read odata");
    let mut out = Vec::new();
    ODataJson::write_tree(&mut out, &group(&recs)).expect("write tree");
    let v: Value = serde_json::from_slice(&out).expect("tree json");

    let groups = v["Items"].as_array().expect("Items");
    assert_eq!(groups.len(), 2);

    assert_eq!(groups[0]["Date"], "20240101");
    assert_eq!(groups[0]["Amount"], "100.00");
    assert_eq!(groups[0]["ItemID"], "0001");
    assert_eq!(groups[0]["Items"].as_array().map(Vec::len), Some(1));
    assert_eq!(groups[0]["Items"][0]["Date"], "20240101");
    assert_eq!(groups[0]["Items"][0]["Amount"], "10.00");

    // у даты без строки категории "1" полей заголовка нет вовсе
    let second = groups[1].as_object().expect("group object");
    assert!(!second.contains_key("Amount"));
    assert!(!second.contains_key("ContractID"));
    assert_eq!(second["Items"][0]["Amount"], "5");
}
