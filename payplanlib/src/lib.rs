//! payplanlib — группировка платёжного плана договора в дерево «дата → позиции»
//! и чтение/запись строк плана (CSV, OData JSON, XML).

pub mod error;
pub mod grouping;
pub mod model;
pub mod traits;

pub mod formats {
    pub mod csv;
    pub mod odata;
    pub mod xml;
}

pub use grouping::{flatten, group, records_for_contract, PaymentPlanGrouper};
