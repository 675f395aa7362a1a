//! Унифицированные трэйты чтения/записи на основе std::io::{BufRead, Write}.

use crate::{
    error::Result,
    model::{GroupHeader, PlanRecord},
};
use std::io::{BufRead, Write};

/// Чтение плоского списка строк в исходном порядке.
pub trait ReadFormat {
    fn read<R: BufRead>(r: R) -> Result<Vec<PlanRecord>>;
}

/// Запись плоского списка строк (аналог выгрузки без группировки).
pub trait WriteFormat {
    fn write<W: Write>(w: W, records: &[PlanRecord]) -> Result<()>;
}

/// Запись сгруппированного дерева.
pub trait WriteTree {
    fn write_tree<W: Write>(w: W, groups: &[GroupHeader]) -> Result<()>;
}
