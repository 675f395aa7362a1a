use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::{debug, LevelFilter};
use payplanlib::{
    error::{PlanError, Result},
    formats::{csv::Csv, odata::ODataJson, xml::SimpleXml},
    group, records_for_contract,
    traits::{ReadFormat, WriteFormat, WriteTree},
};
use std::fs::File;
use std::io::{self, BufReader, Write};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Fmt {
    Csv,
    Json,
    Xml,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Layout {
    /// Группы по дате с вложенными позициями
    Tree,
    /// Исходные строки без группировки
    Flat,
}

#[derive(Parser, Debug)]
#[command(name = "payplan", version, about = "Группировка и конвертация платёжного плана")]
struct Cli {
    /// Входной файл (по умолчанию stdin)
    #[arg(short = 'i', long = "input")]
    input: Option<String>,

    /// Выходной файл (по умолчанию stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<String>,

    /// Формат входа
    #[arg(long = "in-format", value_enum)]
    in_format: Fmt,

    /// Формат выхода
    #[arg(long = "out-format", value_enum)]
    out_format: Fmt,

    /// Вид выхода
    #[arg(long = "layout", value_enum, default_value_t = Layout::Tree)]
    layout: Layout,

    /// Оставить только строки этого договора
    #[arg(long = "contract")]
    contract: Option<String>,

    /// Подробный лог в stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = Builder::new();
    logger.filter_level(if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn });
    logger.parse_default_env().init();

    // reader
    let reader: Box<dyn io::Read> = match &cli.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let br = BufReader::new(reader);

    let mut records = match cli.in_format {
        Fmt::Csv => Csv::read(br),
        Fmt::Json => ODataJson::read(br),
        Fmt::Xml => SimpleXml::read(br),
    }?;

    if let Some(contract) = &cli.contract {
        records = records_for_contract(&records, contract);
        debug!("{} records left for contract {contract}", records.len());
    }

    // writer
    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    match cli.layout {
        Layout::Flat => match cli.out_format {
            Fmt::Csv => Csv::write(&mut writer, &records),
            Fmt::Json => ODataJson::write(&mut writer, &records),
            Fmt::Xml => Err(PlanError::Unsupported("flat layout is not available for xml")),
        },
        Layout::Tree => {
            let groups = group(&records);
            match cli.out_format {
                Fmt::Json => ODataJson::write_tree(&mut writer, &groups),
                Fmt::Xml => SimpleXml::write_tree(&mut writer, &groups),
                Fmt::Csv => Err(PlanError::Unsupported("tree layout is not available for csv")),
            }
        }
    }?;

    writer.flush().map_err(PlanError::from)
}
