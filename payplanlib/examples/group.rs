use payplanlib::{
    formats::odata::ODataJson,
    group,
    traits::{ReadFormat, WriteTree},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: OData JSON (stdin) -> дерево по датам в JSON (stdout)
    let records = ODataJson::read(std::io::BufReader::new(std::io::stdin()))?;
    ODataJson::write_tree(std::io::stdout(), &group(&records))?;
    Ok(())
}
