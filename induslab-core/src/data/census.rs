//! SUSB census loader.
//!
//! Reads the comma-delimited industry-by-state file. The file ships as
//! cp1252, so the reader decodes lossily instead of failing on stray
//! bytes. The state FIPS column is renamed `STATE` → `STATEFP` to match
//! the boundary attribute frame's join key.

use super::DataError;
use polars::prelude::*;
use std::path::Path;

pub fn load_census(path: &Path) -> Result<DataFrame, DataError> {
    let mut df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_separator(b',')
        .with_encoding(CsvEncoding::LossyUtf8)
        .finish()?
        .collect()?;
    df.rename("STATE", "STATEFP".into())?;
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "induslab_census_{}_{:?}.txt",
            std::process::id(),
            std::thread::current().id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_and_renames_the_state_column() {
        let path = write_fixture(
            "STATE,STATEDSCR,NAICS,ENTRSIZE,PAYR\n\
             0,United States,--,1,1000\n\
             17,Illinois,--,1,250\n",
        );
        let df = load_census(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(df.column("STATEFP").is_ok());
        assert!(df.column("STATE").is_err());
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_census(Path::new("/nonexistent/induslab-census.txt"));
        assert!(result.is_err());
    }
}
