use crate::utils::error::Result;
use std::collections::HashMap;

/// Tokens accepted as "true" when parsing boolean columns. Anything else
/// (including an absent column) reads as false.
const TRUTHY_TOKENS: [&str; 4] = ["true", "1", "yes", "y"];

/// One parsed data line: the header-keyed raw fields plus the 1-indexed
/// row number used in error messages.
#[derive(Debug, Clone)]
pub struct Row {
    pub number: usize,
    fields: HashMap<String, String>,
}

impl Row {
    /// Field by column name, trimmed, defaulting to empty when the column
    /// is missing from the file.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(|v| v.trim()).unwrap_or("")
    }

    pub fn flag(&self, name: &str) -> bool {
        let value = self.field(name).to_ascii_lowercase();
        TRUTHY_TOKENS.contains(&value.as_str())
    }
}

/// Parse delimited text into rows. The first line is the header; columns
/// may appear in any order, and rows shorter than the header leave the
/// trailing columns absent.
pub fn parse_rows(text: &str) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(Row {
            number: index + 1,
            fields,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_one_indexed() {
        let rows = parse_rows("name,phone\nAlpha,123\nBeta,456\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[0].field("name"), "Alpha");
        assert_eq!(rows[1].field("phone"), "456");
    }

    #[test]
    fn test_missing_column_reads_empty() {
        let rows = parse_rows("name\nAlpha\n").unwrap();
        assert_eq!(rows[0].field("phone"), "");
    }

    #[test]
    fn test_short_row_leaves_trailing_columns_absent() {
        let rows = parse_rows("name,phone,location\nAlpha\n").unwrap();
        assert_eq!(rows[0].field("name"), "Alpha");
        assert_eq!(rows[0].field("location"), "");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let rows = parse_rows("name,location\n  Alpha  , Mumbai \n").unwrap();
        assert_eq!(rows[0].field("name"), "Alpha");
        assert_eq!(rows[0].field("location"), "Mumbai");
    }

    #[test]
    fn test_flag_tokens() {
        let rows = parse_rows(
            "a,b,c,d,e,f\ntrue,1,YES,y,false,anything\n",
        )
        .unwrap();
        let row = &rows[0];
        assert!(row.flag("a"));
        assert!(row.flag("b"));
        assert!(row.flag("c"));
        assert!(row.flag("d"));
        assert!(!row.flag("e"));
        assert!(!row.flag("f"));
        assert!(!row.flag("missing"));
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let rows = parse_rows("name,phone\n").unwrap();
        assert!(rows.is_empty());
    }
}
