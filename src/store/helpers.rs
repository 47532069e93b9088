// src/store/helpers.rs
// Helper functions for SQL generation against the value table

/// Columns of the value table that make up the unique cell key.
pub const KEY_COLUMNS: [&str; 5] = ["att_id", "item_id", "row", "col", "langcode"];

/// Columns rewritten when an upsert hits an existing cell.
pub const PAYLOAD_COLUMNS: [&str; 2] = ["value", "tstamp"];

/// Quote a SQL identifier by wrapping it in double quotes.
/// Embedded quotes are doubled so any table name stays a single identifier.
///
/// # Example
/// ```
/// use translated_tabletext::store::helpers::quote_identifier;
/// assert_eq!(quote_identifier("row"), "\"row\"");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Build a comma-separated list of quoted column names.
pub fn quote_column_list(columns: &[&str]) -> String {
    columns
        .iter()
        .map(|name| quote_identifier(name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build a string of SQL placeholders (?, ?, ?, ...).
pub fn build_placeholders(count: usize) -> String {
    (0..count)
        .map(|_| "?")
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the SELECT used by the read path, ordered by row then column.
pub fn build_select_sql(table_name: &str, where_clause: &str) -> String {
    format!(
        "SELECT att_id, item_id, \"row\", \"col\", langcode, value, tstamp FROM {} WHERE {} ORDER BY \"row\" ASC, \"col\" ASC",
        quote_identifier(table_name),
        where_clause
    )
}

/// Build a DELETE SQL statement.
pub fn build_delete_sql(table_name: &str, where_clause: &str) -> String {
    format!(
        "DELETE FROM {} WHERE {}",
        quote_identifier(table_name),
        where_clause
    )
}

/// Build the single-statement upsert for one cell.
///
/// Parameters are bound in the order of `KEY_COLUMNS` followed by
/// `PAYLOAD_COLUMNS`. A conflict on the unique cell key rewrites the payload
/// in place.
pub fn build_upsert_sql(table_name: &str) -> String {
    let columns: Vec<&str> = KEY_COLUMNS.iter().chain(PAYLOAD_COLUMNS.iter()).copied().collect();
    let assignments = PAYLOAD_COLUMNS
        .iter()
        .map(|c| format!("{0} = excluded.{0}", quote_identifier(c)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) DO UPDATE SET {}",
        quote_identifier(table_name),
        quote_column_list(&columns),
        build_placeholders(columns.len()),
        quote_column_list(&KEY_COLUMNS),
        assignments
    )
}
