// src/store/cell.rs
// Persisted cell model and the sparse per-item grid built from it

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sparse rows of one item: row id -> column key -> cell.
pub type Grid = BTreeMap<u32, BTreeMap<ColKey, Cell>>;

/// Grids of several items, keyed by item id.
pub type ItemGrids = BTreeMap<ItemId, Grid>;

/// Returns `Some(n)` only when `s` is the canonical decimal spelling of `n`,
/// so "007" or "+1" stay textual keys.
fn canonical_integer(s: &str) -> Option<i64> {
    s.parse::<i64>().ok().filter(|n| n.to_string() == s)
}

/// Identifier of the content item owning a value. The host decides whether
/// its items use integer or string ids; both are stored as given.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemId {
    Int(i64),
    Str(String),
}

impl ItemId {
    pub fn parse(s: &str) -> Self {
        match canonical_integer(s) {
            Some(n) => ItemId::Int(n),
            None => ItemId::Str(s.to_string()),
        }
    }
}

impl FromStr for ItemId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ItemId::parse(s))
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{}", n),
            ItemId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Int(n)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId::Str(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId::Str(s)
    }
}

/// Key of a column inside a row. Positional indices and named keys may be
/// mixed; indices sort before names, as SQLite orders integers before text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColKey {
    Index(i64),
    Name(String),
}

impl ColKey {
    pub fn parse(s: &str) -> Self {
        match canonical_integer(s) {
            Some(n) => ColKey::Index(n),
            None => ColKey::Name(s.to_string()),
        }
    }
}

impl FromStr for ColKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ColKey::parse(s))
    }
}

impl fmt::Display for ColKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColKey::Index(n) => write!(f, "{}", n),
            ColKey::Name(s) => f.write_str(s),
        }
    }
}

/// Positional column index. Positions come from slice indices; anything past
/// `i64::MAX` saturates.
impl From<usize> for ColKey {
    fn from(n: usize) -> Self {
        ColKey::Index(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for ColKey {
    fn from(s: &str) -> Self {
        ColKey::Name(s.to_string())
    }
}

// Both key types share the same SQL and serde representation: an integer when
// the key is numeric, text otherwise. The table columns carry no affinity so
// SQLite keeps whichever storage class was written.
macro_rules! int_or_text_key {
    ($ty:ident, $int:ident, $text:ident, $expecting:literal) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(match self {
                    $ty::$int(n) => ToSqlOutput::from(*n),
                    $ty::$text(s) => ToSqlOutput::from(s.as_str()),
                })
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                match value {
                    ValueRef::Integer(n) => Ok($ty::$int(n)),
                    ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                        .map(|s| $ty::$text(s.to_string()))
                        .map_err(|e| FromSqlError::Other(Box::new(e))),
                    _ => Err(FromSqlError::InvalidType),
                }
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $ty::$int(n) => serializer.serialize_i64(*n),
                    $ty::$text(s) => serializer.serialize_str(s),
                }
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                struct KeyVisitor;

                impl<'de> Visitor<'de> for KeyVisitor {
                    type Value = $ty;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str($expecting)
                    }

                    fn visit_i64<E: de::Error>(self, v: i64) -> Result<$ty, E> {
                        Ok($ty::$int(v))
                    }

                    fn visit_u64<E: de::Error>(self, v: u64) -> Result<$ty, E> {
                        i64::try_from(v)
                            .map($ty::$int)
                            .map_err(|_| E::custom("key out of range"))
                    }

                    fn visit_str<E: de::Error>(self, v: &str) -> Result<$ty, E> {
                        Ok($ty::parse(v))
                    }
                }

                deserializer.deserialize_any(KeyVisitor)
            }
        }
    };
}

int_or_text_key!(ItemId, Int, Str, "an integer or string item id");
int_or_text_key!(ColKey, Index, Name, "an integer or string column key");

/// One persisted value of the tabular attribute.
///
/// `language` and `last_modified` are filled when the cell was read from the
/// value table; cells built for writing leave them empty and the writer stamps
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub attribute_id: i64,
    pub item_id: ItemId,
    pub row: u32,
    pub col: ColKey,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl Cell {
    pub fn new(
        attribute_id: i64,
        item_id: ItemId,
        row: u32,
        col: ColKey,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute_id,
            item_id,
            row,
            col,
            value: value.into(),
            language: None,
            last_modified: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Insert a cell into a grid under its own row and column, replacing any
/// previous cell at that position.
pub fn insert_cell(grid: &mut Grid, cell: Cell) {
    grid.entry(cell.row)
        .or_default()
        .insert(cell.col.clone(), cell);
}

/// Total number of cells held by a grid.
pub fn cell_count(grid: &Grid) -> usize {
    grid.values().map(|row| row.len()).sum()
}
