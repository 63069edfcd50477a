//! One stored row: store-assigned id plus text values keyed by field name.

use serde::Serialize;
use std::collections::HashMap;

/// Field name -> value. `None` is a NULL column; `Some("")` is an empty submission.
pub type FieldValues = HashMap<String, Option<String>>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: i64,
    #[serde(flatten)]
    pub values: FieldValues,
}

impl Record {
    /// Value for display; NULL and unknown fields read as "".
    pub fn get(&self, field: &str) -> &str {
        self.values
            .get(field)
            .and_then(|v| v.as_deref())
            .unwrap_or("")
    }
}
