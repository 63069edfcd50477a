//! Builds parameterized CREATE, SELECT, INSERT, UPDATE, DELETE from an entity descriptor.

use crate::model::{EntityDescriptor, FieldValues};
use crate::sql::BindValue;

/// Quote identifier for SQLite (safe: only from descriptors).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Declared width only; SQLite does not enforce it.
const TEXT_COLUMN_TYPE: &str = "VARCHAR(100)";

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }
}

/// `id, field1, field2, ...` in descriptor order.
fn select_column_list(entity: &EntityDescriptor) -> String {
    std::iter::once("id")
        .chain(entity.field_names())
        .map(quoted)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Idempotent DDL: id is the auto-incrementing key, every field is text, required fields are NOT NULL.
pub fn create_table(entity: &EntityDescriptor) -> String {
    let mut col_defs = vec![format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", quoted("id"))];
    for f in entity.fields {
        let mut def = format!("{} {}", quoted(f.name), TEXT_COLUMN_TYPE);
        if f.required {
            def.push_str(" NOT NULL");
        }
        col_defs.push(def);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quoted(entity.table_name),
        col_defs.join(",\n  ")
    )
}

/// All rows in id order.
pub fn select_list(entity: &EntityDescriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} ORDER BY {}",
        select_column_list(entity),
        quoted(entity.table_name),
        quoted("id")
    );
    q
}

pub fn select_by_id(entity: &EntityDescriptor, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ?",
        select_column_list(entity),
        quoted(entity.table_name),
        quoted("id")
    );
    q.params.push(BindValue::Int(id));
    q
}

pub fn exists_by_id(entity: &EntityDescriptor, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT 1 FROM {} WHERE {} = ?",
        quoted(entity.table_name),
        quoted("id")
    );
    q.params.push(BindValue::Int(id));
    q
}

/// INSERT every declared field (absent ones as NULL) and return the stored row.
pub fn insert(entity: &EntityDescriptor, values: &FieldValues) -> QueryBuf {
    let mut q = QueryBuf::new();
    let cols: Vec<String> = entity.field_names().map(quoted).collect();
    let placeholders = vec!["?"; cols.len()].join(", ");
    for name in entity.field_names() {
        q.params.push(BindValue::Text(values.get(name).cloned().flatten()));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(entity.table_name),
        cols.join(", "),
        placeholders,
        select_column_list(entity)
    );
    q
}

/// Full overwrite: every declared field is assigned, absent ones to NULL.
pub fn update(entity: &EntityDescriptor, id: i64, values: &FieldValues) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut set_parts = Vec::with_capacity(entity.fields.len());
    for name in entity.field_names() {
        set_parts.push(format!("{} = ?", quoted(name)));
        q.params.push(BindValue::Text(values.get(name).cloned().flatten()));
    }
    q.params.push(BindValue::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ? RETURNING {}",
        quoted(entity.table_name),
        set_parts.join(", "),
        quoted("id"),
        select_column_list(entity)
    );
    q
}

pub fn count_rows(entity: &EntityDescriptor) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", quoted(entity.table_name));
    q
}

pub fn delete(entity: &EntityDescriptor, id: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(entity.table_name),
        quoted("id")
    );
    q.params.push(BindValue::Int(id));
    q
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{COMPUTER_SYSTEM, ROUTER};

    #[test]
    fn create_table_marks_required_not_null() {
        let ddl = create_table(&COMPUTER_SYSTEM);
        assert!(ddl.starts_with("CREATE TABLE IF NOT EXISTS \"computer_system\""));
        assert!(ddl.contains("\"id\" INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(ddl.contains("\"host_name\" VARCHAR(100) NOT NULL"));
        assert!(ddl.contains("\"floor\" VARCHAR(100),"));
        assert!(!create_table(&ROUTER).contains("NOT NULL"));
    }

    #[test]
    fn insert_binds_every_field_in_order() {
        let mut values = FieldValues::new();
        values.insert("router_name".into(), Some("R1".into()));
        let q = insert(&ROUTER, &values);
        assert_eq!(q.params.len(), ROUTER.fields.len());
        assert_eq!(q.params[1], BindValue::Text(Some("R1".into())));
        assert_eq!(q.params[0], BindValue::Text(None));
        assert!(q.sql.contains("RETURNING \"id\", \"department\""));
    }

    #[test]
    fn update_assigns_all_fields_then_id() {
        let q = update(&ROUTER, 7, &FieldValues::new());
        assert_eq!(q.params.len(), ROUTER.fields.len() + 1);
        assert_eq!(q.params.last(), Some(&BindValue::Int(7)));
        assert!(q.params[..ROUTER.fields.len()].iter().all(|p| *p == BindValue::Text(None)));
        assert!(q.sql.contains("\"price_list\" = ? WHERE \"id\" = ?"));
    }

    #[test]
    fn select_list_is_ordered_by_id() {
        let q = select_list(&ROUTER);
        assert!(q.sql.ends_with("FROM \"router\" ORDER BY \"id\""));
        assert!(q.params.is_empty());
    }

    #[test]
    fn count_rows_targets_the_entity_table() {
        assert_eq!(count_rows(&COMPUTER_SYSTEM).sql, "SELECT COUNT(*) FROM \"computer_system\"");
    }
}
