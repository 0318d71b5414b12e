//! Builds parameterized DDL, SELECT, INSERT, UPDATE, DELETE from a static table layout.
//! Identifiers come from compiled-in layouts or config only; values are always parameters.

use crate::store::Table;

/// Quote identifier for PostgreSQL.
pub fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Full qualified table name.
pub fn qualified_table(schema: &str, table: &str) -> String {
    format!("{}.{}", quoted(schema), quoted(table))
}

fn column_list(table: &Table) -> String {
    table
        .columns
        .iter()
        .map(|c| quoted(c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn create_schema(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema))
}

/// Idempotent CREATE TABLE. Parent references are plain columns: integrity is checked by lookups.
pub fn create_table(schema: &str, table: &Table) -> String {
    let defs = table
        .columns
        .iter()
        .map(|c| format!("{} {}", quoted(c.name), c.sql_type))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        qualified_table(schema, table.name),
        defs
    )
}

pub fn select_all(schema: &str, table: &Table) -> String {
    format!(
        "SELECT {} FROM {}",
        column_list(table),
        qualified_table(schema, table.name)
    )
}

/// SELECT by primary key. Caller binds the id as `$1`.
pub fn select_by_key(schema: &str, table: &Table) -> String {
    format!(
        "SELECT {} FROM {} WHERE {} = $1",
        column_list(table),
        qualified_table(schema, table.name),
        quoted(table.key())
    )
}

/// INSERT of every column; placeholders follow column order.
pub fn insert(schema: &str, table: &Table) -> String {
    let placeholders = (1..=table.columns.len())
        .map(|n| format!("${}", n))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        qualified_table(schema, table.name),
        column_list(table),
        placeholders
    )
}

/// Full-row UPDATE keyed on `$1`; the remaining columns are `$2..`, in column order.
pub fn update(schema: &str, table: &Table) -> String {
    let sets = table
        .columns
        .iter()
        .enumerate()
        .skip(1)
        .map(|(i, c)| format!("{} = ${}", quoted(c.name), i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "UPDATE {} SET {} WHERE {} = $1",
        qualified_table(schema, table.name),
        sets,
        quoted(table.key())
    )
}

pub fn delete(schema: &str, table: &Table) -> String {
    format!(
        "DELETE FROM {} WHERE {} = $1",
        qualified_table(schema, table.name),
        quoted(table.key())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{City, Hotel};
    use crate::store::Entity;

    #[test]
    fn quotes_embedded_quotes() {
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn builds_crud_statements() {
        let t = Hotel::TABLE;
        assert_eq!(
            select_all("bookings", &t),
            r#"SELECT "hotel_id", "name", "address", "city_id" FROM "bookings"."hotels""#
        );
        assert_eq!(
            select_by_key("bookings", &t),
            r#"SELECT "hotel_id", "name", "address", "city_id" FROM "bookings"."hotels" WHERE "hotel_id" = $1"#
        );
        assert_eq!(
            insert("bookings", &t),
            r#"INSERT INTO "bookings"."hotels" ("hotel_id", "name", "address", "city_id") VALUES ($1, $2, $3, $4)"#
        );
        assert_eq!(
            update("bookings", &t),
            r#"UPDATE "bookings"."hotels" SET "name" = $2, "address" = $3, "city_id" = $4 WHERE "hotel_id" = $1"#
        );
        assert_eq!(
            delete("bookings", &t),
            r#"DELETE FROM "bookings"."hotels" WHERE "hotel_id" = $1"#
        );
    }

    #[test]
    fn ddl_has_no_foreign_keys() {
        let ddl = create_table("bookings", &City::TABLE);
        assert_eq!(
            ddl,
            r#"CREATE TABLE IF NOT EXISTS "bookings"."cities" ("city_id" TEXT PRIMARY KEY, "name" TEXT NOT NULL)"#
        );
        assert!(!create_table("bookings", &Hotel::TABLE).contains("REFERENCES"));
    }
}
