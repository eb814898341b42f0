//! Builds parameterized SELECT, INSERT, UPDATE, DELETE from a table
//! descriptor and a validated field set. Identifiers originate from
//! information_schema, never from the request; row ids and field values are
//! always bound, never interpolated.

use crate::catalog::TableDescriptor;
use crate::error::ApiError;
use crate::sql::SqlParam;

/// Quote an identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, p: SqlParam) -> usize {
        self.params.push(p);
        self.params.len()
    }
}

/// Keyset page taken from the query string. A field is Some only when the
/// parameter was present in the request; invalid values are already
/// defaulted by the caller (0 for offset, 5 for limit).
#[derive(Clone, Copy, Debug, Default)]
pub struct Page {
    pub offset: Option<i32>,
    pub limit: Option<i64>,
}

fn select_column_list(table: &TableDescriptor) -> String {
    if table.columns.is_empty() {
        // Table exists but no column is representable; keep the query valid.
        return "*".into();
    }
    table
        .columns
        .iter()
        .map(|c| quoted(&c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT over the whole table. The offset is a strictly-greater-than filter
/// on the identity column, not a row skip-count; rows come back in ascending
/// identity order whenever the table has an identity column.
pub fn select_all(table: &TableDescriptor, page: Page) -> Result<QueryBuf, ApiError> {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT {} FROM {}",
        select_column_list(table),
        quoted(&table.table_name)
    );
    if let Some(offset) = page.offset {
        let identity = quoted(table.identity()?);
        let n = q.push_param(SqlParam::Int(offset));
        q.sql.push_str(&format!(" WHERE {} > ${}", identity, n));
    }
    if let Some(identity) = table.identity.as_deref() {
        q.sql.push_str(&format!(" ORDER BY {}", quoted(identity)));
    }
    if let Some(limit) = page.limit {
        // Validated non-negative by the caller, safe to interpolate.
        q.sql.push_str(&format!(" LIMIT {}", limit));
    }
    Ok(q)
}

/// SELECT one row by identity value.
pub fn select_by_id(table: &TableDescriptor, id: i32) -> Result<QueryBuf, ApiError> {
    let mut q = QueryBuf::new();
    let identity = quoted(table.identity()?);
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE {} = ${}",
        select_column_list(table),
        quoted(&table.table_name),
        identity,
        n
    );
    Ok(q)
}

/// INSERT from a validated field set, returning the generated identity value.
pub fn insert(table: &TableDescriptor, fields: &[(String, SqlParam)]) -> Result<QueryBuf, ApiError> {
    let mut q = QueryBuf::new();
    let identity = quoted(table.identity()?);
    if fields.is_empty() {
        q.sql = format!(
            "INSERT INTO {} DEFAULT VALUES RETURNING {}",
            quoted(&table.table_name),
            identity
        );
        return Ok(q);
    }
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    for (name, param) in fields {
        let n = q.push_param(param.clone());
        cols.push(quoted(name));
        placeholders.push(format!("${}", n));
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(&table.table_name),
        cols.join(", "),
        placeholders.join(", "),
        identity
    );
    Ok(q)
}

/// UPDATE by identity value. The identity column itself is never part of the
/// SET list; a field set that leaves nothing to set yields None and the
/// caller reports zero affected rows without executing anything.
pub fn update(
    table: &TableDescriptor,
    id: i32,
    fields: &[(String, SqlParam)],
) -> Result<Option<QueryBuf>, ApiError> {
    let identity = table.identity()?.to_string();
    let mut q = QueryBuf::new();
    let mut sets = Vec::new();
    for (name, param) in fields {
        if *name == identity {
            continue;
        }
        let n = q.push_param(param.clone());
        sets.push(format!("{} = ${}", quoted(name), n));
    }
    if sets.is_empty() {
        return Ok(None);
    }
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quoted(&table.table_name),
        sets.join(", "),
        quoted(&identity),
        n
    );
    Ok(Some(q))
}

/// DELETE by identity value.
pub fn delete(table: &TableDescriptor, id: i32) -> Result<QueryBuf, ApiError> {
    let mut q = QueryBuf::new();
    let identity = quoted(table.identity()?);
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quoted(&table.table_name),
        identity,
        n
    );
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ColumnDescriptor, ColumnKind};

    fn users() -> TableDescriptor {
        TableDescriptor {
            table_name: "users".into(),
            columns: vec![
                ColumnDescriptor { name: "user_id".into(), kind: ColumnKind::Int },
                ColumnDescriptor { name: "login".into(), kind: ColumnKind::Text },
                ColumnDescriptor { name: "info".into(), kind: ColumnKind::NullableText },
            ],
            identity: Some("user_id".into()),
        }
    }

    #[test]
    fn select_all_without_page_has_no_filter_or_limit() {
        let q = select_all(&users(), Page::default()).unwrap();
        assert_eq!(
            q.sql,
            "SELECT \"user_id\", \"login\", \"info\" FROM \"users\" ORDER BY \"user_id\""
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn offset_is_a_keyset_filter_and_limit_is_appended() {
        let q = select_all(&users(), Page { offset: Some(3), limit: Some(5) }).unwrap();
        assert_eq!(
            q.sql,
            "SELECT \"user_id\", \"login\", \"info\" FROM \"users\" \
             WHERE \"user_id\" > $1 ORDER BY \"user_id\" LIMIT 5"
        );
        assert_eq!(q.params, vec![SqlParam::Int(3)]);
    }

    #[test]
    fn limit_applies_without_offset() {
        let q = select_all(&users(), Page { offset: None, limit: Some(2) }).unwrap();
        assert_eq!(
            q.sql,
            "SELECT \"user_id\", \"login\", \"info\" FROM \"users\" ORDER BY \"user_id\" LIMIT 2"
        );
        assert!(q.params.is_empty());
    }

    #[test]
    fn select_by_id_binds_the_id() {
        let q = select_by_id(&users(), 12).unwrap();
        assert_eq!(
            q.sql,
            "SELECT \"user_id\", \"login\", \"info\" FROM \"users\" WHERE \"user_id\" = $1"
        );
        assert_eq!(q.params, vec![SqlParam::Int(12)]);
    }

    #[test]
    fn insert_uses_only_supplied_fields_and_returns_identity() {
        let fields = vec![
            ("login".to_string(), SqlParam::Text("ada".into())),
            ("info".to_string(), SqlParam::NullText),
        ];
        let q = insert(&users(), &fields).unwrap();
        assert_eq!(
            q.sql,
            "INSERT INTO \"users\" (\"login\", \"info\") VALUES ($1, $2) RETURNING \"user_id\""
        );
        assert_eq!(
            q.params,
            vec![SqlParam::Text("ada".into()), SqlParam::NullText]
        );
    }

    #[test]
    fn empty_insert_falls_back_to_default_values() {
        let q = insert(&users(), &[]).unwrap();
        assert_eq!(
            q.sql,
            "INSERT INTO \"users\" DEFAULT VALUES RETURNING \"user_id\""
        );
    }

    #[test]
    fn update_excludes_the_identity_column_from_set() {
        let fields = vec![
            ("user_id".to_string(), SqlParam::Int(99)),
            ("login".to_string(), SqlParam::Text("grace".into())),
        ];
        let q = update(&users(), 12, &fields).unwrap().unwrap();
        assert_eq!(
            q.sql,
            "UPDATE \"users\" SET \"login\" = $1 WHERE \"user_id\" = $2"
        );
        assert_eq!(
            q.params,
            vec![SqlParam::Text("grace".into()), SqlParam::Int(12)]
        );
    }

    #[test]
    fn update_with_nothing_to_set_builds_no_statement() {
        assert!(update(&users(), 12, &[]).unwrap().is_none());
        let only_identity = vec![("user_id".to_string(), SqlParam::Int(1))];
        assert!(update(&users(), 12, &only_identity).unwrap().is_none());
    }

    #[test]
    fn delete_binds_the_id() {
        let q = delete(&users(), 4).unwrap();
        assert_eq!(q.sql, "DELETE FROM \"users\" WHERE \"user_id\" = $1");
        assert_eq!(q.params, vec![SqlParam::Int(4)]);
    }

    #[test]
    fn operations_needing_identity_fail_without_one() {
        let t = TableDescriptor {
            table_name: "notes".into(),
            columns: vec![ColumnDescriptor { name: "body".into(), kind: ColumnKind::Text }],
            identity: None,
        };
        assert!(select_by_id(&t, 1).is_err());
        assert!(delete(&t, 1).is_err());
        assert!(select_all(&t, Page { offset: Some(0), limit: None }).is_err());
        // A plain unpaged list still works.
        let q = select_all(&t, Page::default()).unwrap();
        assert_eq!(q.sql, "SELECT \"body\" FROM \"notes\"");
    }
}
