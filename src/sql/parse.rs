use crate::error::{self, Result};
use sqlparser::{
    ast::{Ident, ObjectName, ObjectNamePart, Statement, TableObject},
    dialect::GenericDialect,
    parser::Parser,
};

/// Tables owned by the service itself. Practice tables may never take one of these names.
const RESERVED_TABLE_NAMES: &[&str] = &[
    "companies",
    "company_domains",
    "domains",
    "dynamic_tables",
    "questions",
    "seaql_migrations",
    "submissions",
    "topics",
    "users",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertTarget {
    pub name: String,
    /// Explicit column lists of every INSERT, flattened. Empty when no statement names its columns.
    pub columns: Vec<String>,
}

fn parse(sql: &str) -> Result<Vec<Statement>> {
    Parser::parse_sql(&GenericDialect {}, sql).map_err(|err| {
        debug!("failed to parse statement: {}", err);
        error::INVALID_STATEMENT.with_message(err.to_string())
    })
}

fn normalize(ident: &Ident) -> String {
    match ident.quote_style {
        Some(_) => ident.value.clone(),
        None => ident.value.to_lowercase(),
    }
}

fn table_name(name: &ObjectName) -> Result<String> {
    let [ObjectNamePart::Identifier(ident)] = name.0.as_slice() else {
        return Err(error::INVALID_STATEMENT.with_message("table names must not be qualified"));
    };

    let name = normalize(ident);
    validate_table_name(&name)?;

    Ok(name)
}

/// Extracts the table created by a single `CREATE TABLE` statement.
pub fn create_table_target(sql: &str) -> Result<TableDefinition> {
    let statements = parse(sql)?;

    let [Statement::CreateTable(create)] = statements.as_slice() else {
        return Err(
            error::INVALID_STATEMENT.with_message("expected exactly one CREATE TABLE statement")
        );
    };

    Ok(TableDefinition {
        name: table_name(&create.name)?,
        columns: create.columns.iter().map(|col| normalize(&col.name)).collect(),
    })
}

/// Extracts the table targeted by one or more `INSERT INTO` statements.
///
/// Every statement has to be an insert into the same table.
pub fn insert_target(sql: &str) -> Result<InsertTarget> {
    let statements = parse(sql)?;

    if statements.is_empty() {
        return Err(error::INVALID_STATEMENT.with_message("expected an INSERT statement"));
    }

    let mut target: Option<InsertTarget> = None;

    for statement in &statements {
        let Statement::Insert(insert) = statement else {
            return Err(error::INVALID_STATEMENT.with_message("only INSERT statements are allowed"));
        };

        let TableObject::TableName(name) = &insert.table else {
            return Err(error::INVALID_STATEMENT.with_message("INSERT must target a table"));
        };

        let name = table_name(name)?;

        let entry = target.get_or_insert_with(|| InsertTarget {
            name: name.clone(),
            columns: Vec::new(),
        });

        if entry.name != name {
            return Err(error::TABLE_NAME_MISMATCH);
        }

        entry.columns.extend(insert.columns.iter().map(normalize));
    }

    target.ok_or(error::INVALID_STATEMENT)
}

/// Every explicitly named insert column must be defined by the table.
pub fn check_columns(definition: &TableDefinition, insert: &InsertTarget) -> Result {
    let unknown: Vec<&str> = insert
        .columns
        .iter()
        .filter(|col| !definition.columns.contains(col))
        .map(String::as_str)
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    Err(error::COLUMN_MISMATCH.with_message(format!(
        "columns not defined by table {}: {}",
        definition.name,
        unknown.join(", ")
    )))
}

pub fn validate_table_name(name: &str) -> Result {
    let mut chars = name.chars();

    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if !valid {
        return Err(error::INVALID_STATEMENT.with_message(format!("invalid table name: {name:?}")));
    }

    if RESERVED_TABLE_NAMES.contains(&name) {
        return Err(error::RESERVED_TABLE_NAME);
    }

    Ok(())
}

/// `name` must have passed [`validate_table_name`].
pub fn drop_table_statement(name: &str) -> String {
    format!("DROP TABLE IF EXISTS \"{name}\"")
}
