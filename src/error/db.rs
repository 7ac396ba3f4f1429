use sea_orm::{DbErr, RuntimeErr};
use sqlx::error::{DatabaseError as SqlxDatabaseError, ErrorKind};
use sqlx::Error as SqlxError;

pub trait DatabaseError {
    fn unique_violation(&self, constraint: &str) -> bool;
    fn foreign_key_violation(&self, constraint: &str) -> bool;
}

impl DatabaseError for DbErr {
    fn unique_violation(&self, constraint: &str) -> bool {
        is_kind_and_constraint(self, ErrorKind::UniqueViolation, constraint)
    }

    fn foreign_key_violation(&self, constraint: &str) -> bool {
        is_kind_and_constraint(self, ErrorKind::ForeignKeyViolation, constraint)
    }
}

#[allow(clippy::borrowed_box)]
fn get_database_error(err: &DbErr) -> Option<&Box<dyn SqlxDatabaseError + 'static>> {
    match err {
        DbErr::Query(RuntimeErr::SqlxError(SqlxError::Database(db_err))) => Some(db_err),
        DbErr::Exec(RuntimeErr::SqlxError(SqlxError::Database(db_err))) => Some(db_err),
        _ => None,
    }
}

// sqlite does not report constraint names, any violation of the right kind matches there
fn is_kind_and_constraint(err: &DbErr, kind: ErrorKind, constraint: &str) -> bool {
    let Some(db_err) = get_database_error(err) else {
        return false;
    };

    if db_err.kind() != kind {
        return false;
    }

    db_err.constraint().map_or(true, |name| name == constraint)
}

/// The message reported by the database engine, without sea-orm's wrapping.
pub fn driver_message(err: &DbErr) -> String {
    if let Some(db_err) = get_database_error(err) {
        return db_err.message().to_owned();
    }

    match err {
        DbErr::Custom(message) | DbErr::Type(message) => message.clone(),
        _ => err.to_string(),
    }
}
