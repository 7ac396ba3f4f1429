use super::const_error;

const_error! {
    #[error("E000", "internal server error")]
    #[status(INTERNAL_SERVER_ERROR)]
    const INTERNAL;
}

const_error! {
    #[error("E001", "missing fields")]
    #[status(UNPROCESSABLE_ENTITY)]
    const JSON_MISSING_FIELDS;
}

const_error! {
    #[error("E002", "syntax error")]
    #[status(BAD_REQUEST)]
    const JSON_SYNTAX_ERROR;
}

const_error! {
    #[error("E003", "missing or wrong content-type")]
    #[status(BAD_REQUEST)]
    const JSON_CONTENT_TYPE;
}

const_error! {
    #[error("E004", "invalid data")]
    #[status(BAD_REQUEST)]
    const JSON_VALIDATE_INVALID;
}

const_error! {
    #[error("E005", "database error")]
    #[status(INTERNAL_SERVER_ERROR)]
    const DATABASE_ERROR;
}

const_error! {
    #[error("E006", "failed to deserialize json")]
    #[status(INTERNAL_SERVER_ERROR)]
    const JSON_DESERIALIZE;
}

const_error! {
    #[error("E007", "could not get claims")]
    #[status(UNAUTHORIZED)]
    const COULD_NOT_GET_CLAIMS;
}

const_error! {
    #[error("E008", "invalid jwt token")]
    #[status(UNAUTHORIZED)]
    const JWT_INVALID_TOKEN;
}

const_error! {
    #[error("E009", "not enough permissions")]
    #[status(FORBIDDEN)]
    const NOT_ENOUGH_PERMISSIONS;
}

const_error! {
    #[error("E010", "user already exists")]
    #[status(BAD_REQUEST)]
    const USER_ALREADY_EXISTS;
}

const_error! {
    #[error("E011", "user is not registered")]
    #[status(FORBIDDEN)]
    const USER_NOT_REGISTERED;
}

const_error! {
    #[error("E012", "missing required fields")]
    #[status(BAD_REQUEST)]
    const MISSING_FIELDS;
}

const_error! {
    #[error("E013", "question not found")]
    #[status(NOT_FOUND)]
    const QUESTION_NOT_FOUND;
}

const_error! {
    #[error("E014", "question or solution not found")]
    #[status(NOT_FOUND)]
    const SOLUTION_NOT_FOUND;
}

const_error! {
    #[error("E015", "table not found")]
    #[status(NOT_FOUND)]
    const TABLE_NOT_FOUND;
}

const_error! {
    #[error("E016", "table name mismatch between statements")]
    #[status(BAD_REQUEST)]
    const TABLE_NAME_MISMATCH;
}

const_error! {
    #[error("E017", "insert columns do not match the table definition")]
    #[status(BAD_REQUEST)]
    const COLUMN_MISMATCH;
}

const_error! {
    #[error("E018", "table already exists")]
    #[status(BAD_REQUEST)]
    const DUPLICATE_TABLE;
}

const_error! {
    #[error("E019", "invalid sql statement")]
    #[status(BAD_REQUEST)]
    const INVALID_STATEMENT;
}

const_error! {
    #[error("E020", "table name is reserved")]
    #[status(BAD_REQUEST)]
    const RESERVED_TABLE_NAME;
}

const_error! {
    #[error("E021", "failed to provision table")]
    #[status(INTERNAL_SERVER_ERROR)]
    const PROVISIONING_FAILED;
}

const_error! {
    #[error("E022", "invalid table state transition")]
    #[status(INTERNAL_SERVER_ERROR)]
    const INVALID_TABLE_STATE;
}

const_error! {
    #[error("E023", "company not found")]
    #[status(NOT_FOUND)]
    const COMPANY_NOT_FOUND;
}

const_error! {
    #[error("E024", "topic not found")]
    #[status(NOT_FOUND)]
    const TOPIC_NOT_FOUND;
}

const_error! {
    #[error("E025", "domain not found")]
    #[status(NOT_FOUND)]
    const DOMAIN_NOT_FOUND;
}

const_error! {
    #[error("E026", "company domain already exists")]
    #[status(BAD_REQUEST)]
    const DUPLICATE_COMPANY_DOMAIN;
}

const_error! {
    #[error("E027", "domain name already exists")]
    #[status(BAD_REQUEST)]
    const DUPLICATE_DOMAIN_NAME;
}

const_error! {
    #[error("E028", "query must contain createTable and addData")]
    #[status(BAD_REQUEST)]
    const INVALID_QUERY_PAIR;
}

const_error! {
    #[error("E029", "company still has questions")]
    #[status(BAD_REQUEST)]
    const COMPANY_HAS_QUESTIONS;
}

const_error! {
    #[error("E030", "topic still has questions")]
    #[status(BAD_REQUEST)]
    const TOPIC_HAS_QUESTIONS;
}

const_error! {
    #[error("E031", "table belongs to a question")]
    #[status(BAD_REQUEST)]
    const TABLE_OWNED_BY_QUESTION;
}

const_error! {
    #[error("E032", "table info not found")]
    #[status(NOT_FOUND)]
    const TABLE_INFO_NOT_FOUND;
}
