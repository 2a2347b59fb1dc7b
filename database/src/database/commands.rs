use thiserror::Error;

use crate::{
    database::table::table::ApplyErrors,
    model::statement::{Statement, StatementResult},
    persistence::storage::StorageError,
};

/// Database commands are how we interact with the database, they are how we ask the database to run a statement, shutdown, etc
///
/// The majority of interactions happen via statements (e.g. add, update, remove, etc), but there are also commands that are used
/// to control the database (e.g. shutdown).
#[derive(Debug)]
pub enum DatabaseCommand {
    /// Sends a statement to the database and returns the result
    Statement(Statement),

    /// Commands that control the database
    Control(Control),
}

impl DatabaseCommand {
    /// Prints complex logs in a more readable format
    pub fn log_format(&self) -> String {
        match self {
            DatabaseCommand::Statement(statement) => format!("{:?}", statement),
            DatabaseCommand::Control(control) => format!("{:?}", control),
        }
    }
}

#[derive(Debug)]
pub enum Control {
    /// Performs a safe shutdown of the database, requests before the shutdown will be run / committed, requests after the shutdown will be ignored
    Shutdown,
}

/// Why a statement did not commit. Either the table rejected it, or it
/// committed in memory but the collection could not be persisted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatementError {
    #[error(transparent)]
    Apply(#[from] ApplyErrors),

    #[error("Unable to persist collection: {0}")]
    Persistence(#[from] StorageError),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatabaseCommandStatementResponse {
    /// Statement has successfully committed, returns the statement result
    Commit(StatementResult),
    /// Statement did not commit, returns why
    Failure(StatementError),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatabaseCommandControlResponse {
    /// Successfully performed the control
    Success(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatabaseCommandResponse {
    DatabaseCommandStatementResponse(DatabaseCommandStatementResponse),
    DatabaseCommandControlResponse(DatabaseCommandControlResponse),
}

impl DatabaseCommandResponse {
    pub fn control_success(message: &str) -> Self {
        DatabaseCommandResponse::DatabaseCommandControlResponse(
            DatabaseCommandControlResponse::Success(message.to_string()),
        )
    }

    pub fn statement_commit(result: StatementResult) -> Self {
        DatabaseCommandResponse::DatabaseCommandStatementResponse(
            DatabaseCommandStatementResponse::Commit(result),
        )
    }

    pub fn statement_failure(error: StatementError) -> Self {
        DatabaseCommandResponse::DatabaseCommandStatementResponse(
            DatabaseCommandStatementResponse::Failure(error),
        )
    }
}

pub struct DatabaseCommandRequest {
    pub resolver: oneshot::Sender<DatabaseCommandResponse>,
    pub command: DatabaseCommand,
}
