use core::panic;
use std::{sync::mpsc::Sender, time::Duration};
use thiserror::Error;

use crate::{
    consts::consts::EntityId,
    model::{
        person::Person,
        statement::{Statement, StatementResult},
    },
};

use super::{
    commands::{
        Control, DatabaseCommand, DatabaseCommandControlResponse, DatabaseCommandRequest,
        DatabaseCommandResponse, DatabaseCommandStatementResponse, StatementError,
    },
    table::row::{NewPersonData, UpdatePersonData},
};

#[derive(Clone)]
pub struct RequestManager {
    database_sender: Sender<DatabaseCommandRequest>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestManagerError {
    #[error("Database took too long to respond to the request")]
    DatabaseTimeout,

    #[error(transparent)]
    Statement(#[from] StatementError),
}

/// Goal of the request manager is to provide a simple interface for interacting with the database
///
/// The request manager provides the following APIs. These are sorted by the easiest to use to the most complex
/// 1. CRUD operations on a single person -- these are completely type safe
/// 2. Generic Statement based API -- not type safe because you need to know what Statement maps to what StatementResult (e.g. Statement::Add maps -> StatementResult::Single)
/// 3. Command based API -- used for controls like shutdown
impl RequestManager {
    pub fn new(database_sender: Sender<DatabaseCommandRequest>) -> Self {
        Self { database_sender }
    }

    pub fn send_add(&self, new_person: NewPersonData) -> Result<Person, RequestManagerError> {
        let statement_result = self.send_statement(Statement::Add(new_person))?;
        Ok(statement_result.single())
    }

    pub fn send_update(
        &self,
        id: EntityId,
        person_update: UpdatePersonData,
    ) -> Result<Person, RequestManagerError> {
        let statement_result = self.send_statement(Statement::Update(id, person_update))?;
        Ok(statement_result.single())
    }

    pub fn send_get(&self, id: EntityId) -> Result<Person, RequestManagerError> {
        let statement_result = self.send_statement(Statement::Get(id))?;
        Ok(statement_result.single())
    }

    pub fn send_remove(&self, id: EntityId) -> Result<Person, RequestManagerError> {
        let statement_result = self.send_statement(Statement::Remove(id))?;
        Ok(statement_result.single())
    }

    pub fn send_list(&self) -> Result<Vec<Person>, RequestManagerError> {
        let statement_result = self.send_statement(Statement::List)?;
        Ok(statement_result.list())
    }

    /// Sends a shutdown request to the database and returns the database's response
    pub fn send_shutdown_request(&self) -> Result<String, RequestManagerError> {
        let response = self.send_command(DatabaseCommand::Control(Control::Shutdown))?;

        match response {
            DatabaseCommandResponse::DatabaseCommandControlResponse(
                DatabaseCommandControlResponse::Success(message),
            ) => Ok(message),
            _ => panic!("Controls always return a control response"),
        }
    }

    /// Sends a single statement to the database and returns the statement result
    pub fn send_statement(
        &self,
        statement: Statement,
    ) -> Result<StatementResult, RequestManagerError> {
        let response = self.send_command(DatabaseCommand::Statement(statement))?;

        match response {
            DatabaseCommandResponse::DatabaseCommandStatementResponse(statement_response) => {
                match statement_response {
                    DatabaseCommandStatementResponse::Commit(result) => Ok(result),
                    DatabaseCommandStatementResponse::Failure(error) => {
                        Err(RequestManagerError::Statement(error))
                    }
                }
            }
            _ => panic!("Statements always return a statement response"),
        }
    }

    pub fn send_command(
        &self,
        command: DatabaseCommand,
    ) -> Result<DatabaseCommandResponse, RequestManagerError> {
        let (resolver, response_receiver) = oneshot::channel::<DatabaseCommandResponse>();

        let request = DatabaseCommandRequest { resolver, command };

        // Sends the request to the database worker, database will respond
        //  on the response_receiver once it is finished processing the request
        self.database_sender
            .send(request)
            .expect("Should always be able to send a request to the database");

        match response_receiver.recv_timeout(Duration::from_secs(2)) {
            Ok(response) => Ok(response),
            Err(oneshot::RecvTimeoutError::Timeout) => Err(RequestManagerError::DatabaseTimeout),
            Err(oneshot::RecvTimeoutError::Disconnected) => panic!("Database thread exited"),
        }
    }
}
