use std::time::Duration;

use thiserror::Error;

use crate::{
    consts::consts::PersonId,
    model::{
        person::{NewPerson, Person},
        statement::{Statement, StatementResult},
    },
};

use super::commands::{
    Control, DatabaseCommand, DatabaseCommandControlResponse, DatabaseCommandRequest,
    DatabaseCommandResponse, DatabaseCommandStatementResponse,
};

#[derive(Error, Debug, PartialEq)]
pub enum RequestManagerError {
    #[error("Database took too long to respond to request")]
    DatabaseTimeout,
    #[error("Database is not running")]
    DatabaseUnavailable,
    #[error("{0}")]
    Rollback(String),
    #[error("Database responded with an unexpected result: {0}")]
    UnexpectedResponse(String),
}

/// Goal of the request manager is to provide a simple interface for interacting with the database
///
/// The database thread is the only owner of the phonebook, every read and write goes through here
/// and is applied one at a time. The request manager provides the following APIs
/// 1. Typed operations on the phonebook (add, remove, get, list, count)
/// 2. A generic statement API, you need to know which `StatementResult` a `Statement` maps to
/// 3. Control commands (shutdown)
#[derive(Clone, Debug)]
pub struct RequestManager {
    database_sender: flume::Sender<DatabaseCommandRequest>,
    request_timeout: Duration,
}

impl RequestManager {
    pub fn new(
        database_sender: flume::Sender<DatabaseCommandRequest>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            database_sender,
            request_timeout,
        }
    }

    pub async fn send_add(&self, new_person: NewPerson) -> Result<Person, RequestManagerError> {
        match self.send_single_statement(Statement::Add(new_person)).await? {
            StatementResult::Single(person) => Ok(person),
            other => Err(unexpected(other)),
        }
    }

    /// Returns the removed person, `None` when nobody had that id
    pub async fn send_remove(&self, id: PersonId) -> Result<Option<Person>, RequestManagerError> {
        match self.send_single_statement(Statement::Remove(id)).await? {
            StatementResult::GetSingle(person) => Ok(person),
            other => Err(unexpected(other)),
        }
    }

    pub async fn send_get(&self, id: PersonId) -> Result<Option<Person>, RequestManagerError> {
        match self.send_single_statement(Statement::Get(id)).await? {
            StatementResult::GetSingle(person) => Ok(person),
            other => Err(unexpected(other)),
        }
    }

    pub async fn send_get_index(
        &self,
        index: usize,
    ) -> Result<Option<Person>, RequestManagerError> {
        match self.send_single_statement(Statement::GetIndex(index)).await? {
            StatementResult::GetSingle(person) => Ok(person),
            other => Err(unexpected(other)),
        }
    }

    pub async fn send_list(&self) -> Result<Vec<Person>, RequestManagerError> {
        match self.send_single_statement(Statement::List).await? {
            StatementResult::List(people) => Ok(people),
            other => Err(unexpected(other)),
        }
    }

    pub async fn send_count(&self) -> Result<usize, RequestManagerError> {
        match self.send_single_statement(Statement::Count).await? {
            StatementResult::Count(count) => Ok(count),
            other => Err(unexpected(other)),
        }
    }

    /// Sends a shutdown request to the database and returns the database's response
    pub async fn send_shutdown_request(&self) -> Result<String, RequestManagerError> {
        match self
            .send_command(DatabaseCommand::Control(Control::Shutdown))
            .await?
        {
            DatabaseCommandResponse::DatabaseCommandControlResponse(
                DatabaseCommandControlResponse::Success(message),
            ) => Ok(message),
            other => Err(RequestManagerError::UnexpectedResponse(format!(
                "{:?}",
                other
            ))),
        }
    }

    /// Sends a single statement to the database and returns its result
    pub async fn send_single_statement(
        &self,
        statement: Statement,
    ) -> Result<StatementResult, RequestManagerError> {
        match self.send_command(DatabaseCommand::Statement(statement)).await? {
            DatabaseCommandResponse::DatabaseCommandStatementResponse(
                DatabaseCommandStatementResponse::Commit(result),
            ) => Ok(result),
            DatabaseCommandResponse::DatabaseCommandStatementResponse(
                DatabaseCommandStatementResponse::Rollback(message),
            ) => Err(RequestManagerError::Rollback(message)),
            other => Err(RequestManagerError::UnexpectedResponse(format!(
                "{:?}",
                other
            ))),
        }
    }

    pub async fn send_command(
        &self,
        command: DatabaseCommand,
    ) -> Result<DatabaseCommandResponse, RequestManagerError> {
        let (resolver, response_receiver) = oneshot::channel::<DatabaseCommandResponse>();

        let request = DatabaseCommandRequest { resolver, command };

        // Sends the request to the database thread, database will respond
        //  on the response_receiver once it's finished processing the request
        self.database_sender
            .send_async(request)
            .await
            .map_err(|_| RequestManagerError::DatabaseUnavailable)?;

        match tokio::time::timeout(self.request_timeout, response_receiver).await {
            Ok(Ok(response)) => Ok(response),
            // Database thread exited without answering
            Ok(Err(_)) => Err(RequestManagerError::DatabaseUnavailable),
            // The database may still apply the statement after we stop waiting, an add can be stored
            //  even though the caller sees a timeout
            Err(_) => {
                log::warn!(
                    "Database did not respond within {}ms, a mutation may still be applied",
                    self.request_timeout.as_millis()
                );

                Err(RequestManagerError::DatabaseTimeout)
            }
        }
    }
}

fn unexpected(result: StatementResult) -> RequestManagerError {
    RequestManagerError::UnexpectedResponse(format!("{:?}", result))
}
