use crate::model::statement::{Statement, StatementResult};

/// Database commands are how we interact with the database, they are how we ask the database to run a statement or shutdown
///
/// The majority of interactions happen via statements (e.g. add, remove, list, etc), but there are also commands that are used
/// to control the database (e.g. shutdown).
#[derive(Debug)]
pub enum DatabaseCommand {
    /// Sends a single statement to the database and returns the result
    Statement(Statement),

    /// Commands that control the database
    Control(Control),
}

impl DatabaseCommand {
    /// Prints complex logs in a more readable format
    pub fn log_format(&self) -> String {
        match self {
            DatabaseCommand::Statement(Statement::Add(new_person)) => {
                format!("Add(name: {}, number: {})", new_person.name, new_person.number)
            }
            DatabaseCommand::Statement(statement) => format!("{:?}", statement),
            DatabaseCommand::Control(control) => format!("Control({:?})", control),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatabaseCommandStatementResponse {
    /// Statement has been applied, returns its result
    Commit(StatementResult),
    /// Statement broke a constraint and nothing was applied, returns a message for why
    Rollback(String),
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

    pub fn statement_rollback(message: &str) -> Self {
        DatabaseCommandResponse::DatabaseCommandStatementResponse(
            DatabaseCommandStatementResponse::Rollback(message.to_string()),
        )
    }
}

#[derive(Debug, PartialEq)]
pub enum Control {
    /// Stops the database thread, commands sent before the shutdown are answered, later ones are not
    Shutdown,
}

pub struct DatabaseCommandRequest {
    pub resolver: oneshot::Sender<DatabaseCommandResponse>,
    pub command: DatabaseCommand,
}
