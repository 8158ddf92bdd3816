use std::thread;

use crate::model::statement::Statement;

use super::{
    commands::{DatabaseCommand, DatabaseCommandRequest, DatabaseCommandResponse},
    control::ControlContext,
    options::DatabaseOptions,
    request_manager::RequestManager,
    table::table::PersonTable,
};

pub struct Database {
    pub(crate) person_table: PersonTable,
    database_options: DatabaseOptions,
}

impl Database {
    pub fn new(database_options: DatabaseOptions) -> Self {
        let person_table = match database_options.seed {
            true => PersonTable::seeded(),
            false => PersonTable::new(),
        };

        Self {
            person_table,
            database_options,
        }
    }

    /// Moves the database onto its own thread, the returned request manager is the only way to reach it
    pub fn run(self) -> RequestManager {
        let (database_sender, database_receiver) = flume::unbounded::<DatabaseCommandRequest>();

        let request_manager =
            RequestManager::new(database_sender, self.database_options.request_timeout);

        log::info!(
            "📀 Data [Rows: {}, Seeded: {}]",
            self.person_table.len(),
            self.database_options.seed
        );

        thread::spawn(move || self.start_thread(database_receiver));

        request_manager
    }

    fn start_thread(mut self, database_receiver: flume::Receiver<DatabaseCommandRequest>) {
        // Process incoming requests from the channel, exits once every request manager is dropped
        while let Ok(DatabaseCommandRequest { command, resolver }) = database_receiver.recv() {
            log::info!("Received request: {}", command.log_format());

            let statement = match command {
                DatabaseCommand::Statement(statement) => statement,
                DatabaseCommand::Control(control) => {
                    let control_context = ControlContext {
                        resolver,
                        database: &self,
                    };

                    // Shutdown is the only control, nothing after it is processed
                    control_context.run(control);

                    return;
                }
            };

            let response = self.process_statement(statement);

            // Sends the response data back to the caller of the request (i.e.), the entity on the other end of the channel
            if resolver.send(response).is_err() {
                log::warn!("Requester dropped before receiving a response");
            }
        }

        log::info!("All request managers dropped, stopping database thread");
    }

    pub fn process_statement(&mut self, statement: Statement) -> DatabaseCommandResponse {
        let is_mutation = statement.is_mutation();

        match self.person_table.apply(statement) {
            Ok(result) => {
                if is_mutation {
                    log::info!("✅ Committed: [Rows: {}]", self.person_table.len());
                }

                DatabaseCommandResponse::statement_commit(result)
            }
            Err(err) => {
                log::info!("⚠️  Rolled back: {}", err);

                DatabaseCommandResponse::statement_rollback(&err.to_string())
            }
        }
    }
}
