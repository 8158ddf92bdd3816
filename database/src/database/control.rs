use oneshot::Sender;

use super::{
    commands::{Control, DatabaseCommandResponse},
    database::Database,
};

pub struct ControlContext<'a> {
    pub resolver: Sender<DatabaseCommandResponse>,
    pub database: &'a Database,
}

impl<'a> ControlContext<'a> {
    /// Answers the control command, the database thread stops once this returns
    pub fn run(self, control: Control) {
        match control {
            Control::Shutdown => self.shutdown(),
        }
    }

    fn send_response(self, response: DatabaseCommandResponse) {
        // The requester may have timed out and gone away, nothing left to tell them
        if self.resolver.send(response).is_err() {
            log::warn!("Control requester dropped before receiving a response");
        }
    }

    pub fn shutdown(self) {
        let row_count = self.database.person_table.len();

        let response = DatabaseCommandResponse::control_success(&format!(
            "Successfully shutdown database, dropped: {} rows",
            row_count
        ));

        self.send_response(response);
    }
}
