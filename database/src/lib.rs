pub mod consts {
    pub mod consts;
}

pub mod model {
    pub mod person;
    pub mod statement;
}

pub mod database {
    pub mod commands;
    pub mod control;
    pub mod database;
    pub mod options;
    pub mod request_manager;

    pub mod table {
        pub mod table;
    }
}
