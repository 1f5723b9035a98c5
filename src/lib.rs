pub mod books {
    pub mod domain;
    pub mod dto;
    pub(crate) mod factory;
    pub(crate) mod repository;
    pub mod validator;
}

pub mod catalog {
    pub(crate) mod command {
        pub mod add_book_cmd;
        pub mod get_book_cmd;
        pub mod list_books_cmd;
        pub mod remove_book_cmd;
        pub mod update_book_cmd;
    }
    pub mod controller;
    pub(crate) mod domain;
    pub(crate) mod factory;
    pub mod openapi;
}

pub mod core {
    pub mod auth;
    pub mod command;
    pub mod controller;
    pub mod domain;
    pub mod library;
    pub mod repository;
}

pub mod utils {
    pub mod date;
    pub mod logs;
    pub mod sqlite;
}
