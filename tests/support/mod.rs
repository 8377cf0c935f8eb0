pub mod castlist_env;
pub mod stub_server;
