pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        session_ttl_seconds: u64,
        users_file: Option<String>,
        cookie_secure: bool,
    },
}
