mod deploy;
mod init;
mod print;
mod status;
mod verify;

pub use deploy::execute_deploy;
pub use init::execute_init;
pub use print::{execute_print_config, execute_print_ledger};
pub use status::execute_status;
pub use verify::execute_verify;
