mod supervisor;

pub use supervisor::{supervise, wait_for_signal};
