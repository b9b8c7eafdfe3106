//! Command implementations.

pub mod batch;
pub mod fetch;
pub mod manual;
pub mod resolve;

pub use self::batch::execute_batch;
pub use self::fetch::execute_fetch;
pub use self::manual::execute_manual;
pub use self::resolve::execute_resolve;
