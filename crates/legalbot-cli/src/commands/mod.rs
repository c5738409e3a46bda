//! Command implementations.

pub mod ask;
pub mod domains;
pub mod profile;

pub use self::ask::execute_ask;
pub use self::domains::execute_domains;
pub use self::profile::execute_profile;
