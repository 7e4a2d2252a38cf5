pub mod envelope;
pub mod metric;
pub mod record;
pub mod user;

pub use envelope::*;
pub use metric::*;
pub use record::*;
pub use user::*;
