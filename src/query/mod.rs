pub mod datasource;
mod fakes;
pub mod types;

pub use datasource::*;
pub use fakes::*;
pub use types::*;
