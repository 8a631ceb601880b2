pub mod batch;
pub mod convert;
pub mod dispatch;
pub mod generate;
pub mod schema;
pub mod shared;
pub mod text;
