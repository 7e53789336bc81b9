pub mod curator;
pub mod rag;
pub mod roles;
pub mod search_tests;

pub use crate::domain::model::{CheckOutcome, CommandOutput, SearchCase};
pub use crate::domain::ports::{ConfigProvider, InvenioCli, Storage};
pub use crate::utils::error::Result;
