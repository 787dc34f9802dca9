pub mod batch;
pub mod response;
pub mod single;
pub mod staged;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{Approach, BatchSummary, Document, Stage};
pub use crate::domain::ports::{Analyzer, ChatClient, ConfigProvider, Storage};
pub use crate::utils::error::Result;
