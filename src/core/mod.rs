pub mod etl;
pub mod extract;
pub mod pipeline;
pub mod transform;

pub use crate::domain::model::{CountryGdpRecord, QueryResult, RawGdpRecord, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RecordTable, Storage};
pub use crate::utils::error::Result;
