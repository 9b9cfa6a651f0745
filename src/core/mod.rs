pub mod activity;
pub mod etl;
pub mod pipeline;
pub mod verify;

pub use crate::domain::model::{Account, InputRow, TransformResult};
pub use crate::domain::ports::{Activity, ActivityLookup, ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
