pub mod snapshot;
pub mod styled;

pub use snapshot::SnapshotTable;
pub use styled::{StyledColumn, StyledTable};
