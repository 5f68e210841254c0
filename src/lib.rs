mod ident;

pub mod allocator;
pub mod driver;
pub mod exclusivity;
pub mod graph;
pub mod instance;
pub mod report;
pub mod search;
pub mod units;

pub use allocator::{allocate, Allocator};
pub use driver::{run, Config, Format};
pub use ident::{DemandId, EdgeId, NodeId};
pub use instance::{Demand, Instance, Link};
pub use report::{BatchReport, Hop, InstanceReport, Outcome};
