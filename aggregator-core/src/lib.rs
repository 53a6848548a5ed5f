pub mod error;
pub mod fetch;
pub mod ident;
pub mod merge;
pub mod models;
pub mod parser;
pub mod poller;
pub mod registry;
pub mod validate;

pub use error::PollError;
pub use fetch::{ProxyFetcher, DEFAULT_PROXY};
pub use ident::{Id, IdGen};
pub use merge::{merge, MergeOutcome};
pub use models::{Entry, Feed, Snapshot};
pub use parser::{parse_feed, ParsedEntry, ParsedFeed};
pub use poller::{Event, PollConfig, Poller};
pub use registry::Registry;
pub use validate::{validate_candidate, ValidationError};
