//! Moderation core: the components that turn admin input into log records
//! and store deliveries into views.
//!
//! - [`selector`]: Action Selector, holds the chosen action and its policy
//! - [`executor`]: Action Executor, validates a submission and builds records
//! - [`feed`]: Log Feed Projector, ordered bounded window over the log
//! - [`stats`]: Stats Projector, dashboard counters and their seed
//! - [`session`]: Session Manager, identity, profile and login state
//!
//! None of these touch the store directly. They return records to append or
//! [`SessionEffect`]s to perform, and the app layer turns those into worker
//! messages.

pub mod executor;
pub mod feed;
pub mod selector;
pub mod session;
pub mod stats;

pub use executor::{execute, failure_record, summarize, Execution};
pub use feed::{LogFeedProjector, DEFAULT_FEED_LIMIT};
pub use selector::ActionSelector;
pub use session::{SessionEffect, SessionPhase, SessionState, ANON_AUTHOR, ANON_IDENTITY};
pub use stats::StatsProjector;
