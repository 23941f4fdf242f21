//! Schedule evaluation and search.
//!
//! A schedule is the order in which yield-bearing valves are visited and
//! opened, starting from a fixed valve under a fixed time budget. The
//! exhaustive permutation search is the reference strategy; the subset DP
//! produces the same total yield without enumerating every order.

mod evaluator;
mod permutations;
mod progress;
mod search;
mod subset;

pub use evaluator::{ScheduleEvaluator, Segment};
pub use permutations::{permutation_count, Permutations};
pub use progress::{ProgressTicker, SearchProgress};
pub use search::{find_best_schedule, ScheduleSearch, SearchError, SearchOutcome, Strategy};
pub use subset::{SubsetSolver, MAX_SUBSET_CANDIDATES};
