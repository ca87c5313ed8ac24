pub mod error;
pub mod filter;
pub mod storage;
pub mod types;

pub use error::PoolError;
pub use filter::{final_weeks, out_of_game, status_changes, StatusChange};
pub use storage::{get_pool_path, load_pool_state, read_fact_file, save_pool_state};
pub use types::{BonusQuestion, PoolState, Team, WeekRecord, WeekStatus, POOL_STATE_VERSION};
