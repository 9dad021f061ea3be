pub mod export;
mod item;
mod summary;
pub mod views;

pub use export::{
    write_priority_csv, write_priority_csv_to_path, write_priority_json, PriorityExportError,
};
pub use item::{end_of_local_day, generate_priority_item, local_date, PriorityItem, ScoredOrder};
pub use summary::{
    calculate_aggregate_stats, generate_priority_items, generate_priority_list, generate_summary,
};
pub use views::{AggregateStats, PriorityList, PrioritySummary};
