// Descriptive analytics over the ingested season data: score tables,
// standings simulations, all-time records, head-to-head summaries,
// transactions, and the draft board.

pub mod draft;
pub mod head_to_head;
pub mod records;
pub mod scores;
pub mod standings;
pub mod transactions;
