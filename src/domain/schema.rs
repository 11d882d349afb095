// ============================================================
// Layer 3 — Schema Configuration
// ============================================================
// Names the label column and the columns removed before
// training. These used to be hard-coded literals scattered
// through the pipeline; making them an explicit struct keeps
// the dataset coupling in one visible place.
//
// The default drop list removes columns that either leak the
// label (a session's basket and revenue trivially reveal
// whether an order happened) or carry no predictive signal.
//
// Reference: Rust Book §5 (Structs)

use serde::{Deserialize, Serialize};

/// Which column is the binary label and which columns are
/// removed from the dataset before any split or training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// The binary label column (0 = no purchase, 1 = purchase)
    pub label_column: String,

    /// Columns dropped up front — label-leaking or irrelevant
    pub drop_columns: Vec<String>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            label_column: "order".to_string(),
            drop_columns: vec![
                "count".to_string(),
                "click".to_string(),
                "basket".to_string(),
                "revenue".to_string(),
            ],
        }
    }
}
