//! Read and write accessors. Callers hand in the process-wide store; the
//! accessors never look at which implementation it is.

use std::collections::HashMap;

use hamsafar_shared::AppResult;

use crate::store::StoreResult;

pub mod read;
pub mod write;

/// Converts a store failure into an [`AppError`](hamsafar_shared::AppError), logging it on the way out.
fn logged<T>(result: StoreResult<T>, what: &str) -> AppResult<T> {
    result.map_err(|e| {
        tracing::error!(error = %e, "error {what}");
        e.into()
    })
}

/// Groups child rows under their parent id, keeping the store's row order.
fn group_children<T>(
    children: Vec<T>,
    split: impl Fn(T) -> (String, String),
) -> HashMap<String, Vec<String>> {
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    for child in children {
        let (parent_id, value) = split(child);
        grouped.entry(parent_id).or_default().push(value);
    }
    grouped
}

