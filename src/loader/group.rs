//! Regrouping of datasets by sample type.
//!
//! Datasets of the same type must be processed consecutively so that their
//! output ends up in one contiguous output unit, however they were
//! interleaved in the source document.

use crate::dataset::InputData;
use crate::diagnostics::Diagnostics;
use crate::error::ConfigError;

/// Reorder the collection with a stable sort keyed on `data_type`. Records
/// sharing a type keep their document order. A warning names every record
/// that moved, with 1-based old and new positions. The rebuilt collection
/// must come out the same size it went in; a mismatch signals an
/// implementation bug and stops the job.
pub fn regroup_by_type(
    datasets: Vec<InputData>,
    diagnostics: &mut Diagnostics,
) -> Result<Vec<InputData>, ConfigError> {
    let before = datasets.len();

    let mut order: Vec<(String, usize)> = datasets
        .iter()
        .enumerate()
        .map(|(index, data)| (data.data_type.clone(), index))
        .collect();
    // sort_by is stable, so equal types keep their original relative order.
    order.sort_by(|a, b| a.0.cmp(&b.0));

    // Move records out of the owned vector instead of cloning them; an
    // already-taken slot leaves the rebuilt vector short, which the size
    // check below turns into a fatal error.
    let mut slots: Vec<Option<InputData>> = datasets.into_iter().map(Some).collect();

    let mut regrouped = Vec::with_capacity(before);
    for (position, (data_type, original)) in order.iter().enumerate() {
        if *original != position {
            diagnostics.warning(format!(
                "input data of type \"{}\" was given as input number {} \
                 but will be repositioned and instead processed as number {}",
                data_type,
                original + 1,
                position + 1
            ));
        }
        if let Some(data) = slots[*original].take() {
            regrouped.push(data);
        }
    }

    if regrouped.len() != before {
        return Err(ConfigError::GroupingInconsistency {
            before,
            after: regrouped.len(),
        });
    }

    Ok(regrouped)
}
