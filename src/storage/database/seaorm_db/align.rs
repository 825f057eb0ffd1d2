//! Realigning unordered query rows with the ids they were requested for

use crate::utils::error::Result;
use sea_orm::*;
use std::collections::HashMap;

/// One entry per id, `None` where no row was found
pub(super) fn align<T: Clone>(ids: &[i32], found: &HashMap<i32, T>) -> Vec<Option<T>> {
    ids.iter().map(|id| found.get(id).cloned()).collect()
}

/// Group `(owner, item)` pairs by owner, one list per id
///
/// Items keep the order in which the pairs were yielded.
pub(super) fn group<I>(ids: &[i32], pairs: I) -> Vec<Vec<i32>>
where
    I: IntoIterator<Item = (i32, i32)>,
{
    let mut grouped: HashMap<i32, Vec<i32>> = HashMap::new();
    for (owner, item) in pairs {
        grouped.entry(owner).or_default().push(item);
    }
    ids.iter()
        .map(|id| grouped.get(id).cloned().unwrap_or_default())
        .collect()
}

/// Rows of `E` whose `column` is one of `ids`
pub(super) async fn rows_in<E>(
    db: &DatabaseConnection,
    column: E::Column,
    ids: &[i32],
) -> Result<Vec<E::Model>>
where
    E: EntityTrait,
{
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(E::find()
        .filter(column.is_in(ids.iter().copied()))
        .all(db)
        .await?)
}

/// Look up `ids` by primary key, converting each row found
pub(super) async fn find_aligned<E, T, F>(
    db: &DatabaseConnection,
    column: E::Column,
    ids: &[i32],
    convert: F,
) -> Result<Vec<Option<T>>>
where
    E: EntityTrait,
    T: Clone,
    F: Fn(&E::Model) -> (i32, T),
{
    let found: HashMap<i32, T> = rows_in::<E>(db, column, ids)
        .await?
        .iter()
        .map(convert)
        .collect();
    Ok(align(ids, &found))
}
