//! Menu Repository
//!
//! Read side for the weekly menu page: lookup tables plus the dishes of
//! a date range.

use super::{RepoResult, dish};
use chrono::NaiveDate;
use shared::models::{Caterer, Meal, MenuSnapshot, Restriction};
use sqlx::SqlitePool;

pub async fn find_meals(pool: &SqlitePool) -> RepoResult<Vec<Meal>> {
    let rows = sqlx::query_as::<_, Meal>(
        "SELECT id, title, starttime, endtime, required FROM meal ORDER BY starttime, id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_caterers(pool: &SqlitePool) -> RepoResult<Vec<Caterer>> {
    let rows = sqlx::query_as::<_, Caterer>(
        "SELECT id, title, website FROM caterer ORDER BY title COLLATE NOCASE, id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn find_restrictions(pool: &SqlitePool) -> RepoResult<Vec<Restriction>> {
    let rows = sqlx::query_as::<_, Restriction>(
        "SELECT id, title FROM restriction ORDER BY title COLLATE NOCASE, id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Everything the menu page renders for `[from, to]`.
///
/// `dishes` stays empty unless `with_dishes` is set.
pub async fn snapshot(
    pool: &SqlitePool,
    from: NaiveDate,
    to: NaiveDate,
    with_dishes: bool,
) -> RepoResult<MenuSnapshot> {
    let dishes = if with_dishes {
        dish::find_in_range(pool, from, to).await?
    } else {
        Vec::new()
    };

    Ok(MenuSnapshot {
        meals: find_meals(pool).await?,
        dishes,
        caterers: find_caterers(pool).await?,
        restrictions: find_restrictions(pool).await?,
    })
}
