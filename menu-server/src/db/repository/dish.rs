//! Dish Repository
//!
//! Every multi-statement write runs in one transaction; dropping the
//! transaction on an early `?` rolls it back.

use super::{RepoError, RepoResult, json_ids};
use chrono::NaiveDate;
use shared::models::{Dish, RestrictionIds};
use sqlx::{SqlitePool, Sqlite, Transaction};

/// A dish write that already passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishWrite {
    pub title: String,
    pub description: String,
    pub served_on: NaiveDate,
    pub meal: i64,
    pub caterer: i64,
    pub restrictions: RestrictionIds,
}

/// Row shape with restriction ids still in `group_concat` form
#[derive(Debug, sqlx::FromRow)]
struct DishRow {
    id: i64,
    title: String,
    description: String,
    served_on: NaiveDate,
    meal: i64,
    caterer: i64,
    restrictions: Option<String>,
}

impl TryFrom<DishRow> for Dish {
    type Error = RepoError;

    fn try_from(row: DishRow) -> Result<Self, Self::Error> {
        let restrictions = match row.restrictions.as_deref() {
            Some(csv) => RestrictionIds::parse_csv(csv)
                .map_err(|e| RepoError::Database(format!("dish {}: {e}", row.id)))?,
            None => RestrictionIds::default(),
        };
        Ok(Dish {
            id: row.id,
            title: row.title,
            description: row.description,
            served_on: row.served_on,
            meal: row.meal,
            caterer: row.caterer,
            restrictions,
        })
    }
}

const SELECT_DISH: &str = "SELECT d.id, d.title, d.description, d.served_on, d.meal, d.caterer, \
     (SELECT group_concat(r.restriction_id) FROM dish_to_restriction r WHERE r.dish_id = d.id) AS restrictions \
     FROM dish d";

fn into_dishes(rows: Vec<DishRow>) -> RepoResult<Vec<Dish>> {
    rows.into_iter().map(Dish::try_from).collect()
}

/// One page of dishes, newest `served_on` first, then by meal descending.
/// Equal keys fall back to id descending so pages never overlap.
pub async fn find_page(pool: &SqlitePool, offset: i64, limit: i64) -> RepoResult<Vec<Dish>> {
    let rows = sqlx::query_as::<_, DishRow>(&format!(
        "{SELECT_DISH} ORDER BY d.served_on DESC, d.meal DESC, d.id DESC LIMIT ? OFFSET ?"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;
    into_dishes(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Dish>> {
    let row = sqlx::query_as::<_, DishRow>(&format!("{SELECT_DISH} WHERE d.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    row.map(Dish::try_from).transpose()
}

/// Dishes served within `[from, to]`, in calendar order
pub async fn find_in_range(
    pool: &SqlitePool,
    from: NaiveDate,
    to: NaiveDate,
) -> RepoResult<Vec<Dish>> {
    let rows = sqlx::query_as::<_, DishRow>(&format!(
        "{SELECT_DISH} WHERE d.served_on BETWEEN ? AND ? ORDER BY d.served_on, d.meal, d.id"
    ))
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;
    into_dishes(rows)
}

/// Insert a dish with its restrictions; returns the new id
pub async fn create(pool: &SqlitePool, data: &DishWrite) -> RepoResult<i64> {
    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO dish (title, description, served_on, meal, caterer) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.served_on)
    .bind(data.meal)
    .bind(data.caterer)
    .fetch_one(&mut *tx)
    .await?;

    insert_restrictions(&mut tx, id, &data.restrictions).await?;

    tx.commit().await?;
    Ok(id)
}

/// Overwrite a dish and replace its restriction set wholesale
pub async fn update(pool: &SqlitePool, id: i64, data: &DishWrite) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let rows = sqlx::query(
        "UPDATE dish SET title = ?1, description = ?2, served_on = ?3, meal = ?4, caterer = ?5 WHERE id = ?6",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.served_on)
    .bind(data.meal)
    .bind(data.caterer)
    .bind(id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Dish {id} not found")));
    }

    sqlx::query("DELETE FROM dish_to_restriction WHERE dish_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    insert_restrictions(&mut tx, id, &data.restrictions).await?;

    tx.commit().await?;
    Ok(())
}

/// Delete one dish and its join rows. Returns whether the dish existed.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM dish_to_restriction WHERE dish_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM dish WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete every listed dish and its join rows. Returns the number of dishes removed.
pub async fn delete_many(pool: &SqlitePool, ids: &[i64]) -> RepoResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }
    let ids_json = json_ids(ids)?;
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM dish_to_restriction WHERE dish_id IN (SELECT value FROM json_each(?))")
        .bind(&ids_json)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM dish WHERE id IN (SELECT value FROM json_each(?))")
        .bind(&ids_json)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(rows.rows_affected())
}

async fn insert_restrictions(
    tx: &mut Transaction<'_, Sqlite>,
    dish_id: i64,
    restrictions: &RestrictionIds,
) -> RepoResult<()> {
    if restrictions.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT OR IGNORE INTO dish_to_restriction (dish_id, restriction_id) SELECT ?, value FROM json_each(?)",
    )
    .bind(dish_id)
    .bind(json_ids(restrictions.as_slice())?)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
