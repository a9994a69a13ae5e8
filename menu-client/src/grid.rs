//! Weekly grid construction
//!
//! Everything here is a pure function of the fetched entity lists and the
//! displayed week; the grid is rebuilt from scratch on every render.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use shared::models::{Caterer, Dish, Meal, MenuSnapshot, Restriction};

use crate::week::{MenuWeek, day_header};

/// Dishes bucketed by date, then meal id
#[derive(Debug, Clone, Default)]
pub struct DishBuckets {
    cells: BTreeMap<NaiveDate, BTreeMap<i64, Vec<Dish>>>,
    served_meals: HashSet<i64>,
}

impl DishBuckets {
    /// Pre-seed an empty bucket for every `dates` × `meals` pair, then file
    /// each dish under its `served_on` / `meal`.
    ///
    /// A dish on a date outside `dates` opens a bucket for that date and its
    /// own meal. A dish whose meal has no bucket on an existing date is
    /// dropped. Either way its meal counts as served.
    pub fn build(dates: &[NaiveDate], meals: &[Meal], dishes: &[Dish]) -> Self {
        let mut cells: BTreeMap<NaiveDate, BTreeMap<i64, Vec<Dish>>> = BTreeMap::new();
        for date in dates {
            let day = cells.entry(*date).or_default();
            for meal in meals {
                day.entry(meal.id).or_default();
            }
        }

        let mut served_meals = HashSet::new();
        for dish in dishes {
            let day = cells
                .entry(dish.served_on)
                .or_insert_with(|| BTreeMap::from([(dish.meal, Vec::new())]));
            if let Some(bucket) = day.get_mut(&dish.meal) {
                bucket.push(dish.clone());
            }
            served_meals.insert(dish.meal);
        }

        Self {
            cells,
            served_meals,
        }
    }

    /// Dishes of one cell; `None` when no bucket exists
    pub fn cell(&self, date: NaiveDate, meal: i64) -> Option<&[Dish]> {
        self.cells
            .get(&date)
            .and_then(|day| day.get(&meal))
            .map(Vec::as_slice)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.keys().copied()
    }

    /// Whether any fetched dish was served under `meal`
    pub fn has_dishes_for(&self, meal: i64) -> bool {
        self.served_meals.contains(&meal)
    }
}

/// Caterer shown above a cell: the most frequent caterer of its dishes.
///
/// Among caterers sharing the highest count, the one of the last such dish
/// in cell order wins: `[A, B]` gives `B`, `[A, A, B]` gives `A`.
pub fn caterer_mode(dishes: &[Dish]) -> Option<i64> {
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for dish in dishes {
        *counts.entry(dish.caterer).or_default() += 1;
    }
    let max = counts.values().copied().max()?;
    dishes
        .iter()
        .rev()
        .find(|dish| counts.get(&dish.caterer) == Some(&max))
        .map(|dish| dish.caterer)
}

/// `"V, GF"` for a dish tagged Vegetarian and Gluten Free.
///
/// Ids missing from `restrictions` are skipped.
pub fn restriction_initials(dish: &Dish, restrictions: &[Restriction]) -> String {
    dish.restrictions
        .iter()
        .filter_map(|id| restrictions.iter().find(|r| r.id == id))
        .map(Restriction::initials)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `"V is for Vegetarian, GF is for Gluten Free, and VG is for Vegan"`
pub fn legend(restrictions: &[Restriction]) -> String {
    let entries: Vec<String> = restrictions
        .iter()
        .map(|r| format!("{} is for {}", r.initials(), r.title))
        .collect();
    match entries.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{}, and {}", init.join(", "), last),
    }
}

/// Meals ordered by start time; equal start times keep their fetched order
pub fn sort_meals(meals: &[Meal]) -> Vec<&Meal> {
    let mut sorted: Vec<&Meal> = meals.iter().collect();
    sorted.sort_by_key(|meal| meal.starttime);
    sorted
}

/// Header of one weekday column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub header: String,
    pub is_today: bool,
}

/// One dish inside a cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishLine {
    pub id: i64,
    pub title: String,
    pub initials: String,
    pub description: String,
}

/// One day × meal cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Caterer header line (title and website)
    pub caterer: Option<Caterer>,
    pub dishes: Vec<DishLine>,
    /// `"No lunch"` for a cell without dishes
    pub empty_label: Option<String>,
}

/// A meal header plus its five cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealRow {
    pub meal_id: i64,
    pub header: String,
    pub cells: Vec<CellView>,
}

/// Render model of the whole menu page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuGrid {
    pub title: String,
    pub special_title: String,
    pub days: Vec<DayColumn>,
    /// Required meals, always present
    pub rows: Vec<MealRow>,
    /// Optional meals with at least one dish this week
    pub special_rows: Vec<MealRow>,
    pub legend: String,
}

impl MenuGrid {
    pub fn build(week: &MenuWeek, snapshot: &MenuSnapshot) -> Self {
        let dates = week.days();
        let buckets = DishBuckets::build(&dates, &snapshot.meals, &snapshot.dishes);

        let days = dates
            .iter()
            .map(|&date| DayColumn {
                date,
                header: day_header(date),
                is_today: week.is_today(date),
            })
            .collect();

        let mut rows = Vec::new();
        let mut special_rows = Vec::new();
        for meal in sort_meals(&snapshot.meals) {
            if !meal.required && !buckets.has_dishes_for(meal.id) {
                continue;
            }
            let row = MealRow {
                meal_id: meal.id,
                header: meal.header(),
                cells: dates
                    .iter()
                    .map(|&date| build_cell(week, &buckets, meal, date, snapshot))
                    .collect(),
            };
            if meal.required {
                rows.push(row);
            } else {
                special_rows.push(row);
            }
        }

        Self {
            title: week.title(),
            special_title: week.special_title(),
            days,
            rows,
            special_rows,
            legend: legend(&snapshot.restrictions),
        }
    }

    /// The special menu block is only shown when it has rows
    pub fn has_special_menu(&self) -> bool {
        !self.special_rows.is_empty()
    }
}

fn build_cell(
    week: &MenuWeek,
    buckets: &DishBuckets,
    meal: &Meal,
    date: NaiveDate,
    snapshot: &MenuSnapshot,
) -> CellView {
    let dishes = buckets.cell(date, meal.id).unwrap_or_default();
    let is_today = week.is_today(date);

    if dishes.is_empty() {
        return CellView {
            date,
            is_today,
            caterer: None,
            dishes: Vec::new(),
            empty_label: Some(meal.empty_label()),
        };
    }

    let caterer = caterer_mode(dishes)
        .and_then(|id| snapshot.caterers.iter().find(|c| c.id == id))
        .cloned();

    CellView {
        date,
        is_today,
        caterer,
        dishes: dishes
            .iter()
            .map(|dish| DishLine {
                id: dish.id,
                title: dish.title.clone(),
                initials: restriction_initials(dish, &snapshot.restrictions),
                description: dish.description.clone(),
            })
            .collect(),
        empty_label: None,
    }
}
