//! `PostgreSQL` holiday repository over the `calendars` table.

use super::schema::calendars;
use crate::calendar::{
    domain::{Holiday, HolidayPeriod},
    ports::{HolidayRepository, HolidayRepositoryError, HolidayRepositoryResult},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by the calendar adapter.
pub type CalendarPgPool = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = calendars)]
#[diesel(check_for_backend(diesel::pg::Pg))]
struct HolidayRow {
    date: NaiveDate,
    holiday_name: Option<String>,
    description: Option<String>,
}

impl From<HolidayRow> for Holiday {
    fn from(row: HolidayRow) -> Self {
        Self {
            date: row.date,
            name: row.holiday_name.unwrap_or_default(),
            description: row.description,
        }
    }
}

/// `PostgreSQL`-backed holiday repository.
#[derive(Debug, Clone)]
pub struct PostgresHolidayRepository {
    pool: CalendarPgPool,
}

impl PostgresHolidayRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: CalendarPgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HolidayRepository for PostgresHolidayRepository {
    async fn holidays_in(&self, period: HolidayPeriod) -> HolidayRepositoryResult<Vec<Holiday>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(HolidayRepositoryError::persistence)?;
            let mut query = calendars::table
                .filter(calendars::year.eq(period.year_number()))
                .filter(calendars::is_holiday.eq(true))
                .into_boxed();
            if let Some(month) = period.month_number() {
                let month_value = i32::try_from(month).unwrap_or(i32::MAX);
                query = query.filter(calendars::month.eq(month_value));
            }
            let rows = query
                .order(calendars::date.asc())
                .select(HolidayRow::as_select())
                .load::<HolidayRow>(&mut connection)
                .map_err(HolidayRepositoryError::persistence)?;
            Ok(rows.into_iter().map(Holiday::from).collect())
        })
        .await
        .map_err(HolidayRepositoryError::persistence)?
    }
}
