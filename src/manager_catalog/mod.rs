pub mod errors;
pub mod schema;

use chrono::NaiveDate;
use diesel::prelude::*;
use crate::config::CatalogParameters;
use crate::coords;
use crate::manager_catalog::errors::CatalogError;
use crate::manager_catalog::schema::cities;
use crate::models::city::City;

/// Struct for reading and updating the relational catalog of monitored
/// cities. Holds one connection for the duration of a sweep.
pub struct Catalog {
    conn: MysqlConnection,
}

impl Catalog {
    /// Connects to the catalog database
    ///
    /// # Arguments
    ///
    /// * 'params' - host, credentials and database name from the configuration
    pub fn connect(params: &CatalogParameters) -> Result<Catalog, CatalogError> {
        let url = format!(
            "mysql://{}:{}@{}:{}/{}",
            params.user, params.password, params.host, params.port, params.database
        );

        let conn = MysqlConnection::establish(&url)?;

        Ok(Self { conn })
    }

    /// Loads every catalog row, in stable id order
    pub fn load_cities(&mut self) -> Result<Vec<City>, CatalogError> {
        let rows = cities::table
            .order(cities::city_id.asc())
            .select(City::as_select())
            .load(&mut self.conn)?;

        Ok(rows)
    }

    /// Advances a city's watermark after a successful write
    ///
    /// # Arguments
    ///
    /// * 'city_id' - the row to update
    /// * 'date' - the new watermark date
    pub fn update_last_hit(&mut self, city_id: i32, date: NaiveDate) -> Result<(), CatalogError> {
        diesel::update(cities::table.find(city_id))
            .set(cities::last_hit.eq(date))
            .execute(&mut self.conn)?;

        Ok(())
    }

    /// Loads the rows that still have no stored UTC offset
    pub fn cities_missing_tz(&mut self) -> Result<Vec<City>, CatalogError> {
        let rows = cities::table
            .filter(cities::tz.is_null())
            .select(City::as_select())
            .load(&mut self.conn)?;

        Ok(rows)
    }

    /// Stores a resolved UTC offset for a city
    ///
    /// # Arguments
    ///
    /// * 'city_id' - the row to update
    /// * 'offset_seconds' - UTC offset in seconds
    pub fn update_tz(&mut self, city_id: i32, offset_seconds: i32) -> Result<(), CatalogError> {
        diesel::update(cities::table.find(city_id))
            .set(cities::tz.eq(offset_seconds))
            .execute(&mut self.conn)?;

        Ok(())
    }

    /// Returns true if a row already sits within the duplicate tolerance of
    /// the given pair. Catalog management calls this before an insert.
    ///
    /// # Arguments
    ///
    /// * 'lat' - candidate latitude
    /// * 'lon' - candidate longitude
    pub fn coord_exists(&mut self, lat: f64, lon: f64) -> Result<bool, CatalogError> {
        let pairs: Vec<(f64, f64)> = cities::table
            .select((cities::lat, cities::lon))
            .load(&mut self.conn)?;

        Ok(pairs
            .into_iter()
            .any(|(row_lat, row_lon)| coords::is_same_place(row_lat, row_lon, lat, lon)))
    }
}
