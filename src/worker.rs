use std::time::Instant;
use chrono::{Local, NaiveDate, Utc};
use log::{error, info, warn};
use crate::config::Config;
use crate::coords::Coordinates;
use crate::dueness::{self, Dueness, SkipReason};
use crate::errors::IngestError;
use crate::manager_catalog::Catalog;
use crate::manager_influx::Influx;
use crate::manager_openmeteo::OpenMeteo;
use crate::mapper::{self, TimestampMode};
use crate::models::city::City;
use crate::sources::Source;

/// Runs one full ingestion sweep: resolve missing UTC offsets, load the
/// catalog, and for every due city drive each enabled source through
/// fetch -> map -> write -> watermark. A failure inside one source's
/// pipeline is logged and never aborts the rest of the sweep; only a
/// catalog connect/load failure is fatal.
///
/// # Arguments
///
/// * 'config' - the full configuration
pub fn run(config: &Config) -> Result<(), IngestError> {
    let started = Instant::now();

    let meteo = OpenMeteo::new();
    let influx = Influx::new(&config.influx);
    let mut catalog = Catalog::connect(&config.catalog)?;

    backfill_utc_offsets(&mut catalog, &meteo);

    let cities = catalog.load_cities()?;
    info!("Catalog loaded with {} cities", cities.len());

    let now_utc = Utc::now();
    let today = Local::now().date_naive();
    let mode = if config.ingest.use_host_offset {
        TimestampMode::HostLocal
    } else {
        TimestampMode::Utc
    };

    for city in &cities {
        if let Dueness::Skip(reason) = dueness::evaluate(now_utc, city) {
            info!("Data collection skipped for {} as {}", city.name, reason);
            continue;
        }

        let coordinates = match Coordinates::normalized(city.lat, city.lon) {
            Ok(c) => c,
            Err(e) => {
                error!("Skipping {} with unusable catalog coordinates: {}", city.name, e);
                continue;
            }
        };

        for source in city.enabled_sources() {
            if !dueness::horizon_reached(today, city.horizon, city.last_hit) {
                info!(
                    "{} data collection skipped for {} as {}",
                    source, city.name, SkipReason::HorizonNotReached
                );
                continue;
            }

            match ingest_source(&meteo, &influx, &mut catalog, city, source, &coordinates, today, mode) {
                Ok(()) => {
                    info!("{} data for {} with {},{} stored", source, city.name, city.lat, city.lon);
                }
                Err(e) => {
                    error!("Error fetching {} data for {}: {}", source, city.name, e);
                }
            }
        }
    }

    info!("Elapsed time: {:.3} seconds", started.elapsed().as_secs_f64());

    Ok(())
}

/// Drives the full pipeline for one (city, source) pair. The watermark is
/// only advanced once the write has succeeded; a failed watermark update is
/// logged but does not fail the pair, the next sweep simply re-fetches.
///
/// # Arguments
///
/// * 'meteo' - forecast fetcher
/// * 'influx' - time-series writer
/// * 'catalog' - catalog handle for the watermark update
/// * 'city' - the catalog row being processed
/// * 'source' - the forecast kind to ingest
/// * 'coordinates' - the city's normalized coordinate tag
/// * 'today' - the watermark date to set
/// * 'mode' - timestamp conversion mode
fn ingest_source(
    meteo: &OpenMeteo,
    influx: &Influx,
    catalog: &mut Catalog,
    city: &City,
    source: Source,
    coordinates: &Coordinates,
    today: NaiveDate,
    mode: TimestampMode,
) -> Result<(), IngestError> {
    let payload = meteo.fetch(source, city.lat, city.lon, city.horizon)?;
    let points = mapper::map_points(&payload, source, coordinates, mode)?;

    influx.write_points(&points)?;

    if let Err(e) = catalog.update_last_hit(city.city_id, today) {
        warn!("Watermark update failed for {}: {}", city.name, e);
    }

    Ok(())
}

/// Resolves and stores the UTC offset for every catalog row that has none.
/// Failures are logged and skipped, the affected rows just keep failing the
/// local-hour gate until a later sweep resolves them.
///
/// # Arguments
///
/// * 'catalog' - catalog handle
/// * 'meteo' - forecast fetcher used for the offset probe
fn backfill_utc_offsets(catalog: &mut Catalog, meteo: &OpenMeteo) {
    let rows = match catalog.cities_missing_tz() {
        Ok(rows) => rows,
        Err(e) => {
            warn!("Could not scan catalog for missing UTC offsets: {}", e);
            return;
        }
    };

    for city in rows {
        match meteo.fetch_utc_offset(city.lat, city.lon) {
            Ok(offset) => match catalog.update_tz(city.city_id, offset) {
                Ok(()) => info!("Timezone for city id {} added", city.city_id),
                Err(e) => warn!("Could not store UTC offset for {}: {}", city.name, e),
            },
            Err(e) => warn!("Could not resolve UTC offset for {}: {}", city.name, e),
        }
    }
}
