use std::fmt;
use std::fmt::Formatter;

/// The six forecast kinds the collector knows about. A closed set, each one
/// pinned to an Open-Meteo endpoint, a response block, a requested variable
/// list, a stored-field map and a skip-offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Daily,
    Hourly,
    Icon,
    Icon15,
    Gfs,
    MeteoFrance,
}

pub const ALL_SOURCES: [Source; 6] = [
    Source::Daily,
    Source::Hourly,
    Source::Icon,
    Source::Icon15,
    Source::Gfs,
    Source::MeteoFrance,
];

/// Fixed configuration for one forecast kind.
///
/// 'variables' is what the request asks for, 'fields' maps a response series
/// to the field name it is stored under. The two differ on purpose for some
/// kinds, see the per-kind notes. 'skip_offset' is the number of leading
/// array entries to drop because they cover a period a previous cycle
/// already stored (1 day, 24 hours or 96 quarter-hours).
pub struct SourceSpec {
    pub measurement: &'static str,
    pub endpoint: &'static str,
    pub block_key: &'static str,
    pub variables: &'static [&'static str],
    pub fields: &'static [(&'static str, &'static str)],
    pub skip_offset: usize,
}

// The "temparature" spelling is what the collector has always written;
// dashboards select these field names as-is.
const DAILY: SourceSpec = SourceSpec {
    measurement: "daily_forecast",
    endpoint: "v1/forecast",
    block_key: "daily",
    variables: &[
        "temperature_2m_max",
        "temperature_2m_min",
        "windspeed_10m_max",
        "winddirection_10m_dominant",
        "shortwave_radiation_sum",
    ],
    fields: &[
        ("temperature_2m_min", "temparature_min_C"),
        ("temperature_2m_max", "temparature_max_C"),
        ("shortwave_radiation_sum", "shortwave_radiation_sum"),
        ("windspeed_10m_max", "wind_speed"),
        ("winddirection_10m_dominant", "wind_direction"),
    ],
    skip_offset: 1,
};

// windgusts_10m is requested but has never been stored for this kind.
const HOURLY: SourceSpec = SourceSpec {
    measurement: "hourly_forecast",
    endpoint: "v1/forecast",
    block_key: "hourly",
    variables: &[
        "temperature_2m",
        "relativehumidity_2m",
        "windspeed_10m",
        "windspeed_80m",
        "windspeed_120m",
        "windspeed_180m",
        "winddirection_10m",
        "winddirection_80m",
        "winddirection_120m",
        "winddirection_180m",
        "windgusts_10m",
        "temperature_80m",
        "temperature_120m",
        "temperature_180m",
        "shortwave_radiation",
        "direct_radiation",
        "diffuse_radiation",
    ],
    fields: &[
        ("temperature_2m", "temperature"),
        ("relativehumidity_2m", "humidity"),
        ("windspeed_10m", "windspeed_10m"),
        ("windspeed_80m", "windspeed_80m"),
        ("windspeed_120m", "windspeed_120m"),
        ("windspeed_180m", "windspeed_180m"),
        ("winddirection_10m", "winddirection_10m"),
        ("winddirection_80m", "winddirection_80m"),
        ("winddirection_120m", "winddirection_120m"),
        ("winddirection_180m", "winddirection_180m"),
        ("temperature_80m", "temperature_80m"),
        ("temperature_120m", "temperature_120m"),
        ("temperature_180m", "temperature_180m"),
        ("shortwave_radiation", "shortwave_radiation"),
        ("direct_radiation", "direct_radiation"),
        ("diffuse_radiation", "diffuse_radiation"),
    ],
    skip_offset: 24,
};

const ICON: SourceSpec = SourceSpec {
    measurement: "icon_forecast",
    endpoint: "v1/dwd-icon",
    block_key: "hourly",
    variables: &[
        "temperature_2m",
        "relativehumidity_2m",
        "windspeed_10m",
        "windspeed_80m",
        "windspeed_120m",
        "windspeed_180m",
        "winddirection_10m",
        "winddirection_80m",
        "winddirection_120m",
        "winddirection_180m",
        "windgusts_10m",
        "temperature_80m",
        "temperature_120m",
        "temperature_180m",
        "shortwave_radiation",
        "direct_radiation",
        "diffuse_radiation",
        "direct_normal_irradiance",
        "terrestrial_radiation",
    ],
    fields: &[
        ("temperature_2m", "temperature"),
        ("relativehumidity_2m", "humidity"),
        ("windspeed_10m", "windspeed_10m"),
        ("windspeed_80m", "windspeed_80m"),
        ("windspeed_120m", "windspeed_120m"),
        ("windspeed_180m", "windspeed_180m"),
        ("winddirection_10m", "winddirection_10m"),
        ("winddirection_80m", "winddirection_80m"),
        ("winddirection_120m", "winddirection_120m"),
        ("winddirection_180m", "winddirection_180m"),
        ("windgusts_10m", "windgusts_10m"),
        ("temperature_80m", "temperature_80m"),
        ("temperature_120m", "temperature_120m"),
        ("temperature_180m", "temperature_180m"),
        ("shortwave_radiation", "shortwave_radiation"),
        ("direct_radiation", "direct_radiation"),
        ("diffuse_radiation", "diffuse_radiation"),
        ("direct_normal_irradiance", "direct_normal_irradiance"),
        ("terrestrial_radiation", "terrestrial_radiation"),
    ],
    skip_offset: 24,
};

const ICON_15: SourceSpec = SourceSpec {
    measurement: "icon_15_forecast",
    endpoint: "v1/dwd-icon",
    block_key: "minutely_15",
    variables: &[
        "shortwave_radiation",
        "direct_radiation",
        "diffuse_radiation",
        "direct_normal_irradiance",
        "terrestrial_radiation",
    ],
    fields: &[
        ("shortwave_radiation", "shortwave_radiation"),
        ("direct_radiation", "direct_radiation"),
        ("diffuse_radiation", "diffuse_radiation"),
        ("direct_normal_irradiance", "direct_normal_irradiance"),
        ("terrestrial_radiation", "terrestrial_radiation"),
    ],
    skip_offset: 96,
};

// Gusts land in the winddirection_80m field and replace the real direction
// value; the dashboard reads them from there.
const GFS: SourceSpec = SourceSpec {
    measurement: "gfs_forecast",
    endpoint: "v1/gfs",
    block_key: "hourly",
    variables: &[
        "temperature_2m",
        "relativehumidity_2m",
        "windspeed_10m",
        "windspeed_80m",
        "winddirection_10m",
        "winddirection_80m",
        "windgusts_10m",
        "shortwave_radiation",
        "direct_radiation",
        "diffuse_radiation",
        "direct_normal_irradiance",
        "terrestrial_radiation",
    ],
    fields: &[
        ("temperature_2m", "temperature"),
        ("relativehumidity_2m", "humidity"),
        ("windspeed_10m", "windspeed_10m"),
        ("windspeed_80m", "windspeed_80m"),
        ("winddirection_10m", "winddirection_10m"),
        ("winddirection_80m", "winddirection_80m"),
        ("windgusts_10m", "winddirection_80m"),
        ("shortwave_radiation", "shortwave_radiation"),
        ("direct_radiation", "direct_radiation"),
        ("diffuse_radiation", "diffuse_radiation"),
        ("direct_normal_irradiance", "direct_normal_irradiance"),
        ("terrestrial_radiation", "terrestrial_radiation"),
    ],
    skip_offset: 24,
};

// Same gust placement as GFS.
const METEOFRANCE: SourceSpec = SourceSpec {
    measurement: "meteofrance_forecast",
    endpoint: "v1/meteofrance",
    block_key: "hourly",
    variables: &[
        "temperature_2m",
        "relativehumidity_2m",
        "windspeed_10m",
        "winddirection_10m",
        "windgusts_10m",
        "shortwave_radiation",
        "direct_radiation",
        "diffuse_radiation",
        "direct_normal_irradiance",
        "terrestrial_radiation",
    ],
    fields: &[
        ("temperature_2m", "temperature"),
        ("relativehumidity_2m", "humidity"),
        ("windspeed_10m", "windspeed_10m"),
        ("winddirection_10m", "winddirection_10m"),
        ("windgusts_10m", "winddirection_80m"),
        ("shortwave_radiation", "shortwave_radiation"),
        ("direct_radiation", "direct_radiation"),
        ("diffuse_radiation", "diffuse_radiation"),
        ("direct_normal_irradiance", "direct_normal_irradiance"),
        ("terrestrial_radiation", "terrestrial_radiation"),
    ],
    skip_offset: 24,
};

impl Source {
    pub fn spec(&self) -> &'static SourceSpec {
        match self {
            Source::Daily       => &DAILY,
            Source::Hourly      => &HOURLY,
            Source::Icon        => &ICON,
            Source::Icon15      => &ICON_15,
            Source::Gfs         => &GFS,
            Source::MeteoFrance => &METEOFRANCE,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Source::Daily       => write!(f, "Daily"),
            Source::Hourly      => write!(f, "Hourly"),
            Source::Icon        => write!(f, "ICON"),
            Source::Icon15      => write!(f, "ICON-15"),
            Source::Gfs         => write!(f, "GFS"),
            Source::MeteoFrance => write!(f, "MeteoFrance"),
        }
    }
}
