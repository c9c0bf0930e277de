use serde::{Deserialize, Deserializer, Serialize};

/// Series requested when none is given on the command line (CPI-U, all items).
pub const DEFAULT_SERIES_ID: &str = "CUUR0000SA0";
pub const DEFAULT_START_YEAR: &str = "2022";
pub const DEFAULT_END_YEAR: &str = "2024";

/// Status string the API reports for a fully processed request.
pub const STATUS_SUCCEEDED: &str = "REQUEST_SUCCEEDED";

/// Top-level response body, shared by the GET and POST endpoints.
///
/// Every field tolerates being absent or `null` and falls back to its zero value,
/// so a partially shaped payload still decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(
        rename = "responseTime",
        default,
        deserialize_with = "de_i64_from_string_or_number"
    )]
    pub response_time: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: Vec<String>,
    #[serde(rename = "Results", default, deserialize_with = "null_as_default")]
    pub results: Results,
}

impl Response {
    /// `true` when the API accepted and processed the request.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCEEDED
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    #[serde(default, deserialize_with = "null_as_default")]
    pub series: Vec<Series>,
}

/// One series with its observations in the order the API returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(rename = "seriesID", default, deserialize_with = "null_as_default")]
    pub series_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<DataPoint>,
}

/// A single (year, period) observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub year: String,
    /// Period code such as `M01` (monthly), `Q01` (quarterly) or `M13` (annual average).
    #[serde(default, deserialize_with = "null_as_default")]
    pub period: String,
    #[serde(rename = "periodName", default, deserialize_with = "null_as_default")]
    pub period_name: String,
    /// Kept as received: the API sends numbers as strings and uses markers like `-` for
    /// missing observations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub footnotes: Vec<Footnote>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Footnote {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
}

/// Body of a POST query against the timeseries endpoint.
///
/// Field names match the JSON keys the API expects. Unknown keys are rejected when
/// reading a query back, so the payload shape stays fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimeseriesQuery {
    pub seriesid: Vec<String>,
    pub startyear: String,
    pub endyear: String,
    pub catalog: bool,
    pub calculations: bool,
    pub annualaverage: bool,
    pub aspects: bool,
    pub registrationkey: String,
}

impl TimeseriesQuery {
    /// Query for `series_ids` over `start..=end` with every optional enrichment turned off.
    ///
    /// Series ids are trimmed, the same way the GET request path treats them.
    pub fn new(
        series_ids: Vec<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        registration_key: impl Into<String>,
    ) -> Self {
        Self {
            seriesid: series_ids
                .into_iter()
                .map(|id| id.trim().to_string())
                .collect(),
            startyear: start.into(),
            endyear: end.into(),
            catalog: false,
            calculations: false,
            annualaverage: false,
            aspects: false,
            registrationkey: registration_key.into(),
        }
    }

    /// The fixed CPI query (`CUUR0000SA0`, 2022 to 2024) for the given key.
    pub fn with_defaults(registration_key: impl Into<String>) -> Self {
        Self::new(
            vec![DEFAULT_SERIES_ID.to_string()],
            DEFAULT_START_YEAR,
            DEFAULT_END_YEAR,
            registration_key,
        )
    }
}

/// Serde helper: treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde helper: parse `i64` from a JSON number, a numeric string or `null`.
fn de_i64_from_string_or_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string or integer representing a number of milliseconds")
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            i64::try_from(v).map_err(E::custom)
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<i64>().map_err(E::custom)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(0)
        }
    }

    deserializer.deserialize_any(I64Visitor)
}
