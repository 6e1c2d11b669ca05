//! Measurement database types.
use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    ops::Deref,
    str::FromStr,
};

/// Cities that measurements can be recorded for.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    Iasi,
    Bacau,
    Vaslui,
    Neamt,
    Botosani,
    Vrance,
    Galati,
}

impl City {
    /// Every known city.
    pub const ALL: [City; 7] = [
        City::Iasi,
        City::Bacau,
        City::Vaslui,
        City::Neamt,
        City::Botosani,
        City::Vrance,
        City::Galati,
    ];

    /// Name as used in requests and in the datastore.
    pub fn as_str(&self) -> &'static str {
        match self {
            City::Iasi => "Iasi",
            City::Bacau => "Bacau",
            City::Vaslui => "Vaslui",
            City::Neamt => "Neamt",
            City::Botosani => "Botosani",
            City::Vrance => "Vrance",
            City::Galati => "Galati",
        }
    }
}

impl Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a name outside of the city whitelist.
#[derive(Debug, PartialEq, Eq)]
pub struct UnknownCity;

impl FromStr for City {
    type Err = UnknownCity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        City::ALL
            .into_iter()
            .find(|city| city.as_str() == s)
            .ok_or(UnknownCity)
    }
}

/// Measurement primary key.
#[derive(Copy, Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct MeasurementId(pub i64);

impl Deref for MeasurementId {
    type Target = i64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored sensor reading.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Measurement {
    pub id: MeasurementId,
    pub city: City,
    pub co2: i64,
    pub pm25: i64,
    pub temperature: i64,
    pub humidity: i64,
    /// Seconds since the unix epoch.
    pub timestamp: i64,
}

impl Measurement {
    /// Copy of this measurement with `changes` applied.
    pub fn with_changes(&self, changes: &MeasurementChanges) -> Measurement {
        Measurement {
            co2: changes.co2.unwrap_or(self.co2),
            pm25: changes.pm25.unwrap_or(self.pm25),
            temperature: changes.temperature.unwrap_or(self.temperature),
            humidity: changes.humidity.unwrap_or(self.humidity),
            ..self.clone()
        }
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} co2={} pm25={} temperature={} humidity={} at {}",
            self.id, self.city, self.co2, self.pm25, self.temperature, self.humidity, self.timestamp
        )
    }
}

/// A measurement that has not been assigned an id yet.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct NewMeasurement {
    pub city: City,
    pub co2: i64,
    pub pm25: i64,
    pub temperature: i64,
    pub humidity: i64,
    pub timestamp: i64,
}

impl NewMeasurement {
    /// Attach a storage assigned id.
    pub fn with_id(self, id: MeasurementId) -> Measurement {
        Measurement {
            id,
            city: self.city,
            co2: self.co2,
            pm25: self.pm25,
            temperature: self.temperature,
            humidity: self.humidity,
            timestamp: self.timestamp,
        }
    }
}

/// Partial update of a measurement. Only the fields that are set get written.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct MeasurementChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub co2: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pm25: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<i64>,
}

impl MeasurementChanges {
    /// True when no field would be written.
    pub fn is_empty(&self) -> bool {
        self.co2.is_none()
            && self.pm25.is_none()
            && self.temperature.is_none()
            && self.humidity.is_none()
    }
}

impl Display for MeasurementChanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = [
            ("co2", self.co2),
            ("pm25", self.pm25),
            ("temperature", self.temperature),
            ("humidity", self.humidity),
        ];
        let set = fields
            .iter()
            .filter_map(|(name, value)| value.map(|v| format!("{name}={v}")))
            .collect::<Vec<_>>();
        write!(f, "{}", set.join(" "))
    }
}

/// Inclusive time window in epoch seconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: i64,
    pub end: i64,
}

impl DateRange {
    /// Check if a timestamp falls inside the window.
    pub fn contains(&self, timestamp: i64) -> bool {
        (self.start..=self.end).contains(&timestamp)
    }
}

impl Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
