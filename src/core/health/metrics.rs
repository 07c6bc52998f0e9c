use serde::{Deserialize, Serialize};

/// Every quantity the health check watches.
///
/// Direction and unit are properties of the kind, never of an individual sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    DeviceUsage,
    DeviceTemperature,
    RamdiskFree,
    RamFree,
    SwapUsage,
    IoWait,
    CpuTemperature,
    Liveness,
}

impl MetricKind {
    pub fn direction(self) -> Direction {
        match self {
            MetricKind::RamdiskFree | MetricKind::RamFree => Direction::AlertBelow,
            MetricKind::DeviceUsage
            | MetricKind::DeviceTemperature
            | MetricKind::SwapUsage
            | MetricKind::IoWait
            | MetricKind::CpuTemperature => Direction::AlertAtOrAbove,
            MetricKind::Liveness => Direction::RequireUp,
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            MetricKind::DeviceTemperature | MetricKind::CpuTemperature => Unit::Celsius,
            MetricKind::Liveness => Unit::State,
            _ => Unit::Percent,
        }
    }

    /// Stable identifier used in JSON output and logs
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::DeviceUsage => "device_used_pct",
            MetricKind::DeviceTemperature => "device_temp_c",
            MetricKind::RamdiskFree => "ramdisk_free_pct",
            MetricKind::RamFree => "ram_free_pct",
            MetricKind::SwapUsage => "swap_used_pct",
            MetricKind::IoWait => "iowait_pct",
            MetricKind::CpuTemperature => "cpu_temp_c",
            MetricKind::Liveness => "service_active",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Floor-inclusive: the limit itself is already critical.
    AlertBelow,
    /// Ceiling-inclusive: the limit itself is already critical.
    AlertAtOrAbove,
    /// Boolean state that must be true; anything else is critical.
    RequireUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Percent,
    Celsius,
    State,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::Celsius => "\u{00B0}C",
            Unit::State => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
    Number(f64),
    State(bool),
}

impl Reading {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Reading::Number(v) => Some(*v),
            Reading::State(_) => None,
        }
    }

    pub fn as_state(&self) -> Option<bool> {
        match self {
            Reading::State(s) => Some(*s),
            Reading::Number(_) => None,
        }
    }
}

/// One observed quantity. `value` is `None` when the source produced nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub kind: MetricKind,
    pub value: Option<Reading>,
    pub context: Option<String>,
}

impl MetricSample {
    pub fn number(kind: MetricKind, value: Option<f64>) -> Self {
        Self {
            kind,
            value: value.filter(|v| v.is_finite()).map(Reading::Number),
            context: None,
        }
    }

    pub fn state(kind: MetricKind, value: Option<bool>) -> Self {
        Self {
            kind,
            value: value.map(Reading::State),
            context: None,
        }
    }

    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

/// Threshold policy for one metric kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub limit: f64,
    pub direction: Direction,
    pub unit: Unit,
}

impl Threshold {
    pub fn for_kind(kind: MetricKind, limit: f64) -> Self {
        Self {
            limit,
            direction: kind.direction(),
            unit: kind.unit(),
        }
    }

    /// Whether a numeric reading crosses this threshold.
    pub fn is_breached(&self, value: f64) -> bool {
        match self.direction {
            Direction::AlertBelow => value <= self.limit,
            Direction::AlertAtOrAbove => value >= self.limit,
            // Numeric readings carry no up/down meaning
            Direction::RequireUp => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Critical,
    Unknown,
}

impl Status {
    pub fn glyph(self) -> &'static str {
        match self {
            Status::Ok => "\u{1F7E2}",
            Status::Critical => "\u{1F534}",
            Status::Unknown => "N/A",
        }
    }

    pub fn is_critical(self) -> bool {
        self == Status::Critical
    }
}

/// Evaluated status of one sample plus its rendered value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricVerdict {
    pub kind: MetricKind,
    pub status: Status,
    pub value: Option<Reading>,
    pub context: Option<String>,
    pub display_text: String,
}
