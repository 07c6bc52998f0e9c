//! CPU temperature selection from hardware sensors.

use sysinfo::Components;

/// Sensor chips that report the CPU package, in order of preference.
const CPU_CHIPS: [&str; 3] = ["k10temp", "coretemp", "acpitz"];

/// Pick the CPU temperature: hottest reading of the first preferred chip that
/// has any, otherwise the hottest reading of any sensor.
pub fn pick_cpu_temperature(readings: &[(String, Option<f32>)]) -> Option<f64> {
    let hottest = |filter: &dyn Fn(&str) -> bool| {
        readings
            .iter()
            .filter(|(label, _)| filter(label.as_str()))
            .filter_map(|(_, temp)| (*temp).filter(|t| t.is_finite()))
            .map(f64::from)
            .fold(None, |max: Option<f64>, t| Some(max.map_or(t, |m| m.max(t))))
    };

    CPU_CHIPS
        .iter()
        .find_map(|chip| hottest(&|label: &str| label.to_lowercase().starts_with(*chip)))
        .or_else(|| hottest(&|_| true))
}

pub fn cpu_temperature(components: &Components) -> Option<f64> {
    let readings: Vec<(String, Option<f32>)> = components
        .iter()
        .map(|comp| (comp.label().to_string(), comp.temperature()))
        .collect();
    pick_cpu_temperature(&readings)
}
