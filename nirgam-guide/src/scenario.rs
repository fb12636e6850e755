//! Simulation inputs: hazard flags, scenario files and sensor reports.

use log::info;
use nirgam_route::{Hazard, NirgamConfig, SensorReport};
use serde::Deserialize;
use std::path::Path;

use crate::error::{GuideError, Result};

/// Scenario file: hazards by coordinates or preset zone, plus an optional
/// sensor report.
#[derive(Debug, Default, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub hazards: Vec<Hazard>,

    /// Preset zone names from `hazards.presets`
    #[serde(default)]
    pub zones: Vec<String>,

    #[serde(default)]
    pub sensor: Option<SensorReport>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_yaml::from_str(&contents)?;
        info!(
            "Loaded scenario {} ({} hazards, {} zones)",
            path.display(),
            scenario.hazards.len(),
            scenario.zones.len()
        );
        Ok(scenario)
    }
}

/// Parse a `x,y` or `x,y,radius` hazard flag
pub fn parse_hazard(s: &str) -> std::result::Result<Hazard, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let num = |p: &str| {
        p.parse::<f32>()
            .map_err(|_| format!("'{}' is not a number in hazard '{}'", p, s))
    };

    match parts.as_slice() {
        [x, y] => Ok(Hazard::at(num(*x)?, num(*y)?)),
        [x, y, r] => {
            let r = num(*r)?;
            if r < 0.0 {
                return Err(format!("negative radius in hazard '{}'", s));
            }
            Ok(Hazard::with_radius(num(*x)?, num(*y)?, r))
        }
        _ => Err(format!("hazard '{}' must be x,y or x,y,radius", s)),
    }
}

/// Hazards for preset zone names
pub fn zone_hazards(config: &NirgamConfig, zones: &[String]) -> Result<Vec<Hazard>> {
    zones
        .iter()
        .map(|name| {
            config
                .hazards
                .presets
                .get(name)
                .copied()
                .ok_or_else(|| GuideError::UnknownZone(name.clone()))
        })
        .collect()
}

/// Sensor report from a YAML or JSON file
pub fn load_sensor_report(path: &Path) -> Result<SensorReport> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hazard() {
        assert_eq!(parse_hazard("480,250"), Ok(Hazard::at(480.0, 250.0)));
        assert_eq!(
            parse_hazard(" 10.5, 20 , 15 "),
            Ok(Hazard::with_radius(10.5, 20.0, 15.0))
        );
        assert!(parse_hazard("10").is_err());
        assert!(parse_hazard("a,b").is_err());
        assert!(parse_hazard("1,2,-3").is_err());
        assert!(parse_hazard("1,2,3,4").is_err());
    }

    #[test]
    fn test_zone_hazards() {
        let config = NirgamConfig::default();
        let hazards = zone_hazards(&config, &["central_hall".to_string()]).unwrap();
        assert_eq!(hazards, vec![Hazard::at(480.0, 250.0)]);

        let err = zone_hazards(&config, &["basement".to_string()]).unwrap_err();
        assert!(matches!(err, GuideError::UnknownZone(name) if name == "basement"));
    }

    #[test]
    fn test_scenario_yaml() {
        let yaml = "hazards:\n  - {x: 100, y: 200, radius: 30}\nzones: [upper_corridor]\nsensor:\n  hazard: true\n  overrides:\n    2: STOP\n";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.hazards, vec![Hazard::with_radius(100.0, 200.0, 30.0)]);
        assert_eq!(scenario.zones, vec!["upper_corridor"]);
        assert!(scenario.sensor.unwrap().hazard);
    }
}
