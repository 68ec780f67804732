// environment.rs — DisasterEnvironment: a synthetic, seeded event source.
//
// Each tick picks one zone uniformly at random. With probability equal to
// the zone's base risk a disaster occurs there; its kind and severity are
// drawn uniformly, and the sensor readings are drawn from ranges that
// depend on the kind (fires run hot, floods raise the water, earthquakes
// shake). The risk table is configuration, not contract.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use rescue_goal::{DisasterEvent, DisasterKind, SensorReadings, Severity};

use crate::source::EventSource;

/// A monitored zone and its per-tick chance of a disaster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneConfig {
    /// Zone identifier (e.g., "Zone-A").
    pub id: String,

    /// Human-readable name (e.g., "Residential District").
    pub name: String,

    /// Probability in `[0, 1]` that a tick landing on this zone is a disaster.
    pub base_risk: f64,
}

impl ZoneConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_risk: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_risk,
        }
    }
}

/// Environment configuration (the `[environment]` table).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default = "default_zones")]
    pub zones: Vec<ZoneConfig>,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            zones: default_zones(),
        }
    }
}

fn default_zones() -> Vec<ZoneConfig> {
    vec![
        ZoneConfig::new("Zone-A", "Residential District", 0.3),
        ZoneConfig::new("Zone-B", "Commercial Hub", 0.25),
        ZoneConfig::new("Zone-C", "Industrial Area", 0.35),
        ZoneConfig::new("Zone-D", "Coastal Region", 0.4),
        ZoneConfig::new("Zone-E", "Highland Sector", 0.2),
    ]
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Random disaster generator over a fixed set of zones.
pub struct DisasterEnvironment<R: Rng> {
    zones: Vec<ZoneConfig>,
    rng: R,
    active_disasters: HashMap<String, DisasterEvent>,
}

impl<R: Rng> DisasterEnvironment<R> {
    pub fn new(config: &EnvironmentConfig, rng: R) -> Self {
        Self {
            zones: config.zones.clone(),
            rng,
            active_disasters: HashMap::new(),
        }
    }

    /// Roll one tick.
    pub fn generate_event(&mut self) -> Option<DisasterEvent> {
        let zone = self.zones.choose(&mut self.rng)?.clone();

        if self.rng.gen::<f64>() >= zone.base_risk {
            return None;
        }

        let kind = *DisasterKind::ACTIVE.choose(&mut self.rng)?;
        let severity = *Severity::REPORTABLE.choose(&mut self.rng)?;
        let readings = self.readings_for(kind);

        let event = DisasterEvent::new(&zone.id, &zone.name, kind, severity, readings);
        tracing::debug!(zone = %zone.id, %kind, %severity, "environment produced disaster");
        self.active_disasters.insert(zone.id, event.clone());
        Some(event)
    }

    fn readings_for(&mut self, kind: DisasterKind) -> SensorReadings {
        let temperature = if kind == DisasterKind::Fire {
            self.rng.gen_range(25.0..60.0)
        } else {
            self.rng.gen_range(20.0..32.0)
        };
        let water_level = if kind == DisasterKind::Flood {
            self.rng.gen_range(4.0..10.0)
        } else {
            self.rng.gen_range(0.5..2.0)
        };
        let seismic_activity = if kind == DisasterKind::Earthquake {
            self.rng.gen_range(3.0..7.5)
        } else {
            self.rng.gen_range(0.0..0.5)
        };
        SensorReadings {
            temperature: round_to(temperature, 1),
            water_level: round_to(water_level, 2),
            seismic_activity: round_to(seismic_activity, 1),
        }
    }

    /// The most recent disaster reported in `zone`, if any.
    pub fn active_disaster(&self, zone: &str) -> Option<&DisasterEvent> {
        self.active_disasters.get(zone)
    }

    pub fn zones(&self) -> &[ZoneConfig] {
        &self.zones
    }
}

impl DisasterEnvironment<StdRng> {
    /// Seeded environment for reproducible runs; `None` draws OS entropy.
    pub fn seeded(config: &EnvironmentConfig, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self::new(config, rng)
    }
}

impl<R: Rng> EventSource for DisasterEnvironment<R> {
    fn next_event(&mut self) -> Option<DisasterEvent> {
        self.generate_event()
    }
}
