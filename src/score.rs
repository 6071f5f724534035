//! Authoritative solution scoring.
//!
//! [`evaluate`] is the ground truth for validity and cost. It works on the
//! exchange records directly and never trusts cached loads, so it can judge
//! states produced by any method, including ones read back from disk.

use crate::dataset::{Dataset, SolutionRecord};
use crate::instance::Instance;
use crate::model::{Load, Point};
use serde::Serialize;

/// Cost, verdict and a human-readable diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    /// Total installation cost; zero when invalid.
    pub cost: u64,
    pub valid: bool,
    pub message: String,
}

impl Score {
    fn invalid(message: impl Into<String>) -> Self {
        Self {
            cost: 0,
            valid: false,
            message: message.into(),
        }
    }
}

/// Scores a solution record against an instance.
pub fn evaluate(solution: &SolutionRecord, instance: &Instance) -> Score {
    let mut served = vec![false; instance.len()];
    let mut cost = 0u64;

    for (n, antenna) in solution.antennas.iter().enumerate() {
        let position = Point::new(antenna.x, antenna.y);
        let kind = antenna.kind;
        let mut load = Load::default();

        for &id in &antenna.buildings {
            let Some(index) = instance.index_of(id) else {
                return Score::invalid(format!("Antenna {n} serves unknown building {id}"));
            };
            if served[index] {
                return Score::invalid(format!("Building {id} is served by more than one antenna"));
            }
            served[index] = true;

            let building = instance.building(index);
            if !position.in_range(building.position, kind.range()) {
                return Score::invalid(format!(
                    "Building {id} at ({}, {}) is out of range of {kind} antenna {n} at ({}, {})",
                    building.position.x, building.position.y, position.x, position.y
                ));
            }
            load.add(&building.demand);
        }

        if !load.fits(kind.capacity()) {
            return Score::invalid(format!(
                "{kind} antenna {n} at ({}, {}) exceeds its capacity {} (peak {}, off-peak {}, night {})",
                position.x,
                position.y,
                kind.capacity(),
                load.peak,
                load.off_peak,
                load.night
            ));
        }
        cost += instance.cost_at(kind, position);
    }

    if let Some(missing) = served.iter().position(|&s| !s) {
        return Score::invalid(format!(
            "Building {} is not served by any antenna",
            instance.building(missing).id
        ));
    }

    Score {
        cost,
        valid: true,
        message: format!(
            "Valid solution: {} antennas serve {} buildings, total cost {cost}",
            solution.antennas.len(),
            instance.len()
        ),
    }
}

/// Scores raw JSON texts. Parse failures and invalid datasets produce an
/// invalid score rather than an error.
pub fn evaluate_json(solution_text: &str, dataset_text: &str) -> Score {
    let dataset = match Dataset::from_json(dataset_text) {
        Ok(d) => d,
        Err(e) => return Score::invalid(format!("Cannot parse dataset: {e}")),
    };
    let instance = match Instance::new(&dataset) {
        Ok(i) => i,
        Err(e) => return Score::invalid(format!("Invalid dataset: {e}")),
    };
    let solution = match SolutionRecord::from_json(solution_text) {
        Ok(s) => s,
        Err(e) => return Score::invalid(format!("Cannot parse solution: {e}")),
    };
    evaluate(&solution, &instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::AntennaRecord;
    use crate::model::{AntennaType, Building, Demand};

    fn instance() -> Instance {
        Instance::from_buildings(vec![
            Building::new(1, 0, 0, Demand::new(100, 20, 5)),
            Building::new(2, 30, 40, Demand::new(90, 20, 5)),
            Building::new(3, 500, 0, Demand::new(10, 10, 10)),
        ])
        .unwrap()
    }

    fn antenna(kind: AntennaType, x: i64, y: i64, buildings: &[u32]) -> AntennaRecord {
        AntennaRecord {
            kind,
            x,
            y,
            buildings: buildings.to_vec(),
        }
    }

    #[test]
    fn test_valid_solution_cost() {
        let sol = SolutionRecord {
            antennas: vec![
                antenna(AntennaType::Nano, 0, 0, &[1, 2]),
                antenna(AntennaType::Nano, 501, 0, &[3]),
            ],
        };
        let score = evaluate(&sol, &instance());
        assert!(score.valid, "{}", score.message);
        assert_eq!(score.cost, 5_000 + 6_000);
    }

    #[test]
    fn test_missing_building() {
        let sol = SolutionRecord {
            antennas: vec![antenna(AntennaType::Nano, 0, 0, &[1, 2])],
        };
        let score = evaluate(&sol, &instance());
        assert!(!score.valid);
        assert_eq!(score.cost, 0);
        assert!(score.message.contains("Building 3"));
    }

    #[test]
    fn test_duplicate_building() {
        let sol = SolutionRecord {
            antennas: vec![
                antenna(AntennaType::Nano, 0, 0, &[1, 2]),
                antenna(AntennaType::Nano, 500, 0, &[3, 2]),
            ],
        };
        assert!(!evaluate(&sol, &instance()).valid);
    }

    #[test]
    fn test_out_of_range() {
        let sol = SolutionRecord {
            antennas: vec![
                antenna(AntennaType::Nano, 0, 0, &[1]),
                antenna(AntennaType::Nano, 500, 0, &[2, 3]),
            ],
        };
        let score = evaluate(&sol, &instance());
        assert!(!score.valid);
        assert!(score.message.contains("out of range"));
    }

    #[test]
    fn test_over_capacity_any_period() {
        let inst = Instance::from_buildings(vec![
            Building::new(1, 0, 0, Demand::new(0, 0, 150)),
            Building::new(2, 1, 0, Demand::new(0, 0, 51)),
        ])
        .unwrap();
        let sol = SolutionRecord {
            antennas: vec![antenna(AntennaType::Nano, 0, 0, &[1, 2])],
        };
        let score = evaluate(&sol, &inst);
        assert!(!score.valid);
        assert!(score.message.contains("capacity"));
    }

    #[test]
    fn test_unknown_building() {
        let sol = SolutionRecord {
            antennas: vec![antenna(AntennaType::MaxRange, 0, 0, &[1, 2, 42])],
        };
        let score = evaluate(&sol, &instance());
        assert!(!score.valid);
        assert!(score.message.contains("unknown building 42"));
    }

    #[test]
    fn test_evaluate_json() {
        let dataset = r#"{"buildings":[{"id":7,"x":0,"y":0,"populationPeakHours":10,"populationOffPeakHours":10,"populationNight":10}]}"#;
        let good = r#"{"antennas":[{"type":"Nano","x":0,"y":0,"buildings":[7]}]}"#;
        let score = evaluate_json(good, dataset);
        assert!(score.valid);
        assert_eq!(score.cost, 5_000);

        let bad_type = r#"{"antennas":[{"type":"Giga","x":0,"y":0,"buildings":[7]}]}"#;
        assert!(!evaluate_json(bad_type, dataset).valid);
        assert!(!evaluate_json("not json", dataset).valid);
    }

    #[test]
    fn test_huge_coordinates_score_invalid() {
        let dataset = r#"{"buildings":[{"id":7,"x":0,"y":0,"populationPeakHours":10,"populationOffPeakHours":10,"populationNight":10}]}"#;
        let far = r#"{"antennas":[{"type":"Nano","x":9000000000000000000,"y":0,"buildings":[7]}]}"#;
        let score = evaluate_json(far, dataset);
        assert!(!score.valid);
        assert!(score.message.contains("out of range"));

        let corner = r#"{"antennas":[{"type":"MaxRange","x":9223372036854775807,"y":-9223372036854775808,"buildings":[7]}]}"#;
        assert!(!evaluate_json(corner, dataset).valid);
    }

    #[test]
    fn test_empty_instance_is_valid_at_zero_cost() {
        let inst = Instance::from_buildings(Vec::new()).unwrap();
        let score = evaluate(&SolutionRecord::default(), &inst);
        assert!(score.valid);
        assert_eq!(score.cost, 0);
    }
}
