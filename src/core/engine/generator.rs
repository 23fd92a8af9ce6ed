use crate::types::config::SeverityWeights;
use crate::types::{DefectRecord, Severity};

use super::mutators::{self, Mutator};

const MINOR_CATALOG: &[Mutator] = &[
    mutators::variable_typo,
    mutators::remove_comment,
    mutators::unused_variable,
];
const MODERATE_CATALOG: &[Mutator] = &[
    mutators::boolean_flip,
    mutators::off_by_one,
    mutators::swapped_arguments,
    mutators::modified_string,
];
const SEVERE_CATALOG: &[Mutator] = &[
    mutators::removed_error_handling,
    mutators::null_dereference,
    mutators::resource_leak,
    mutators::security_vulnerability,
];

fn catalog(severity: Severity) -> &'static [Mutator] {
    match severity {
        Severity::Minor => MINOR_CATALOG,
        Severity::Moderate => MODERATE_CATALOG,
        Severity::Severe => SEVERE_CATALOG,
    }
}

/// Draws a severity tier, picks a strategy from it, and applies it — `count`
/// times, each application observing the previous one's output.
pub struct DefectGenerator {
    weights: SeverityWeights,
}

impl DefectGenerator {
    pub fn new(weights: SeverityWeights) -> Self {
        Self { weights }
    }

    /// Inject up to `count` defects into `source`.
    ///
    /// Every attempt produces a record with its realized severity, failed
    /// ones included; filtering out failures is the caller's decision.
    pub fn generate(
        &self,
        source: &str,
        count: u32,
        rng: &mut fastrand::Rng,
    ) -> (String, Vec<DefectRecord>) {
        let mut text = source.to_string();
        let mut records = Vec::with_capacity(count as usize);

        for _ in 0..count {
            let severity = self.draw_severity(rng);
            let tier = catalog(severity);
            let mutator = tier[rng.usize(..tier.len())];

            let (mutated, mut record) = mutator(&text, rng);
            record.severity = Some(severity);
            text = mutated;
            records.push(record);
        }

        (text, records)
    }

    /// Weighted draw over relative (unnormalized) severity weights.
    fn draw_severity(&self, rng: &mut fastrand::Rng) -> Severity {
        let w = self.weights;
        let total = w.minor + w.moderate + w.severe;
        if total <= 0.0 {
            return Severity::Minor;
        }
        let x = rng.f64() * total;
        if x < w.minor {
            Severity::Minor
        } else if x < w.minor + w.moderate {
            Severity::Moderate
        } else {
            Severity::Severe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_respects_degenerate_weights() {
        let generator = DefectGenerator::new(SeverityWeights {
            minor: 0.0,
            moderate: 0.0,
            severe: 1.0,
        });
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..50 {
            assert_eq!(generator.draw_severity(&mut rng), Severity::Severe);
        }
    }

    #[test]
    fn zero_weights_fall_back_to_minor() {
        let generator = DefectGenerator::new(SeverityWeights {
            minor: 0.0,
            moderate: 0.0,
            severe: 0.0,
        });
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(generator.draw_severity(&mut rng), Severity::Minor);
    }

    #[test]
    fn every_attempt_gets_a_record_with_severity() {
        let generator = DefectGenerator::new(SeverityWeights::default());
        let mut rng = fastrand::Rng::with_seed(42);
        let source = "total = 1\nif total == 1:\n    pass\n";
        let (_, records) = generator.generate(source, 5, &mut rng);
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.severity.is_some()));
    }

    #[test]
    fn engine_tolerates_always_failing_tier() {
        // Severe tier on a source with no security sites: everything fails,
        // text stays identical, records still come back.
        let generator = DefectGenerator::new(SeverityWeights {
            minor: 0.0,
            moderate: 0.0,
            severe: 1.0,
        });
        let mut rng = fastrand::Rng::with_seed(3);
        let source = "pass\n";
        let (text, records) = generator.generate(source, 4, &mut rng);
        assert_eq!(text, source);
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| !r.success));
    }
}
