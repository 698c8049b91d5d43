//! ModifierChain - ordered multiplicative and additive adjustments to one value

use serde::{Deserialize, Serialize};

/// One adjustment in a chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ChainStep {
    Multiply { label: String, factor: f64 },
    Add { label: String, amount: f64 },
}

impl ChainStep {
    pub fn label(&self) -> &str {
        match self {
            ChainStep::Multiply { label, .. } | ChainStep::Add { label, .. } => label,
        }
    }
}

/// A base value followed by adjustments applied strictly in insertion order
///
/// An additive step after a multiplier is not scaled by it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierChain {
    pub base: f64,
    pub steps: Vec<ChainStep>,
}

impl ModifierChain {
    pub fn with_base(base: f64) -> Self {
        ModifierChain {
            base,
            steps: Vec::new(),
        }
    }

    pub fn multiply(&mut self, label: impl Into<String>, factor: f64) {
        self.steps.push(ChainStep::Multiply {
            label: label.into(),
            factor,
        });
    }

    pub fn add(&mut self, label: impl Into<String>, amount: f64) {
        self.steps.push(ChainStep::Add {
            label: label.into(),
            amount,
        });
    }

    /// Apply every step in order
    pub fn compute(&self) -> f64 {
        self.steps.iter().fold(self.base, |value, step| match step {
            ChainStep::Multiply { factor, .. } => value * factor,
            ChainStep::Add { amount, .. } => value + amount,
        })
    }

    pub fn labels(&self) -> Vec<&str> {
        self.steps.iter().map(ChainStep::label).collect()
    }

    pub fn has_step(&self, label: &str) -> bool {
        self.steps.iter().any(|s| s.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_basic() {
        let chain = ModifierChain::with_base(100.0);
        assert!((chain.compute() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_order_matters() {
        let mut add_first = ModifierChain::with_base(100.0);
        add_first.add("capacitor", 50.0);
        add_first.multiply("rear", 0.5);

        let mut multiply_first = ModifierChain::with_base(100.0);
        multiply_first.multiply("rear", 0.5);
        multiply_first.add("capacitor", 50.0);

        assert!((add_first.compute() - 75.0).abs() < f64::EPSILON);
        assert!((multiply_first.compute() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_multipliers_compound() {
        let mut chain = ModifierChain::with_base(100.0);
        chain.multiply("guidance", 1.2);
        chain.multiply("targeting computer", 1.25);
        assert!((chain.compute() - 150.0).abs() < 1e-9);
        assert_eq!(chain.labels(), vec!["guidance", "targeting computer"]);
        assert!(chain.has_step("guidance"));
        assert!(!chain.has_step("rear"));
    }
}
