use std::fmt::Display;

use crate::config::{Dimension, OverallResult};

/// Qualitative band of the score of one dimension.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Rating {
    Excellent,
    Good,
    Fair,
    Critical,
}

impl Rating {
    pub fn from_score(score: f64) -> Rating {
        if score >= 85.0 {
            Rating::Excellent
        } else if score >= 70.0 {
            Rating::Good
        } else if score >= 50.0 {
            Rating::Fair
        } else {
            Rating::Critical
        }
    }
}

impl Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Fair => "Fair",
            Rating::Critical => "Critical",
        };
        write!(f, "{}", s)
    }
}

/// Qualitative band of the overall resilience.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ResilienceLevel {
    ResilientLeader,
    ResilientPerformer,
    BasicAssurance,
    Vulnerable,
}

impl ResilienceLevel {
    pub fn from_score(overall: f64) -> ResilienceLevel {
        match Rating::from_score(overall) {
            Rating::Excellent => ResilienceLevel::ResilientLeader,
            Rating::Good => ResilienceLevel::ResilientPerformer,
            Rating::Fair => ResilienceLevel::BasicAssurance,
            Rating::Critical => ResilienceLevel::Vulnerable,
        }
    }
}

impl Display for ResilienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResilienceLevel::ResilientLeader => "Resilient Leader",
            ResilienceLevel::ResilientPerformer => "Resilient Performer",
            ResilienceLevel::BasicAssurance => "Basic Assurance",
            ResilienceLevel::Vulnerable => "Vulnerable",
        };
        write!(f, "{}", s)
    }
}

const STRENGTH_THRESHOLD: f64 = 80.0;
const WEAKNESS_THRESHOLD: f64 = 60.0;

impl OverallResult {
    pub fn level(&self) -> ResilienceLevel {
        ResilienceLevel::from_score(self.overall_resilience)
    }

    /// The dimensions scoring at least 80%, in canonical order.
    pub fn strengths(&self) -> Vec<Dimension> {
        self.dimensions
            .iter()
            .filter(|d| d.score >= STRENGTH_THRESHOLD)
            .map(|d| d.name)
            .collect()
    }

    /// The dimensions scoring below 60%, in canonical order.
    pub fn weaknesses(&self) -> Vec<Dimension> {
        self.dimensions
            .iter()
            .filter(|d| d.score < WEAKNESS_THRESHOLD)
            .map(|d| d.name)
            .collect()
    }
}
