//! What each invocation decided, package by package.

use crate::link::LinkStatus;

/// Result of running one sub-area builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaOutcome {
    /// Nothing to act on (no files, or no descriptor for the area).
    Skipped,
    /// Inputs unchanged and outputs present; no tool was run.
    UpToDate,
    /// Rebuilt wholesale.
    Built {
        /// State of the dependency-manager-visible copy afterwards.
        link: LinkStatus,
    },
    /// Server files transpiled and registered.
    Compiled {
        /// Number of files registered.
        files: usize,
    },
}

impl AreaOutcome {
    /// Returns `true` if an external tool produced new output.
    pub fn did_work(&self) -> bool {
        matches!(self, Self::Built { .. } | Self::Compiled { .. })
    }
}

/// Outcomes for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    /// The package unit name.
    pub unit: String,
    /// Shared sub-area.
    pub shared: AreaOutcome,
    /// Server sub-area.
    pub server: AreaOutcome,
    /// Client sub-area.
    pub client: AreaOutcome,
}

/// Outcomes for every package of one invocation, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationReport {
    /// Per-package outcomes.
    pub packages: Vec<PackageReport>,
}

impl InvocationReport {
    /// Looks up a package by unit name.
    pub fn package(&self, unit: &str) -> Option<&PackageReport> {
        self.packages.iter().find(|p| p.unit == unit)
    }

    /// Install failures as `(unit, area, reason)`.
    pub fn link_failures(&self) -> Vec<(&str, &'static str, &str)> {
        let mut failures = Vec::new();
        for p in &self.packages {
            for (area, outcome) in [("common", &p.shared), ("client", &p.client)] {
                if let AreaOutcome::Built {
                    link: LinkStatus::Failed(reason),
                } = outcome
                {
                    failures.push((p.unit.as_str(), area, reason.as_str()));
                }
            }
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> InvocationReport {
        InvocationReport {
            packages: vec![PackageReport {
                unit: "w".to_string(),
                shared: AreaOutcome::Built {
                    link: LinkStatus::Failed("npm exited 1".to_string()),
                },
                server: AreaOutcome::Compiled { files: 2 },
                client: AreaOutcome::UpToDate,
            }],
        }
    }

    #[test]
    fn lookup_by_unit() {
        let r = report();
        assert!(r.package("w").is_some());
        assert!(r.package("x").is_none());
    }

    #[test]
    fn link_failures_listed() {
        assert_eq!(report().link_failures(), vec![("w", "common", "npm exited 1")]);
    }

    #[test]
    fn did_work() {
        assert!(AreaOutcome::Compiled { files: 1 }.did_work());
        assert!(!AreaOutcome::UpToDate.did_work());
        assert!(!AreaOutcome::Skipped.did_work());
    }
}
