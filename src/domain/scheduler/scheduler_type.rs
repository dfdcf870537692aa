use std::fmt;
use std::str::FromStr;

use crate::domain::scheduler::{FcfsScheduler, PriorityScheduler, RoundRobinScheduler, Scheduler, SjfScheduler};
use crate::error::{Error, Result};

/// The closed set of scheduling algorithms a run can be set up with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchedulerType {
    /// **First-Come, First-Served**: non-preemptive, strictly in arrival order.
    Fcfs,
    /// **Shortest Job First**: non-preemptive, shortest burst among arrived processes.
    Sjf,
    /// Static, non-preemptive priority. Lower values run first.
    Priority,
    /// Preemptive, quantum-limited FIFO rotation.
    RoundRobin,
}

/// Algorithm-specific options. Only `quantum` is recognized, and only round robin reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerConfig {
    pub quantum: Option<i64>,
}

impl SchedulerConfig {
    pub fn with_quantum(quantum: i64) -> Self {
        SchedulerConfig { quantum: Some(quantum) }
    }
}

impl SchedulerType {
    pub const ALL: [SchedulerType; 4] = [SchedulerType::Fcfs, SchedulerType::Sjf, SchedulerType::Priority, SchedulerType::RoundRobin];

    pub fn name(&self) -> &'static str {
        match self {
            SchedulerType::Fcfs => "FCFS",
            SchedulerType::Sjf => "SJF",
            SchedulerType::Priority => "Priority",
            SchedulerType::RoundRobin => "Round-Robin",
        }
    }

    pub fn is_preemptive(&self) -> bool {
        matches!(self, SchedulerType::RoundRobin)
    }

    /// Factory method returning a concrete [`Scheduler`] for this variant.
    ///
    /// The configuration is validated here, before any scheduling work starts.
    pub fn get_instance(&self, config: &SchedulerConfig) -> Result<Box<dyn Scheduler>> {
        match self {
            SchedulerType::Fcfs => Ok(Box::new(FcfsScheduler)),
            SchedulerType::Sjf => Ok(Box::new(SjfScheduler)),
            SchedulerType::Priority => Ok(Box::new(PriorityScheduler)),
            SchedulerType::RoundRobin => {
                let quantum = config
                    .quantum
                    .ok_or_else(|| Error::InvalidConfiguration("round robin requires a quantum".to_string()))?;
                Ok(Box::new(RoundRobinScheduler::new(quantum)?))
            }
        }
    }
}

impl fmt::Display for SchedulerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SchedulerType {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" | "first-come-first-served" => Ok(SchedulerType::Fcfs),
            "sjf" | "shortest-job-first" => Ok(SchedulerType::Sjf),
            "priority" => Ok(SchedulerType::Priority),
            "rr" | "roundrobin" | "round-robin" => Ok(SchedulerType::RoundRobin),
            _ => Err(Error::UnknownSchedulerType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("FCFS".parse::<SchedulerType>().unwrap(), SchedulerType::Fcfs);
        assert_eq!("sjf".parse::<SchedulerType>().unwrap(), SchedulerType::Sjf);
        assert_eq!("Priority".parse::<SchedulerType>().unwrap(), SchedulerType::Priority);
        assert_eq!("RoundRobin".parse::<SchedulerType>().unwrap(), SchedulerType::RoundRobin);
        assert_eq!("rr".parse::<SchedulerType>().unwrap(), SchedulerType::RoundRobin);

        for scheduler_type in SchedulerType::ALL {
            assert_eq!(scheduler_type.name().parse::<SchedulerType>().unwrap(), scheduler_type);
        }

        assert!(matches!("lottery".parse::<SchedulerType>(), Err(Error::UnknownSchedulerType(_))));
    }

    #[test]
    fn round_robin_needs_positive_quantum() {
        let missing = SchedulerType::RoundRobin.get_instance(&SchedulerConfig::default());
        assert!(matches!(missing, Err(Error::InvalidConfiguration(_))));

        let zero = SchedulerType::RoundRobin.get_instance(&SchedulerConfig::with_quantum(0));
        assert!(matches!(zero, Err(Error::InvalidConfiguration(_))));

        let negative = SchedulerType::RoundRobin.get_instance(&SchedulerConfig::with_quantum(-3));
        assert!(matches!(negative, Err(Error::InvalidConfiguration(_))));

        assert!(SchedulerType::RoundRobin.get_instance(&SchedulerConfig::with_quantum(2)).is_ok());
    }

    #[test]
    fn only_round_robin_preempts() {
        let preemptive: Vec<SchedulerType> = SchedulerType::ALL.into_iter().filter(SchedulerType::is_preemptive).collect();
        assert_eq!(preemptive, vec![SchedulerType::RoundRobin]);
    }

    #[test]
    fn quantum_is_ignored_by_other_variants() {
        for scheduler_type in [SchedulerType::Fcfs, SchedulerType::Sjf, SchedulerType::Priority] {
            assert!(scheduler_type.get_instance(&SchedulerConfig::with_quantum(-1)).is_ok());
            assert!(scheduler_type.get_instance(&SchedulerConfig::default()).is_ok());
        }
    }
}
