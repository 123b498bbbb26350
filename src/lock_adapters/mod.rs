pub use self::{
    mutex::MutexLocker,
    tas::TasLocker,
    ticket::{TicketBackoff, TicketLocker},
    ttas::{TtasBackoff, TtasLocker},
};

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{BenchError, Result};
use crate::perf::{Measurement, BEST_SPIN_LABEL, MUTEX_LABEL, TTAS_LABEL};
use crate::perf_lock::{run_workload, RunConfig};

mod backoff;
mod mutex;
mod tas;
mod ticket;
mod ttas;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LockKind {
    Mutex,
    Tas,
    Ttas,
    TtasShortBackoff,
    BestSpin,
    TtasLongExpBackoff,
    Ticket,
    TicketShortBackoff,
    TicketExpBackoff,
}

impl LockKind {
    pub const ALL: [LockKind; 9] = [
        LockKind::Mutex,
        LockKind::Tas,
        LockKind::Ttas,
        LockKind::TtasShortBackoff,
        LockKind::BestSpin,
        LockKind::TtasLongExpBackoff,
        LockKind::Ticket,
        LockKind::TicketShortBackoff,
        LockKind::TicketExpBackoff,
    ];

    /// The locks compared in the sample table.
    pub const COMPARED: [LockKind; 3] = [LockKind::Mutex, LockKind::Ttas, LockKind::BestSpin];

    /// Name used on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            LockKind::Mutex => "mutex",
            LockKind::Tas => "tas",
            LockKind::Ttas => "ttas",
            LockKind::TtasShortBackoff => "ttas-short-backoff",
            LockKind::BestSpin => "best-spin",
            LockKind::TtasLongExpBackoff => "ttas-long-exp-backoff",
            LockKind::Ticket => "ticket",
            LockKind::TicketShortBackoff => "ticket-short-backoff",
            LockKind::TicketExpBackoff => "ticket-exp-backoff",
        }
    }

    /// Name used in measurements and plot legends.
    pub fn label(&self) -> &'static str {
        match self {
            LockKind::Mutex => MUTEX_LABEL,
            LockKind::Tas => "TAS",
            LockKind::Ttas => TTAS_LABEL,
            LockKind::TtasShortBackoff => "TTAS short backoff",
            LockKind::BestSpin => BEST_SPIN_LABEL,
            LockKind::TtasLongExpBackoff => "TTAS long exp backoff",
            LockKind::Ticket => "ticket",
            LockKind::TicketShortBackoff => "ticket short backoff",
            LockKind::TicketExpBackoff => "ticket exp backoff",
        }
    }

    /// Ticket locks without a short backoff take very long under heavy
    /// contention.
    pub fn is_slow(&self) -> bool {
        matches!(self, LockKind::Ticket | LockKind::TicketExpBackoff)
    }

    pub fn run(&self, config: &RunConfig) -> Result<Measurement> {
        let name = self.label();
        match self {
            LockKind::Mutex => run_workload(name, Arc::new(MutexLocker::new()), config),
            LockKind::Tas => run_workload(name, Arc::new(TasLocker::new()), config),
            LockKind::Ttas => {
                run_workload(name, Arc::new(TtasLocker::new(TtasBackoff::None)), config)
            }
            LockKind::TtasShortBackoff => {
                run_workload(name, Arc::new(TtasLocker::new(TtasBackoff::Short)), config)
            }
            LockKind::BestSpin => {
                run_workload(name, Arc::new(TtasLocker::new(TtasBackoff::ShortExp)), config)
            }
            LockKind::TtasLongExpBackoff => {
                run_workload(name, Arc::new(TtasLocker::new(TtasBackoff::LongExp)), config)
            }
            LockKind::Ticket => {
                run_workload(name, Arc::new(TicketLocker::new(TicketBackoff::None)), config)
            }
            LockKind::TicketShortBackoff => {
                run_workload(name, Arc::new(TicketLocker::new(TicketBackoff::Short)), config)
            }
            LockKind::TicketExpBackoff => {
                run_workload(name, Arc::new(TicketLocker::new(TicketBackoff::Exp)), config)
            }
        }
    }
}

impl fmt::Display for LockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for LockKind {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self> {
        LockKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| {
                let known: Vec<_> = LockKind::ALL.iter().map(LockKind::key).collect();
                BenchError::InvalidConfig(format!(
                    "unknown lock {s:?}, expected one of {}",
                    known.join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_key() {
        for kind in LockKind::ALL {
            assert_eq!(kind.key().parse::<LockKind>().unwrap(), kind);
        }
        assert!(matches!(
            "spin".parse::<LockKind>(),
            Err(BenchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn compared_locks_use_table_labels() {
        let labels: Vec<_> = LockKind::COMPARED.iter().map(LockKind::label).collect();
        assert_eq!(labels, vec!["mutex", "TTAS", "best spin"]);
    }

    #[test]
    fn every_lock_excludes_under_contention() {
        let config = RunConfig::split(2, 2_000).unwrap();
        for kind in LockKind::ALL {
            let m = kind.run(&config).unwrap();
            assert_eq!(m.name, kind.label());
            assert_eq!(m.thread_count, 2);
        }
    }
}
