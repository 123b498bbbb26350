use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::perf::{BenchmarkSample, Measurement};

/// Creates `dir` and any missing parents.
pub fn prepare_out_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}

pub fn write_measurements(records: &[Measurement], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;

    info!("wrote {} measurements to {}", records.len(), path.display());
    Ok(())
}

pub fn write_samples(samples: &[BenchmarkSample], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for sample in samples {
        wtr.serialize(sample)?;
    }
    wtr.flush()?;

    info!("wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

/// Reads a sample table with the header
/// `thread_count,mutex_ms,ttas_ms,best_spin_ms`.
pub fn read_samples(path: &Path) -> Result<Vec<BenchmarkSample>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let samples = rdr
        .deserialize()
        .collect::<std::result::Result<Vec<BenchmarkSample>, csv::Error>>()?;
    Ok(samples)
}
