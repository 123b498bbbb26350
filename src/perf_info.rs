use std::thread;

use tracing::{info, warn};

pub fn get_num_cpus() -> usize {
    match thread::available_parallelism() {
        Ok(n) => n.get(),
        Err(e) => {
            warn!("could not query available parallelism: {e}");
            1
        }
    }
}

pub fn write_cpu_info() {
    info!(
        "{} logical processors ({} {})",
        get_num_cpus(),
        std::env::consts::OS,
        std::env::consts::ARCH
    );
}
