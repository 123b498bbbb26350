use crate::perf::BenchmarkSample;

pub static PERF_DATA_LOCKS: &[BenchmarkSample] = &[
BenchmarkSample { thread_count: 1, mutex_ms: 50, ttas_ms: 54, best_spin_ms: 58 },
BenchmarkSample { thread_count: 10, mutex_ms: 1731, ttas_ms: 3240, best_spin_ms: 1328 },
BenchmarkSample { thread_count: 20, mutex_ms: 1793, ttas_ms: 5685, best_spin_ms: 1312 },
BenchmarkSample { thread_count: 30, mutex_ms: 1355, ttas_ms: 7546, best_spin_ms: 1040 },
BenchmarkSample { thread_count: 40, mutex_ms: 1840, ttas_ms: 9390, best_spin_ms: 1081 },
BenchmarkSample { thread_count: 50, mutex_ms: 1799, ttas_ms: 11850, best_spin_ms: 1154 },
BenchmarkSample { thread_count: 60, mutex_ms: 1788, ttas_ms: 12648, best_spin_ms: 1073 },
BenchmarkSample { thread_count: 70, mutex_ms: 1796, ttas_ms: 15283, best_spin_ms: 964 },
BenchmarkSample { thread_count: 80, mutex_ms: 1844, ttas_ms: 17596, best_spin_ms: 990 },
BenchmarkSample { thread_count: 90, mutex_ms: 1834, ttas_ms: 17434, best_spin_ms: 1049 },
BenchmarkSample { thread_count: 100, mutex_ms: 1829, ttas_ms: 24327, best_spin_ms: 992 },
BenchmarkSample { thread_count: 110, mutex_ms: 1803, ttas_ms: 21004, best_spin_ms: 1072 },
BenchmarkSample { thread_count: 120, mutex_ms: 1821, ttas_ms: 22977, best_spin_ms: 861 },
BenchmarkSample { thread_count: 130, mutex_ms: 1845, ttas_ms: 27103, best_spin_ms: 920 },
BenchmarkSample { thread_count: 140, mutex_ms: 1819, ttas_ms: 26420, best_spin_ms: 803 },
BenchmarkSample { thread_count: 150, mutex_ms: 1752, ttas_ms: 27041, best_spin_ms: 1028 },
BenchmarkSample { thread_count: 160, mutex_ms: 1849, ttas_ms: 20235, best_spin_ms: 830 },
BenchmarkSample { thread_count: 170, mutex_ms: 1844, ttas_ms: 27156, best_spin_ms: 699 },
BenchmarkSample { thread_count: 180, mutex_ms: 1809, ttas_ms: 31543, best_spin_ms: 953 },
BenchmarkSample { thread_count: 190, mutex_ms: 1767, ttas_ms: 40503, best_spin_ms: 829 },
BenchmarkSample { thread_count: 200, mutex_ms: 1829, ttas_ms: 33453, best_spin_ms: 875 },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf::Columns;

    #[test]
    fn thread_counts_are_one_then_steps_of_ten() {
        let columns = Columns::extract(PERF_DATA_LOCKS);
        let expected: Vec<u64> = std::iter::once(1).chain((10..=200).step_by(10)).collect();

        assert_eq!(columns.thread_count.len(), 21);
        assert_eq!(columns.thread_count, expected);
    }

    #[test]
    fn mutex_column_matches_second_position() {
        let columns = Columns::extract(PERF_DATA_LOCKS);

        assert_eq!(columns.mutex_ms.len(), 21);
        assert_eq!(&columns.mutex_ms[..3], &[50, 1731, 1793]);
        assert_eq!(columns.mutex_ms.last(), Some(&1829));
        assert_eq!(columns.ttas_ms.last(), Some(&33453));
        assert_eq!(columns.best_spin_ms.last(), Some(&875));
    }

    #[test]
    fn thread_counts_increase() {
        assert!(PERF_DATA_LOCKS
            .windows(2)
            .all(|w| w[0].thread_count < w[1].thread_count));
    }
}
