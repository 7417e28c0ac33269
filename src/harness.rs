//! The comparative benchmark harness.
//!
//! Each named benchmark drives one parameterised workload against every set
//! variant over a sweep of operation counts, and writes one CSV file:
//! the first column is `op_count`, the remaining columns are one per
//! `(variant, fold)` pair in a fixed order, rows ascend by operation count,
//! and every value is a wall-clock timing in milliseconds with three decimal
//! places.  Benchmarks run on their own threads; set instances are never
//! shared between threads.
//!
//! The harness talks to the sets exclusively through [`OrderedSet`], so it
//! exercises exactly the surface any client sees.
//!
//! # Examples
//!
//! ```no_run
//! use ordset::harness::{Harness, Range};
//!
//! let harness = Harness::new();
//! let range = Range::new(1_000, 50_000, 8).log_scale().folds(3);
//! harness.run("bench-results".as_ref(), &range).unwrap();
//! ```

use std::{
    fmt::Write as _,
    fs,
    hint::black_box,
    io,
    path::Path,
    sync::Mutex,
    thread,
    time::Instant,
};

use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{Kind, OrderedSet};

// ////////////////////////////////////////////////////////////////////////////
// Range
// ////////////////////////////////////////////////////////////////////////////

/// The sweep of operation counts a benchmark is run over.
#[derive(Clone, Debug)]
pub struct Range {
    begin: u64,
    end: u64,
    step: u64,
    log_scale: bool,
    folds: u64,
}

impl Range {
    /// A linear sweep from `begin` to `end` inclusive, advancing by `step`,
    /// with five folds per point.
    pub fn new(begin: u64, end: u64, step: u64) -> Self {
        Range {
            begin: begin.max(1),
            end: end.max(begin),
            step: step.max(1),
            log_scale: false,
            folds: 5,
        }
    }

    /// Space the points geometrically instead; `step` is reinterpreted as
    /// the number of samples between `begin` and `end`.
    #[must_use]
    pub fn log_scale(mut self) -> Self {
        self.log_scale = true;
        self
    }

    /// The number of repetitions recorded per point.
    #[must_use]
    pub fn folds(mut self, folds: u64) -> Self {
        self.folds = folds.max(1);
        self
    }

    /// The ascending operation counts of the sweep.
    pub fn points(&self) -> Vec<u64> {
        if !self.log_scale {
            return (self.begin..=self.end).step_by(self.step as usize).collect();
        }
        let mut points = Vec::new();
        let samples = self.step.max(2);
        let ratio = (self.end as f64 / self.begin as f64).powf(1.0 / (samples - 1) as f64);
        let mut approx = self.begin as f64;
        let mut prev = 0;
        for _ in 1..samples {
            let cur = approx.floor() as u64;
            approx *= ratio;
            if cur == prev {
                continue;
            }
            points.push(cur);
            prev = cur;
        }
        if prev != self.end {
            points.push(self.end);
        }
        points
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Harness
// ////////////////////////////////////////////////////////////////////////////

/// A benchmark: drives `op_count` operations of its workload against a
/// freshly built set of the given kind and returns the measured portion's
/// wall-clock time in milliseconds.
pub type BenchFn = fn(Kind, &mut SmallRng, u64) -> f64;

/// The registry of named benchmarks.
pub struct Harness {
    benches: Vec<(&'static str, BenchFn)>,
    kinds: Vec<Kind>,
}

impl Harness {
    /// A harness with the full workload catalogue and every variant.
    pub fn new() -> Self {
        Harness {
            benches: vec![
                ("increasing_int_insert", increasing_int_insert as BenchFn),
                ("decreasing_int_insert", decreasing_int_insert),
                ("converging_int_insert", converging_int_insert),
                ("diverging_int_insert", diverging_int_insert),
                ("random_sparse_int_insert", random_sparse_int_insert),
                ("random_dense_int_insert", random_dense_int_insert),
                ("random_sparse_string_insert", random_sparse_string_insert),
                ("random_dense_string_insert", random_dense_string_insert),
                (
                    "increasing_int_erase_after_increasing_insert",
                    increasing_int_erase_after_increasing_insert,
                ),
                (
                    "decreasing_int_erase_after_increasing_insert",
                    decreasing_int_erase_after_increasing_insert,
                ),
                (
                    "converging_int_erase_after_increasing_insert",
                    converging_int_erase_after_increasing_insert,
                ),
                (
                    "diverging_int_erase_after_increasing_insert",
                    diverging_int_erase_after_increasing_insert,
                ),
                (
                    "nonexistent_int_erase_after_increasing_insert",
                    nonexistent_int_erase_after_increasing_insert,
                ),
                (
                    "random_int_erase_after_increasing_insert",
                    random_int_erase_after_increasing_insert,
                ),
                (
                    "increasing_int_erase_after_random_insert",
                    increasing_int_erase_after_random_insert,
                ),
                (
                    "decreasing_int_erase_after_random_insert",
                    decreasing_int_erase_after_random_insert,
                ),
                (
                    "converging_int_erase_after_random_insert",
                    converging_int_erase_after_random_insert,
                ),
                (
                    "diverging_int_erase_after_random_insert",
                    diverging_int_erase_after_random_insert,
                ),
                (
                    "nonexistent_int_erase_after_random_insert",
                    nonexistent_int_erase_after_random_insert,
                ),
                (
                    "random_int_erase_after_random_insert",
                    random_int_erase_after_random_insert,
                ),
                (
                    "random_string_erase_after_random_insert",
                    random_string_erase_after_random_insert,
                ),
                (
                    "nonexistent_string_erase_after_random_insert",
                    nonexistent_string_erase_after_random_insert,
                ),
                ("alternating_insert_erase", alternating_insert_erase),
                ("find_present_after_random_insert", find_present_after_random_insert),
                ("find_random_after_random_insert", find_random_after_random_insert),
                (
                    "lower_bound_random_after_random_insert",
                    lower_bound_random_after_random_insert,
                ),
            ],
            kinds: Kind::ALL.to_vec(),
        }
    }

    /// The registered benchmark names, in the order they run.
    pub fn benchmarks(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.benches.iter().map(|(name, _)| *name)
    }

    /// Run every benchmark, one thread each, writing one CSV per benchmark
    /// into `dir`.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures from creating `dir` or writing the CSV
    /// files; reports a benchmark thread panic as an I/O error.
    pub fn run(&self, dir: &Path, range: &Range) -> io::Result<()> {
        self.run_matching(dir, range, |_| true)
    }

    /// Run the benchmarks whose names satisfy `filter`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Harness::run`].
    pub fn run_matching(
        &self,
        dir: &Path,
        range: &Range,
        filter: impl Fn(&str) -> bool,
    ) -> io::Result<()> {
        fs::create_dir_all(dir)?;
        let stdout = Mutex::new(());
        thread::scope(|scope| {
            let mut handles = Vec::new();
            for &(name, func) in self.benches.iter().filter(|entry| filter(entry.0)) {
                let kinds = &self.kinds;
                let stdout = &stdout;
                handles.push(scope.spawn(move || -> io::Result<()> {
                    if let Ok(_guard) = stdout.lock() {
                        println!("running {name}");
                    }
                    let started = Instant::now();
                    let table = render_csv(func, kinds, range);
                    fs::write(dir.join(format!("{name}.csv")), table)?;
                    let elapsed = started.elapsed().as_secs_f64() * 1e3;
                    if let Ok(_guard) = stdout.lock() {
                        println!("{name}: ok, {elapsed:.3} ms");
                    }
                    Ok(())
                }));
            }
            for handle in handles {
                match handle.join() {
                    Ok(result) => result?,
                    Err(_) => {
                        return Err(io::Error::new(
                            io::ErrorKind::Other,
                            "benchmark thread panicked",
                        ));
                    }
                }
            }
            Ok(())
        })
    }
}

impl Default for Harness {
    fn default() -> Self {
        Harness::new()
    }
}

/// One benchmark's full CSV table, header plus one row per op count.
fn render_csv(func: BenchFn, kinds: &[Kind], range: &Range) -> String {
    let mut rng = SmallRng::from_entropy();
    let mut out = String::from("op_count");
    for kind in kinds {
        for fold in 0..range.folds {
            let _ = write!(out, ",{}_fold_{}", kind.name(), fold);
        }
    }
    for op_count in range.points() {
        let _ = write!(out, "\n{op_count}");
        for &kind in kinds {
            for _ in 0..range.folds {
                let millis = func(kind, &mut rng, op_count);
                let _ = write!(out, ",{millis:.3}");
            }
        }
    }
    out.push('\n');
    out
}

fn timed(work: impl FnOnce()) -> f64 {
    let started = Instant::now();
    work();
    started.elapsed().as_secs_f64() * 1e3
}

// ///////////////////////////////////////////////
// Workloads
// ///////////////////////////////////////////////

/// Filler for the string workloads, standing in for natural-language data.
const STRING_STEM: &str =
    "the quick brown fox jumps over the lazy dog while the band plays on and the crowd hums along ";

fn random_strings(rng: &mut SmallRng, op_count: u64, dense: bool) -> Vec<String> {
    let bound = if dense {
        (op_count / 5).max(1) as i64
    } else {
        i64::from(i32::MAX)
    };
    (0..op_count)
        .map(|_| format!("{STRING_STEM}{}", rng.gen_range(0..=bound)))
        .collect()
}

fn increasing_int_insert(kind: Kind, _rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    timed(|| {
        for i in 0..op_count {
            set.insert(i as i32);
        }
    })
}

fn decreasing_int_insert(kind: Kind, _rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    timed(|| {
        for i in 0..op_count {
            set.insert(-(i as i32));
        }
    })
}

fn converging_int_insert(kind: Kind, _rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    timed(|| {
        for i in 0..op_count / 2 {
            set.insert(i as i32);
            set.insert((op_count - i - 1) as i32);
        }
    })
}

fn diverging_int_insert(kind: Kind, _rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    timed(|| {
        for i in op_count / 2..op_count {
            set.insert(i as i32);
            set.insert((op_count - i - 1) as i32);
        }
    })
}

fn random_sparse_int_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let values: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    timed(|| {
        for value in values {
            set.insert(value);
        }
    })
}

fn random_dense_int_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let bound = (op_count / 5).max(1) as i32;
    let values: Vec<i32> = (0..op_count).map(|_| rng.gen_range(0..=bound)).collect();
    timed(|| {
        for value in values {
            set.insert(value);
        }
    })
}

fn random_sparse_string_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let values = random_strings(rng, op_count, false);
    timed(|| {
        for value in values {
            set.insert(value);
        }
    })
}

fn random_dense_string_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let values = random_strings(rng, op_count, true);
    timed(|| {
        for value in values {
            set.insert(value);
        }
    })
}

fn increasing_int_erase_after_increasing_insert(
    kind: Kind,
    _rng: &mut SmallRng,
    op_count: u64,
) -> f64 {
    let mut set = OrderedSet::new(kind);
    for i in 0..op_count {
        set.insert(i as i32);
    }
    timed(|| {
        for i in 0..op_count {
            set.remove(&(i as i32));
        }
    })
}

fn decreasing_int_erase_after_increasing_insert(
    kind: Kind,
    _rng: &mut SmallRng,
    op_count: u64,
) -> f64 {
    let mut set = OrderedSet::new(kind);
    for i in 0..op_count {
        set.insert(i as i32);
    }
    timed(|| {
        for i in (0..op_count).rev() {
            set.remove(&(i as i32));
        }
    })
}

fn converging_int_erase_after_increasing_insert(
    kind: Kind,
    _rng: &mut SmallRng,
    op_count: u64,
) -> f64 {
    let mut set = OrderedSet::new(kind);
    for i in 0..op_count {
        set.insert(i as i32);
    }
    timed(|| {
        for i in 0..op_count / 2 {
            set.remove(&(i as i32));
            set.remove(&((op_count - i - 1) as i32));
        }
    })
}

fn diverging_int_erase_after_increasing_insert(
    kind: Kind,
    _rng: &mut SmallRng,
    op_count: u64,
) -> f64 {
    let mut set = OrderedSet::new(kind);
    for i in 0..op_count {
        set.insert(i as i32);
    }
    timed(|| {
        for i in op_count / 2..op_count {
            set.remove(&(i as i32));
            set.remove(&((op_count - i - 1) as i32));
        }
    })
}

fn nonexistent_int_erase_after_increasing_insert(
    kind: Kind,
    _rng: &mut SmallRng,
    op_count: u64,
) -> f64 {
    let mut set = OrderedSet::new(kind);
    // Evens are present; the erase stream asks only for odds.
    for i in 0..op_count {
        set.insert((i * 2) as i32);
    }
    timed(|| {
        for i in 0..op_count {
            set.remove(&((i * 2 + 1) as i32));
        }
    })
}

fn random_int_erase_after_increasing_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let mut values: Vec<i32> = (0..op_count).map(|i| i as i32).collect();
    for &value in &values {
        set.insert(value);
    }
    values.shuffle(rng);
    timed(|| {
        for value in values {
            set.remove(&value);
        }
    })
}

fn increasing_int_erase_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let mut values: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    for &value in &values {
        set.insert(value);
    }
    values.sort_unstable();
    timed(|| {
        for value in values {
            set.remove(&value);
        }
    })
}

fn decreasing_int_erase_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let mut values: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    for &value in &values {
        set.insert(value);
    }
    values.sort_unstable_by(|a, b| b.cmp(a));
    timed(|| {
        for value in values {
            set.remove(&value);
        }
    })
}

fn converging_int_erase_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let mut values: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    for &value in &values {
        set.insert(value);
    }
    values.sort_unstable();
    timed(|| {
        for i in 0..op_count as usize / 2 {
            set.remove(&values[i]);
            set.remove(&values[op_count as usize - i - 1]);
        }
    })
}

fn diverging_int_erase_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let mut values: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    for &value in &values {
        set.insert(value);
    }
    values.sort_unstable();
    timed(|| {
        for i in op_count as usize / 2..op_count as usize {
            set.remove(&values[i]);
            set.remove(&values[op_count as usize - i - 1]);
        }
    })
}

fn nonexistent_int_erase_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    for _ in 0..op_count {
        set.insert(rng.gen::<i32>());
    }
    let probes: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    timed(|| {
        for probe in probes {
            set.remove(&probe);
        }
    })
}

fn random_int_erase_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let mut values: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    for &value in &values {
        set.insert(value);
    }
    values.shuffle(rng);
    timed(|| {
        for value in values {
            set.remove(&value);
        }
    })
}

fn random_string_erase_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let mut values = random_strings(rng, op_count, false);
    for value in &values {
        set.insert(value.clone());
    }
    values.shuffle(rng);
    timed(|| {
        for value in values {
            set.remove(&value);
        }
    })
}

fn nonexistent_string_erase_after_random_insert(
    kind: Kind,
    rng: &mut SmallRng,
    op_count: u64,
) -> f64 {
    let mut set = OrderedSet::new(kind);
    for value in random_strings(rng, op_count, false) {
        set.insert(value);
    }
    // Inserted strings end in digits; a "miss" token keeps every probe out
    // of the set.
    let probes: Vec<String> = (0..op_count)
        .map(|_| format!("{STRING_STEM}miss {}", rng.gen_range(0..=i64::from(i32::MAX))))
        .collect();
    timed(|| {
        for probe in probes {
            set.remove(&probe);
        }
    })
}

/// Bursts of inserts and erases in a narrow key range, ending roughly empty.
fn alternating_insert_erase(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    if op_count < 10 {
        return 0.0;
    }
    let step = op_count / 10;
    let bound = (3 * step) as i32;
    let mut set = OrderedSet::new(kind);
    let draw = |rng: &mut SmallRng| rng.gen_range(0..=bound);
    let inserts: Vec<i32> = (0..step * 5).map(|_| draw(rng)).collect();
    let erases: Vec<i32> = (0..step * 5).map(|_| draw(rng)).collect();
    timed(|| {
        let mut ins = inserts.into_iter();
        let mut del = erases.into_iter();
        for _ in 0..step * 2 {
            set.insert(ins.next().unwrap_or_default());
        }
        for _ in 0..step {
            set.remove(&del.next().unwrap_or_default());
        }
        for _ in 0..step * 2 {
            set.insert(ins.next().unwrap_or_default());
        }
        for _ in 0..step * 2 {
            set.remove(&del.next().unwrap_or_default());
        }
        for _ in 0..step {
            set.insert(ins.next().unwrap_or_default());
        }
        for _ in 0..step * 2 {
            set.remove(&del.next().unwrap_or_default());
        }
    })
}

fn find_present_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    let mut values: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    for &value in &values {
        set.insert(value);
    }
    values.shuffle(rng);
    timed(|| {
        for value in values {
            let cursor = set.find(&value);
            black_box(cursor.value().ok());
        }
    })
}

fn find_random_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    for _ in 0..op_count {
        set.insert(rng.gen::<i32>());
    }
    let probes: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    timed(|| {
        for probe in probes {
            let cursor = set.find(&probe);
            black_box(cursor.value().ok());
        }
    })
}

fn lower_bound_random_after_random_insert(kind: Kind, rng: &mut SmallRng, op_count: u64) -> f64 {
    let mut set = OrderedSet::new(kind);
    for _ in 0..op_count {
        set.insert(rng.gen::<i32>());
    }
    let probes: Vec<i32> = (0..op_count).map(|_| rng.gen()).collect();
    timed(|| {
        for probe in probes {
            let cursor = set.lower_bound(&probe);
            black_box(cursor.value().ok());
        }
    })
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;

    use super::{render_csv, Harness, Range};
    use crate::Kind;

    #[test]
    fn linear_points() {
        let range = Range::new(10, 50, 10);
        assert_eq!(range.points(), vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn log_points_ascend_and_end_at_the_limit() {
        let range = Range::new(10, 10_000, 7).log_scale();
        let points = range.points();
        assert!(points.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(points.first(), Some(&10));
        assert_eq!(points.last(), Some(&10_000));
    }

    #[test]
    fn csv_shape() {
        let range = Range::new(10, 30, 10).folds(2);
        let table = render_csv(super::increasing_int_insert, &Kind::ALL, &range);
        let mut lines = table.lines();

        let header = lines.next().expect("header row");
        let columns: Vec<_> = header.split(',').collect();
        assert_eq!(columns.len(), 1 + Kind::ALL.len() * 2);
        assert_eq!(columns[0], "op_count");
        assert_eq!(columns[1], "avl_tree_fold_0");
        assert_eq!(columns[2], "avl_tree_fold_1");
        assert_eq!(columns.last(), Some(&"std_set_fold_1"));

        let rows: Vec<_> = lines.collect();
        assert_eq!(rows.len(), 3);
        for (row, expected_count) in rows.iter().zip([10, 20, 30]) {
            let mut fields = row.split(',');
            assert_eq!(fields.next(), Some(expected_count.to_string().as_str()));
            for field in fields {
                let value: f64 = field.parse().expect("timing parses as a float");
                assert!(value >= 0.0);
                let decimals = field.split('.').nth(1).expect("three decimal places");
                assert_eq!(decimals.len(), 3);
            }
        }
    }

    #[test]
    fn runs_a_filtered_sweep_to_disk() -> Result<()> {
        let dir = std::env::temp_dir().join("ordset-harness-test");
        let _ = fs::remove_dir_all(&dir);

        let harness = Harness::new();
        let range = Range::new(8, 16, 8).folds(1);
        harness.run_matching(&dir, &range, |name| name == "alternating_insert_erase")?;

        let table = fs::read_to_string(dir.join("alternating_insert_erase.csv"))?;
        assert!(table.starts_with("op_count,"));
        assert_eq!(table.lines().count(), 3);

        fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn catalogue_is_nonempty_and_unique() {
        let harness = Harness::new();
        let names: Vec<_> = harness.benchmarks().collect();
        assert!(names.len() >= 20);
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }
}
