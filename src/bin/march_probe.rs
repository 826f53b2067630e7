//! Scaling probe for the FLCS engine.
//!
//! Sweeps input sizes for well-matched and unrelated sequence pairs,
//! verifies small instances against a full-table reference, and reports
//! wall time, memory delta, and the fraction of the grid that was actually
//! evaluated.
//!
//! Run with:
//! `cargo run --release --features probe --bin march_probe -- [--max-len N] [--verify-limit N]`

use std::env;
use std::time::Instant;

use flcs::{matchers::ExactMatcher, FlcsEngine};
use sysinfo::{get_current_pid, ProcessExt, ProcessRefreshKind, System, SystemExt};

struct Options {
    max_len: usize,
    verify_limit: usize,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut opts = Options {
            max_len: 8192,
            verify_limit: 1024,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--max-len" => {
                    let v = args.next().ok_or("--max-len needs a value")?;
                    opts.max_len = v.parse().map_err(|_| format!("bad --max-len: {v}"))?;
                }
                "--verify-limit" => {
                    let v = args.next().ok_or("--verify-limit needs a value")?;
                    opts.verify_limit = v.parse().map_err(|_| format!("bad --verify-limit: {v}"))?;
                }
                "--help" | "-h" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                other => return Err(format!("unknown argument: {other}")),
            }
        }
        Ok(opts)
    }

    fn print_help() {
        eprintln!("usage: march_probe [--max-len N] [--verify-limit N]");
        eprintln!("  --max-len N        largest sequence length to probe (default 8192)");
        eprintln!("  --verify-limit N   verify against the full DP up to this length (default 1024)");
    }
}

struct Measurement {
    label: String,
    len: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    work_ratio: f64,
    status: &'static str,
}

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("march_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/2] well-matched pairs (one substitution per ~100 positions)...");
    measurements.extend(run_series(&options, &mut sys, "well_matched", 100));
    eprintln!("[2/2] unrelated pairs...");
    measurements.extend(run_series(&options, &mut sys, "unrelated", 0));

    println!(
        "{:<14} {:>8} {:>10} {:>14} {:>12} {:>12}",
        "series", "len", "wall_s", "rss_delta_kib", "work_ratio", "status"
    );
    for m in &measurements {
        println!(
            "{:<14} {:>8} {:>10.4} {:>14} {:>12.4} {:>12}",
            m.label, m.len, m.wall_s, m.rss_delta_kib, m.work_ratio, m.status
        );
    }
}

/// Deterministic pseudo-random DNA; a tiny xorshift keeps the probe free of
/// extra dependencies.
fn dna(seed: u64, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            ALPHABET[(state % 4) as usize]
        })
        .collect()
}

fn run_series(
    options: &Options,
    sys: &mut System,
    label: &str,
    mutation_rate: usize,
) -> Vec<Measurement> {
    let mut out = Vec::new();
    let mut len = 256usize;
    while len <= options.max_len {
        // unrelated pairs fill the whole grid; keep them small
        if mutation_rate == 0 && len > 2048 {
            break;
        }
        let s = dna(0x51D5 + len as u64, len);
        let t = if mutation_rate == 0 {
            dna(0xA0A0 + len as u64, len)
        } else {
            let mut t = s.clone();
            for i in (0..len).step_by(mutation_rate) {
                t[i] = b'N';
            }
            t
        };

        let before = rss_kib(sys);
        let start = Instant::now();
        let matcher = ExactMatcher::new(&s, &t);
        let (w, h) = matcher.dims();
        let mut engine = FlcsEngine::with_branch_threshold(w, h, matcher, 1.0);
        let result = engine.run();
        let wall_s = start.elapsed().as_secs_f64();
        let rss_delta_kib = rss_kib(sys).saturating_sub(before);

        let status = if len <= options.verify_limit {
            if result.total_match == full_lcs_len(&s, &t) as f32 {
                "passed"
            } else {
                "FAILED"
            }
        } else {
            "not_checked"
        };

        out.push(Measurement {
            label: label.to_string(),
            len,
            wall_s,
            rss_delta_kib,
            work_ratio: engine.num_evals() as f64 / (w as f64 * h as f64),
            status,
        });
        len *= 2;
    }
    out
}

fn full_lcs_len(s: &[u8], t: &[u8]) -> u32 {
    let n = s.len();
    let m = t.len();
    let mut dp = vec![vec![0u32; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            let up = dp[i - 1][j];
            let left = dp[i][j - 1];
            let diag = dp[i - 1][j - 1] + if s[i - 1] == t[j - 1] { 1 } else { 0 };
            dp[i][j] = up.max(left).max(diag);
        }
    }
    dp[n][m]
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(p) = sys.process(get_current_pid().unwrap()) {
        p.memory() // KiB on supported platforms
    } else {
        0
    }
}
