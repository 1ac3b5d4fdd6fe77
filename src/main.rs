use std::time::{Duration, Instant};

use threshold_bls::{
    aggregate, public_key_shares, sign_partial, split, verify, verify_partial, SecretKey,
    SigningConfig, ThresholdConfig, ThresholdResult,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_REPS: usize = 10;

#[derive(Default, Clone, Debug)]
struct Timings {
    total: Duration,
    keygen: Duration,
    split: Duration,
    partial_sign: Duration,
    partial_verify: Duration,
    aggregate: Duration,
    verify: Duration,
}

impl Timings {
    fn add(&mut self, other: &Timings) {
        self.total += other.total;
        self.keygen += other.keygen;
        self.split += other.split;
        self.partial_sign += other.partial_sign;
        self.partial_verify += other.partial_verify;
        self.aggregate += other.aggregate;
        self.verify += other.verify;
    }

    fn avg(&self, n: usize) -> Timings {
        let avg = |d: Duration| if n == 0 { d } else { d / n as u32 };
        Timings {
            total: avg(self.total),
            keygen: avg(self.keygen),
            split: avg(self.split),
            partial_sign: avg(self.partial_sign),
            partial_verify: avg(self.partial_verify),
            aggregate: avg(self.aggregate),
            verify: avg(self.verify),
        }
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

fn run_once(config: &ThresholdConfig, signing: &SigningConfig) -> ThresholdResult<(Timings, bool)> {
    let total_start = Instant::now();
    let mut tm = Timings::default();
    let msg = b"hello threshold bls";

    let t = Instant::now();
    let sk = SecretKey::generate()?;
    let pk = sk.public_key();
    tm.keygen = t.elapsed();

    let t = Instant::now();
    let shares = split(&sk, config.shares(), config.threshold())?;
    let pk_shares = public_key_shares(&shares);
    tm.split = t.elapsed();

    // the last t holders sign, so interpolation never sees a contiguous prefix
    let signers = &shares[config.shares() - config.threshold()..];

    let t = Instant::now();
    let partials = signers
        .iter()
        .map(|share| sign_partial(share, msg, signing.dst()))
        .collect::<ThresholdResult<Vec<_>>>()?;
    tm.partial_sign = t.elapsed();

    let t = Instant::now();
    let offset = config.shares() - config.threshold();
    let ok_partials = partials
        .iter()
        .enumerate()
        .all(|(i, p)| verify_partial(&pk_shares[offset + i], msg, p, signing.dst()));
    tm.partial_verify = t.elapsed();

    let t = Instant::now();
    let sig = aggregate(&partials)?;
    tm.aggregate = t.elapsed();

    let t = Instant::now();
    let ok_sig = verify(&pk, msg, &sig, signing.dst());
    tm.verify = t.elapsed();

    tm.total = total_start.elapsed();
    Ok((tm, ok_partials && ok_sig))
}

fn run_exp(config: ThresholdConfig, reps: usize) -> ThresholdResult<()> {
    let mut sum = Timings::default();
    let mut ok = true;
    let signing = SigningConfig::default();

    for _ in 0..reps {
        let (tm, good) = run_once(&config, &signing)?;
        ok &= good;
        sum.add(&tm);
    }
    if !ok {
        warn!(n = config.shares(), t = config.threshold(), "signature failed verification");
    }

    let avg = sum.avg(reps);
    println!(
        "RESULT,n={},t={},reps={},ok={},total_ms={:.3},keygen_ms={:.3},split_ms={:.3},partial_sign_ms={:.3},partial_verify_ms={:.3},aggregate_ms={:.3},verify_ms={:.3}",
        config.shares(),
        config.threshold(),
        reps,
        ok,
        ms(avg.total),
        ms(avg.keygen),
        ms(avg.split),
        ms(avg.partial_sign),
        ms(avg.partial_verify),
        ms(avg.aggregate),
        ms(avg.verify),
    );
    Ok(())
}

fn main() -> ThresholdResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let reps = std::env::var("BENCH_REPS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REPS);
    info!(reps, "starting threshold bls sweep");

    for n in [4, 8, 16, 32] {
        run_exp(ThresholdConfig::new(n / 2, n)?, reps)?;
    }

    let n = 16;
    for t in [2, 4, 8, 16] {
        run_exp(ThresholdConfig::new(t, n)?, reps)?;
    }
    Ok(())
}
