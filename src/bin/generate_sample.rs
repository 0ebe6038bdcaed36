use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

/// Write a synthetic insurance.csv for trying the dashboard.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", version, about)]
struct Args {
    /// Output CSV path
    #[arg(long, default_value = "insurance.csv")]
    output: PathBuf,

    /// Number of records
    #[arg(long, default_value_t = 1338)]
    rows: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Serialize)]
struct Row {
    age: u32,
    sex: &'static str,
    bmi: f64,
    children: u32,
    smoker: &'static str,
    region: &'static str,
    charges: f64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate_row(rng: &mut SimpleRng) -> Row {
    const REGIONS: [&str; 4] = ["northeast", "northwest", "southeast", "southwest"];

    let age = 18 + (rng.next_u64() % 47) as u32;
    let sex = *rng.pick(&["female", "male"]);
    let region = *rng.pick(&REGIONS);
    // Southeast runs heavier, as in the public dataset.
    let bmi_mean = if region == "southeast" { 33.0 } else { 29.5 };
    let bmi = rng.gauss(bmi_mean, 6.0).clamp(16.0, 53.0);
    let children: u32 = *rng.pick(&[0, 0, 0, 1, 1, 2, 2, 3, 4, 5]);
    let smoker = if rng.next_f64() < 0.2 { "yes" } else { "no" };

    let mut charges = 260.0 * age as f64 + 480.0 * children as f64 - 2000.0;
    if smoker == "yes" {
        charges += 23_000.0;
        if bmi >= 30.0 {
            charges += 19_000.0;
        }
    }
    charges += rng.gauss(0.0, 2500.0);

    Row {
        age,
        sex,
        bmi: (bmi * 100.0).round() / 100.0,
        children,
        smoker,
        region,
        charges: charges.max(1100.0),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for _ in 0..args.rows {
        writer.serialize(generate_row(&mut rng))?;
    }
    writer.flush()?;

    println!("Wrote {} records to {}", args.rows, args.output.display());
    Ok(())
}
