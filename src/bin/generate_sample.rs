//! Writes a deterministic sample traffic dataset for demoing the dashboard.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

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
}

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Diurnal congestion profile: morning and evening commute peaks.
fn diurnal_index(hour: f64, base: f64, weekend: bool) -> f64 {
    let damping = if weekend { 0.4 } else { 1.0 };
    base + damping * (gaussian(hour, 8.0, 1.5, 35.0) + gaussian(hour, 17.5, 2.0, 45.0))
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (city, baseline index, typical travel time in minutes)
    let cities = [
        ("Dubai", 42.0, 24.0),
        ("Abu Dhabi", 30.0, 19.0),
        ("Riyadh", 38.0, 22.0),
        ("Doha", 26.0, 16.0),
        ("Kuwait City", 33.0, 18.0),
    ];

    let start = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid start date");
    let days = 14;

    let output_path = "sample_traffic.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "city",
            "datetime",
            "traffic_index_live",
            "traffic_index_week_ago",
            "jams_count",
            "jams_delay",
            "jams_length",
            "travel_time_live",
            "travel_time_historic",
        ])
        .expect("Failed to write header");

    let mut rows = 0usize;
    for day in 0..days {
        let date = start + Duration::days(day);
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        for hour in 0..24u32 {
            for &(city, base, typical) in &cities {
                let datetime = date
                    .and_hms_opt(hour, 0, 0)
                    .expect("valid time of day")
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string();

                let index = (diurnal_index(hour as f64, base, weekend)
                    + rng.gauss(0.0, 4.0))
                .max(0.0);
                let week_ago = (index + rng.gauss(0.0, 6.0)).max(0.0);
                let jams_count = ((index / 12.0) + rng.next_f64() * 3.0) as u32;
                let jams_delay = (index * 0.35 + rng.gauss(0.0, 2.0)).max(0.0);
                let jams_length = (index * 0.08 + rng.gauss(0.0, 0.5)).max(0.0);

                // A sliver of rows report no historic travel time, like the
                // real feed does; the dashboard must not divide by it.
                let historic = if rng.next_f64() < 0.005 { 0.0 } else { typical };
                let live = (typical * (1.0 + index / 150.0) + rng.gauss(0.0, 1.0)).max(1.0);

                writer
                    .write_record([
                        city.to_string(),
                        datetime,
                        format!("{index:.1}"),
                        format!("{week_ago:.1}"),
                        jams_count.to_string(),
                        format!("{jams_delay:.1}"),
                        format!("{jams_length:.2}"),
                        format!("{live:.1}"),
                        format!("{historic:.1}"),
                    ])
                    .expect("Failed to write row");
                rows += 1;
            }
        }
    }

    writer.flush().expect("Failed to flush output");
    println!(
        "Wrote {rows} observations for {} cities over {days} days to {output_path}",
        cities.len()
    );
}
