//! Writes a synthetic `spacex_launch_dash.csv` (and a `.parquet` twin) so the
//! dashboard has something to show without the real dataset.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const SITES: [&str; 4] = ["CCAFS LC 40", "CCAFS SLC 40", "KSC LC 39A", "VAFB SLC 4E"];

/// (booster family, first serial, launches, base success probability)
const BOOSTER_ERAS: [(&str, u32, usize, f64); 5] = [
    ("v1.0", 3, 5, 0.0),
    ("v1.1", 1010, 15, 0.35),
    ("FT", 1019, 24, 0.65),
    ("B4", 1039, 11, 0.7),
    ("B5", 1046, 11, 0.9),
];

const MAX_PAYLOAD_KG: f64 = 9600.0;

/// Small deterministic generator (SplitMix64), enough for sample data.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Launch {
    flight: i64,
    site: &'static str,
    class: i64,
    payload_kg: f64,
    booster_version: String,
    category: &'static str,
}

fn generate(rng: &mut SampleRng) -> Vec<Launch> {
    let total: usize = BOOSTER_ERAS.iter().map(|era| era.2).sum();
    let mut launches = Vec::with_capacity(total);
    let mut flight: i64 = 1;

    for (category, first_serial, count, base_success) in BOOSTER_ERAS {
        for i in 0..count {
            // Early flights carried little; later eras push towards the max.
            let era_scale = 0.25 + 0.75 * (flight as f64 / total as f64);
            let payload_kg = (rng.next_f64() * MAX_PAYLOAD_KG * era_scale).round();
            // Heavier payloads leave less margin for the landing.
            let p_success = (base_success - 0.15 * payload_kg / MAX_PAYLOAD_KG).max(0.0);
            let class = i64::from(rng.next_f64() < p_success);

            let serial = first_serial + i as u32 / 2;
            let booster_version = if category == "v1.0" {
                format!("F9 v1.0  B{serial:04}")
            } else {
                format!("F9 {category} B{serial:04}")
            };

            launches.push(Launch {
                flight,
                site: *rng.pick(&SITES),
                class,
                payload_kg,
                booster_version,
                category,
            });
            flight += 1;
        }
    }
    launches
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload_kg),
            l.booster_version.clone(),
            l.category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(
                launches.iter().map(|l| l.payload_kg),
            )),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let launches = generate(&mut rng);

    write_csv("spacex_launch_dash.csv", &launches)?;
    write_parquet("spacex_launch_dash.parquet", &launches)?;

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to spacex_launch_dash.csv and .parquet",
        launches.len()
    );
    Ok(())
}
