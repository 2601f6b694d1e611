use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use typed_bloom_rs::{
    Deferred, DeriverConfig, IndexDeriver, ProbeFilter, Sha256Gateway,
    TinyBitmap, TinyIndex, hash::ID_LEN, tiny_from_id,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Integers recorded in the tiny filter
    #[arg(short, long, num_args = 1.., default_values_t = [3776i64, 599])]
    record: Vec<i64>,

    /// Integer tested against the filter without being recorded
    #[arg(short, long, default_value = "42")]
    probe: i64,

    /// Short text to hash
    #[arg(short, long, default_value = "helo")]
    text: String,

    /// High 64 bits of the identifier (decimal or 0x-prefixed hex)
    #[arg(long, default_value = "0xcafef00ddeadbeaf", value_parser = parse_u64)]
    id_high: u64,

    /// Low 64 bits of the identifier
    #[arg(long, default_value = "0xface864299792458", value_parser = parse_u64)]
    id_low: u64,
}

fn parse_u64(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid u64 '{s}': {e}"))
}

fn print_probes(name: &str, index: TinyIndex) {
    for (i, probe) in index.probes().iter().enumerate() {
        println!("{name} hash {i}: {probe}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = DeriverConfig::from_env()?;
    info!(?config, "deriver configuration loaded");
    let deriver = IndexDeriver::new(Arc::new(Sha256Gateway), config)?;

    let mut id = [0u8; ID_LEN];
    id[..8].copy_from_slice(&cli.id_high.to_be_bytes());
    id[8..].copy_from_slice(&cli.id_low.to_be_bytes());
    print_probes("uuid", tiny_from_id(&id)?);

    let (yes, no) = deriver
        .tiny_from_bool(true)
        .join(deriver.tiny_from_bool(false))
        .run()
        .await?;
    print_probes("true", yes);
    print_probes("false", no);
    print_probes("null", deriver.tiny_from_null().run().await?);

    for value in [42i64, 634] {
        let index = deriver.tiny_from_int(value).run().await?;
        print_probes(&value.to_string(), index);
    }

    let mut scratch = deriver.scratch();
    let text_index = deriver.tiny_from_text(&cli.text, &mut scratch).run().await?;
    print_probes(&cli.text, text_index);

    let tasks: Vec<_> = cli
        .record
        .iter()
        .map(|&value| deriver.tiny_from_int(value))
        .collect();
    let recorded = Deferred::join_all(tasks).run().await?;

    let bitmap = TinyBitmap::EMPTY.update_all(recorded.iter().copied());
    info!(bits = bitmap.count_ones(), "tiny bitmap built");
    println!("bloom data: {}", bitmap.value());

    for (value, index) in cli.record.iter().zip(&recorded) {
        println!("{value}: {}", bitmap.test(*index));
    }

    let probe = deriver.tiny_from_int(cli.probe).run().await?;
    println!("{}: {}", cli.probe, bitmap.test(probe));

    Ok(())
}
