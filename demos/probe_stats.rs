use clap::Parser;
use clap::ValueEnum;
use probe_hash::CaseInsensitive;
use probe_hash::HashTable;
use probe_hash::ScalarTable;
use probe_hash::TableConfig;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Keys {
    /// Sequential `u64` keys in a generic table.
    Sequential,
    /// Random `u64` keys in a scalar table.
    Scalar,
    /// Random mixed-case strings under the case-insensitive strategy.
    Strings,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f32,

    /// Fraction of keys removed after filling, exercising backward-shift
    /// deletion.
    #[arg(short = 'r', long = "remove_fraction", default_value_t = 0.0)]
    remove_fraction: f64,

    #[arg(short = 'k', long = "keys", value_enum, default_value_t = Keys::Sequential)]
    keys: Keys,

    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,
}

fn random_word(rng: &mut SmallRng) -> String {
    let len = rng.random_range(4..16);
    (0..len)
        .map(|_| {
            let c = rng.random_range(b'a'..=b'z') as char;
            if rng.random_bool(0.5) { c.to_ascii_uppercase() } else { c }
        })
        .collect()
}

fn main() -> Result<(), probe_hash::Error> {
    let args = Args::parse();
    let config = TableConfig::new(args.target_capacity, args.load_factor)?;
    let mut rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    println!(
        "Creating {:?} table with target capacity {} and load factor {}",
        args.keys, args.target_capacity, args.load_factor
    );

    match args.keys {
        Keys::Sequential => {
            let mut table: HashTable<u64, ()> = HashTable::with_config(config);
            println!("Actual capacity: {}", table.capacity());
            let count = table.threshold() as u64;
            for key in 0..count {
                table.insert(key, ());
            }
            let doomed = (count as f64 * args.remove_fraction) as u64;
            for key in 0..doomed {
                table.remove(&(key * 7 % count.max(1)));
            }
            report(table.len(), table.capacity());
            table.probe_histogram().print();
            table.debug_stats().print();
        }
        Keys::Scalar => {
            let mut table: ScalarTable<u64, ()> = ScalarTable::with_config(config);
            println!("Actual capacity: {}", table.capacity());
            let mut keys = Vec::new();
            while table.len() < table.threshold() {
                let key = rng.random::<u64>();
                if table.insert(key, ()).is_none() {
                    keys.push(key);
                }
            }
            let doomed = (keys.len() as f64 * args.remove_fraction) as usize;
            for key in keys.iter().take(doomed) {
                table.remove(*key);
            }
            report(table.len(), table.capacity());
            table.probe_histogram().print();
            table.debug_stats().print();
        }
        Keys::Strings => {
            let mut table: HashTable<String, (), CaseInsensitive> =
                HashTable::with_config_and_strategy(config, CaseInsensitive::new());
            println!("Actual capacity: {}", table.capacity());
            let mut keys = Vec::new();
            while table.len() < table.threshold() {
                let word = random_word(&mut rng);
                if table.insert(word.clone(), ()).is_none() {
                    keys.push(word);
                }
            }
            let doomed = (keys.len() as f64 * args.remove_fraction) as usize;
            for key in keys.iter().take(doomed) {
                table.remove(key.to_lowercase().as_str());
            }
            report(table.len(), table.capacity());
            table.probe_histogram().print();
            table.debug_stats().print();
        }
    }

    Ok(())
}

fn report(len: usize, capacity: usize) {
    println!("Table holds {} entries", len);
    println!(
        "Final load factor: {:.2}%",
        (len as f64 / capacity as f64) * 100.0
    );
}
