use banksim::application::engine::BankingEngine;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use std::collections::HashSet;

const IDS: [&str; 5] = ["11111111", "22222222", "33333333", "44444444", "1234567"];

fn random_command(rng: &mut StdRng) -> String {
    let id = IDS[rng.gen_range(0..IDS.len())];
    let other = IDS[rng.gen_range(0..IDS.len())];
    let amount = rng.gen_range(-50..3000);
    match rng.gen_range(0..6) {
        0 => {
            let kind = ["checking", "savings", "cd", "Checking"][rng.gen_range(0..4)];
            let apr = format!("{}.{}", rng.gen_range(0..12), rng.gen_range(0..100));
            format!("create {kind} {id} {apr} {}", rng.gen_range(500..12000))
        }
        1 => format!("create checking {id} {}", rng.gen_range(0..11)),
        2 => format!("deposit {id} {amount}"),
        3 => format!("withdraw {id} {amount}"),
        4 => format!("transfer {id} {other} {amount}"),
        _ => format!("pass {}", rng.gen_range(0..70)),
    }
}

#[test]
fn test_random_command_streams_keep_invariants() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let commands: Vec<String> = (0..rng.gen_range(1..60))
            .map(|_| random_command(&mut rng))
            .collect();

        let mut engine = BankingEngine::new();
        let report = engine.run(&commands);

        let mut seen = HashSet::new();
        for account in &report.accounts {
            assert!(account.balance >= Decimal::ZERO, "seed {seed}: {}", account.state);
            assert!(account.apr >= Decimal::ZERO && account.apr <= Decimal::TEN);
            assert_eq!(account.id.len(), 8, "seed {seed}");
            assert!(seen.insert(account.id.clone()), "seed {seed}: duplicate {}", account.id);
            for line in &account.transactions {
                assert!(commands.contains(line), "seed {seed}: unknown entry {line}");
            }
        }

        for rejected in &report.invalid_commands {
            assert!(commands.contains(rejected));
        }
        assert!(report.invalid_commands.len() <= commands.len());
    }
}

#[test]
fn test_rejected_commands_change_nothing() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut engine = BankingEngine::new();
    engine.run(["create savings 11111111 2.0", "deposit 11111111 900"]);

    for _ in 0..500 {
        let command = random_command(&mut rng);
        let before = engine.report();
        if engine.process_command(&command).is_err() {
            assert_eq!(engine.report(), before, "{command}");
        }
    }
}
