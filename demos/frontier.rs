/// Frontier dataset walkthrough for substrate-nn.
///
/// Architecture: 10 → 25 (ReLU + scar) → 20 (ReLU + scar) → 3 (Softmax)
/// Learning rate: 0.1 · (1 + 3·scar) / (1 + 0.01·epoch), hidden layers ×(1 + 8·scar)
/// Epochs:       100, plateau check every 15
///
/// Run with:
///   cargo run --example frontier --release
use rand::rngs::StdRng;
use rand::SeedableRng;

use substrate_nn::{
    generate_frontier_dataset,
    telemetry,
    train_loop,
    DatasetConfig,
    NetworkSpec,
    SubstrateNetwork,
    TrainConfig,
};

fn main() {
    telemetry::init_tracing();

    let (inputs, targets) = generate_frontier_dataset(&DatasetConfig::default());

    let spec = NetworkSpec::new(10, vec![25, 20], 3);
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let mut network = SubstrateNetwork::new(&spec, &mut rng);

    let report = train_loop(&mut network, &inputs, &targets, &TrainConfig::default(), &mut rng);

    for stats in report.epochs.iter().filter(|s| s.epoch % 10 == 0 || s.boosted) {
        println!(
            "Epoch {:>3}: accuracy = {:.4}  loss = {:.4}  lr = {:.5}  scar = {:+.4}{}",
            stats.epoch,
            stats.accuracy,
            stats.loss,
            stats.learning_rate,
            stats.scar_activity,
            if stats.boosted { "  [boost]" } else { "" },
        );
    }

    let metrics = network.metrics();
    println!("Final accuracy:       {:.4}", report.final_accuracy().unwrap_or(0.0));
    println!("Scar steps recorded:  {}", metrics.scar_memory_length);
    println!("Mean scar activity:   {:.6}", metrics.average_scar_activity);
    println!("Substrate coherence:  {:.6}", metrics.substrate_coherence);
    println!("Capacity preserved:   {:.6}", metrics.generative_capacity_preserved);
}
