use ferrite_mlp::{ActivationFunction, DenseLayer, LossType, Matrix, Network, Result, WeightInit};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(7);
    let mut network = Network::new(LossType::Mse);
    network.add_layer(DenseLayer::new(2, 2, ActivationFunction::Tanh, WeightInit::XavierUniform, 0.3, &mut rng)?)?;
    network.add_layer(DenseLayer::new(2, 1, ActivationFunction::Tanh, WeightInit::XavierUniform, 0.3, &mut rng)?)?;

    let inputs = Matrix::from_data(vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ])?;
    let expected_outputs = Matrix::from_data(vec![
        vec![1.0],
        vec![0.0],
        vec![1.0],
        vec![0.0],
    ])?;

    let epochs = 5000;
    let summary = network.train(&inputs, &expected_outputs, &inputs, &expected_outputs, epochs, 4, epochs)?;
    for stats in summary.history.iter().step_by(500) {
        println!("Epoch {}: loss = {:.6}", stats.epoch, stats.train_loss);
    }

    let outputs = network.predict(&inputs)?;
    for i in 0..inputs.rows() {
        println!("Input: {:?} -> Output: {:.4}", inputs.row(i)?, outputs.get(i, 0)?);
    }
    Ok(())
}
