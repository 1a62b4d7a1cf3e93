use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::activation::activation::ActivationFunction;
use crate::error::Result;
use crate::init::weight_init::WeightInit;
use crate::layers::dense::DenseLayer;
use crate::loss::loss_type::LossType;
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;

/// Describes one dense layer in a network specification.
///
/// Fields:
/// - `in_dim`        — inputs per sample (the previous layer's `out_dim`, or the
///                     raw feature count for the first layer)
/// - `out_dim`       — neurons in this layer
/// - `activation`    — nonlinearity applied after the affine transform
/// - `weight_init`   — strategy for the initial weight matrix
/// - `learning_rate` — step size used by this layer's gradient descent updates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub in_dim: usize,
    pub out_dim: usize,
    pub activation: ActivationFunction,
    pub weight_init: WeightInit,
    pub learning_rate: f64,
}

/// Training hyper-parameters that can live next to the architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSpec {
    pub epochs: usize,
    pub batch_size: usize,
    pub patience: usize,
}

impl Default for TrainingSpec {
    fn default() -> Self {
        TrainingSpec {
            epochs: 10,
            batch_size: 48,
            patience: 5,
        }
    }
}

impl TrainingSpec {
    pub fn to_config(&self) -> TrainConfig {
        TrainConfig::new(self.epochs, self.batch_size, self.patience)
    }
}

/// A serializable description of a network architecture, its loss and its
/// training hyper-parameters. Trained weights are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name, used only for reporting.
    pub name: String,
    /// Loss function the network trains against.
    pub loss: LossType,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
    /// Seed for weight initialisation; `None` draws one from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub training: TrainingSpec,
}

impl NetworkSpec {
    /// Instantiates the described network with freshly initialised weights.
    pub fn build(&self) -> Result<Network> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut network = Network::new(self.loss);
        for layer in &self.layers {
            network.add_layer(DenseLayer::new(
                layer.in_dim,
                layer.out_dim,
                layer.activation,
                layer.weight_init,
                layer.learning_rate,
                &mut rng,
            )?)?;
        }
        Ok(network)
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const XOR_SPEC: &str = r#"{
        "name": "xor",
        "loss": "mean_squared_error",
        "seed": 11,
        "layers": [
            { "in_dim": 2, "out_dim": 2, "activation": "tanh", "weight_init": "xavier_uniform", "learning_rate": 0.1 },
            { "in_dim": 2, "out_dim": 1, "activation": "tanh",
              "weight_init": { "random_uniform": { "min": -0.5, "max": 0.5 } }, "learning_rate": 0.1 }
        ],
        "training": { "epochs": 200 }
    }"#;

    #[test]
    fn parses_names_aliases_and_defaults() {
        let spec: NetworkSpec = serde_json::from_str(XOR_SPEC).unwrap();
        assert_eq!(spec.loss, LossType::Mse);
        assert_eq!(spec.layers[0].activation, ActivationFunction::Tanh);
        assert_eq!(spec.layers[0].weight_init, WeightInit::XavierUniform);
        assert_eq!(
            spec.layers[1].weight_init,
            WeightInit::RandomUniform { min: -0.5, max: 0.5 }
        );
        assert_eq!(spec.training.epochs, 200);
        assert_eq!(spec.training.batch_size, 48);
        assert_eq!(spec.training.patience, 5);
    }

    #[test]
    fn build_is_reproducible_with_a_seed() {
        let spec: NetworkSpec = serde_json::from_str(XOR_SPEC).unwrap();
        let a = spec.build().unwrap();
        let b = spec.build().unwrap();
        assert_eq!(a.len(), 2);
        let x = crate::Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).unwrap();
        assert_eq!(a.predict(&x).unwrap(), b.predict(&x).unwrap());
    }

    #[test]
    fn build_rejects_non_adjacent_layers() {
        let mut spec: NetworkSpec = serde_json::from_str(XOR_SPEC).unwrap();
        spec.layers[1].in_dim = 3;
        assert!(matches!(spec.build(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn bare_random_uniform_name_uses_the_default_range() {
        let json = XOR_SPEC.replacen("\"xavier_uniform\"", "\"random_uniform\"", 1);
        let spec: NetworkSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec.layers[0].weight_init, WeightInit::random_uniform());
    }

    #[test]
    fn save_then_load_gives_the_same_spec() {
        let spec: NetworkSpec = serde_json::from_str(XOR_SPEC).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("xor.json");
        let path = path.to_str().unwrap();
        spec.save_json(path).unwrap();
        assert_eq!(NetworkSpec::load_json(path).unwrap(), spec);
    }

    #[test]
    fn loading_a_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(matches!(
            NetworkSpec::load_json(path.to_str().unwrap()),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn unknown_activation_is_a_parse_error() {
        let bad = XOR_SPEC.replacen("\"tanh\"", "\"swish\"", 1);
        assert!(serde_json::from_str::<NetworkSpec>(&bad).is_err());
    }
}
