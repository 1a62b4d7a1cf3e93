use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;

/// Strategy for a layer's initial weight matrix of shape `(fan_in, fan_out)`.
///
/// Randomness always comes from the generator handed to [`WeightInit::initialize`],
/// so seeding that generator makes a whole network reproducible.
///
/// In JSON an initializer is either a bare name accepted by [`FromStr`]
/// (`"random_uniform"` means the default `[-1, 1]` range) or
/// `{ "random_uniform": { "min": .., "max": .. } }` for a custom range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "WeightInitRepr")]
pub enum WeightInit {
    Zeros,
    Ones,
    /// Uniform over `[min, max]`.
    RandomUniform { min: f64, max: f64 },
    /// Uniform over `±sqrt(2 / fan_in)`. Recommended before ReLU layers.
    HeUniform,
    /// Uniform over `±sqrt(2 / (fan_in + fan_out))`. Recommended before Tanh/Softmax layers.
    XavierUniform,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeightInitRepr {
    Name(String),
    Range { random_uniform: UniformRange },
}

#[derive(Deserialize)]
struct UniformRange {
    min: f64,
    max: f64,
}

impl TryFrom<WeightInitRepr> for WeightInit {
    type Error = Error;

    fn try_from(repr: WeightInitRepr) -> Result<Self> {
        match repr {
            WeightInitRepr::Name(name) => name.parse(),
            WeightInitRepr::Range { random_uniform } => Ok(WeightInit::RandomUniform {
                min: random_uniform.min,
                max: random_uniform.max,
            }),
        }
    }
}

impl WeightInit {
    /// `RandomUniform` over the default range `[-1, 1]`.
    pub fn random_uniform() -> WeightInit {
        WeightInit::RandomUniform { min: -1.0, max: 1.0 }
    }

    pub fn initialize<R: Rng + ?Sized>(
        &self,
        fan_in: usize,
        fan_out: usize,
        rng: &mut R,
    ) -> Result<Matrix> {
        match *self {
            WeightInit::Zeros => Ok(Matrix::zeros(fan_in, fan_out)),
            WeightInit::Ones => Ok(Matrix::filled(fan_in, fan_out, 1.0)),
            WeightInit::RandomUniform { min, max } => {
                Matrix::random_uniform(fan_in, fan_out, min, max, rng)
            }
            WeightInit::HeUniform => {
                if fan_in == 0 {
                    return Err(Error::invalid("he_uniform requires fan_in > 0"));
                }
                let limit = (2.0 / fan_in as f64).sqrt();
                Matrix::random_uniform(fan_in, fan_out, -limit, limit, rng)
            }
            WeightInit::XavierUniform => {
                if fan_in + fan_out == 0 {
                    return Err(Error::invalid("xavier_uniform requires fan_in + fan_out > 0"));
                }
                let limit = (2.0 / (fan_in + fan_out) as f64).sqrt();
                Matrix::random_uniform(fan_in, fan_out, -limit, limit, rng)
            }
        }
    }
}

impl FromStr for WeightInit {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "zeros" => Ok(WeightInit::Zeros),
            "ones" => Ok(WeightInit::Ones),
            "random_uniform" => Ok(WeightInit::random_uniform()),
            "he" | "he_uniform" => Ok(WeightInit::HeUniform),
            "xavier" | "xavier_uniform" => Ok(WeightInit::XavierUniform),
            other => Err(Error::invalid(format!("unknown weight initializer '{other}'"))),
        }
    }
}
