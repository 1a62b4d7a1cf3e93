use approx::assert_abs_diff_eq;
use ferrite_mlp::activation::activation::{
    relu, relu_derivative, sigmoid, softmax, softmax_derivative, tanh, tanh_derivative,
};
use ferrite_mlp::{ActivationFunction, Error, Matrix};

fn m(rows: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_data(rows).unwrap()
}

#[test]
fn tanh_and_its_derivative() {
    let z = m(vec![vec![0.0, 1.0, -2.0]]);
    let a = tanh(&z);
    assert_abs_diff_eq!(a.get(0, 1).unwrap(), 1.0_f64.tanh(), epsilon = 1e-15);
    let d = tanh_derivative(&z);
    assert_abs_diff_eq!(d.get(0, 0).unwrap(), 1.0, epsilon = 1e-15);
    let t = (-2.0_f64).tanh();
    assert_abs_diff_eq!(d.get(0, 2).unwrap(), 1.0 - t * t, epsilon = 1e-15);
}

#[test]
fn relu_derivative_is_zero_at_zero() {
    let z = m(vec![vec![-1.5, 0.0, 2.5]]);
    assert_eq!(relu(&z).flatten(), vec![0.0, 0.0, 2.5]);
    assert_eq!(relu_derivative(&z).flatten(), vec![0.0, 0.0, 1.0]);
}

#[test]
fn softmax_rows_are_distributions() {
    let z = m(vec![
        vec![1.0, 2.0, 3.0],
        vec![-5.0, 0.0, 5.0],
        vec![0.0, 0.0, 0.0],
        vec![1000.0, 1001.0, 999.0],
        vec![-30.0, 12.5, 4.0],
    ]);
    let s = softmax(&z);
    assert_eq!(s.shape(), z.shape());
    for i in 0..s.rows() {
        let row = s.row(i).unwrap();
        let total: f64 = row.iter().sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
        assert!(row.iter().all(|&p| p > 0.0 && p < 1.0), "row {i}: {row:?}");
    }
    assert_abs_diff_eq!(s.get(2, 0).unwrap(), 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn softmax_is_shift_invariant() {
    let a = softmax(&m(vec![vec![1.0, 2.0, 3.0]]));
    let b = softmax(&m(vec![vec![101.0, 102.0, 103.0]]));
    for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-12);
    }
}

#[test]
fn softmax_derivative_is_the_diagonal_term() {
    let z = m(vec![vec![0.5, -0.5, 2.0]]);
    let s = softmax(&z);
    let d = softmax_derivative(&z);
    for (sj, dj) in s.as_slice().iter().zip(d.as_slice()) {
        assert_abs_diff_eq!(*dj, sj * (1.0 - sj), epsilon = 1e-15);
    }
}

#[test]
fn enum_dispatch_matches_free_functions() {
    let z = m(vec![vec![-1.0, 0.25], vec![3.0, -0.5]]);
    assert_eq!(ActivationFunction::Tanh.apply(&z), tanh(&z));
    assert_eq!(ActivationFunction::Relu.apply(&z), relu(&z));
    assert_eq!(ActivationFunction::Softmax.apply(&z), softmax(&z));
    assert_eq!(ActivationFunction::Sigmoid.apply(&z), sigmoid(&z));
    assert_eq!(ActivationFunction::Identity.apply(&z), z);
    assert_eq!(
        ActivationFunction::Identity.derivative(&z).flatten(),
        vec![1.0; 4]
    );
    assert_eq!(ActivationFunction::Relu.derivative(&z), relu_derivative(&z));
}

#[test]
fn activation_names_parse() {
    assert_eq!("relu".parse::<ActivationFunction>().unwrap(), ActivationFunction::Relu);
    assert_eq!("softmax".parse::<ActivationFunction>().unwrap(), ActivationFunction::Softmax);
    assert!(matches!(
        "leaky_relu".parse::<ActivationFunction>(),
        Err(Error::InvalidArgument(_))
    ));
}
