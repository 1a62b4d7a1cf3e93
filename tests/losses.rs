use approx::assert_abs_diff_eq;
use ferrite_mlp::{CrossEntropyLoss, Error, LossType, MaeLoss, Matrix, MseLoss};

fn m(rows: Vec<Vec<f64>>) -> Matrix {
    Matrix::from_data(rows).unwrap()
}

#[test]
fn mse_is_halved_and_batch_averaged() {
    let pred = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let target = m(vec![vec![0.0, 2.0], vec![1.0, 4.0]]);
    // squared errors: 1 + 0 + 4 + 0 = 5; N = 2
    assert_abs_diff_eq!(MseLoss::loss(&pred, &target).unwrap(), 5.0 / 4.0, epsilon = 1e-15);
    let d = MseLoss::derivative(&pred, &target).unwrap();
    assert_eq!(d.flatten(), vec![0.5, 0.0, 1.0, 0.0]);
}

#[test]
fn mae_uses_copysign_for_zero_differences() {
    let pred = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    let target = m(vec![vec![0.0, 2.0], vec![5.0, 4.0]]);
    // |1| + |0| + |-2| + |0| = 3; N = 2
    assert_abs_diff_eq!(MaeLoss::loss(&pred, &target).unwrap(), 1.5, epsilon = 1e-15);
    let d = MaeLoss::derivative(&pred, &target).unwrap();
    assert_eq!(d.flatten(), vec![0.5, 0.5, -0.5, 0.5]);
}

#[test]
fn cross_entropy_clamps_predictions() {
    let pred = m(vec![vec![0.9, 0.1], vec![0.0, 1.0]]);
    let target = m(vec![vec![1.0, 0.0], vec![1.0, 0.0]]);
    let expected = -(0.9_f64.ln() + 1e-7_f64.ln()) / 2.0;
    let loss = CrossEntropyLoss::loss(&pred, &target).unwrap();
    assert!(loss.is_finite());
    assert_abs_diff_eq!(loss, expected, epsilon = 1e-12);
}

#[test]
fn cross_entropy_derivative_is_the_softmax_shortcut() {
    let pred = m(vec![vec![0.7, 0.2, 0.1]]);
    let target = m(vec![vec![0.0, 1.0, 0.0]]);
    let d = CrossEntropyLoss::derivative(&pred, &target).unwrap();
    let expected = [0.7, -0.8, 0.1];
    for (a, e) in d.as_slice().iter().zip(expected.iter()) {
        assert_abs_diff_eq!(*a, *e, epsilon = 1e-12);
    }
}

#[test]
fn every_loss_rejects_mismatched_shapes() {
    let pred = Matrix::zeros(2, 3);
    let target = Matrix::zeros(3, 2);
    for loss in [LossType::Mse, LossType::Mae, LossType::CrossEntropy] {
        assert!(matches!(loss.loss(&pred, &target), Err(Error::ShapeMismatch { .. })));
        assert!(matches!(
            loss.derivative(&pred, &target),
            Err(Error::ShapeMismatch { .. })
        ));
    }
    assert!(matches!(
        CrossEntropyLoss::loss(&pred, &target),
        Err(Error::ShapeMismatch { .. })
    ));
}

#[test]
fn empty_batches_are_rejected() {
    let empty = Matrix::zeros(0, 2);
    assert!(matches!(
        MseLoss::loss(&empty, &empty),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn loss_names_parse_with_aliases() {
    assert_eq!("mse".parse::<LossType>().unwrap(), LossType::Mse);
    assert_eq!("mean_squared_error".parse::<LossType>().unwrap(), LossType::Mse);
    assert_eq!("mean_absolute_error".parse::<LossType>().unwrap(), LossType::Mae);
    assert_eq!("cross_entropy".parse::<LossType>().unwrap(), LossType::CrossEntropy);
    assert!(matches!("hinge".parse::<LossType>(), Err(Error::InvalidArgument(_))));
}
