use ferrite_mlp::data::idx::{load_images, load_labels, parse_images, parse_labels};
use ferrite_mlp::Error;
use std::io::Write;

fn image_file(n: u32, rows: u32, cols: u32, pixels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&2051u32.to_be_bytes());
    bytes.extend_from_slice(&n.to_be_bytes());
    bytes.extend_from_slice(&rows.to_be_bytes());
    bytes.extend_from_slice(&cols.to_be_bytes());
    bytes.extend_from_slice(pixels);
    bytes
}

fn label_file(labels: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&2049u32.to_be_bytes());
    bytes.extend_from_slice(&(labels.len() as u32).to_be_bytes());
    bytes.extend_from_slice(labels);
    bytes
}

#[test]
fn images_become_one_row_per_item_with_raw_values() {
    let bytes = image_file(2, 2, 2, &[0, 255, 10, 20, 1, 2, 3, 4]);
    let images = parse_images(&bytes).unwrap();
    assert_eq!((images.rows(), images.cols()), (2, 4));
    assert_eq!(images.row(0).unwrap(), &[0.0, 255.0, 10.0, 20.0]);
    assert_eq!(images.row(1).unwrap(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn labels_become_one_hot_rows() {
    let labels = parse_labels(&label_file(&[3, 0, 9]), 10).unwrap();
    assert_eq!((labels.rows(), labels.cols()), (3, 10));
    assert_eq!(labels.get(0, 3).unwrap(), 1.0);
    assert_eq!(labels.get(1, 0).unwrap(), 1.0);
    assert_eq!(labels.get(2, 9).unwrap(), 1.0);
    assert_eq!(labels.sum(), 3.0);
}

#[test]
fn wrong_magic_numbers_are_rejected() {
    let mut bytes = image_file(1, 1, 1, &[7]);
    bytes[3] = 0x01;
    assert!(matches!(parse_images(&bytes), Err(Error::InvalidArgument(_))));

    // An image file is not a label file.
    assert!(matches!(
        parse_labels(&image_file(1, 1, 1, &[7]), 10),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn truncated_files_are_rejected() {
    assert!(parse_images(&[0, 0, 8]).is_err());
    assert!(parse_images(&image_file(2, 2, 2, &[1, 2, 3])).is_err());
    let mut labels = label_file(&[1, 2]);
    labels.pop();
    assert!(parse_labels(&labels, 10).is_err());
}

#[test]
fn out_of_range_classes_are_rejected() {
    assert!(matches!(
        parse_labels(&label_file(&[1, 12]), 10),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn files_load_from_disk() {
    let mut images = tempfile::NamedTempFile::new().unwrap();
    images.write_all(&image_file(1, 1, 3, &[5, 6, 7])).unwrap();
    let mut labels = tempfile::NamedTempFile::new().unwrap();
    labels.write_all(&label_file(&[1])).unwrap();

    assert_eq!(load_images(images.path()).unwrap().flatten(), vec![5.0, 6.0, 7.0]);
    assert_eq!(load_labels(labels.path(), 2).unwrap().flatten(), vec![0.0, 1.0]);
    assert!(matches!(
        load_images("/definitely/not/here.idx3-ubyte"),
        Err(Error::Io(_))
    ));
}
