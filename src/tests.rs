//! End-to-end smoke tests mirroring the shape of this crate's very first
//! tests: central directory, id lookup, chunk content. Unlike those, these
//! build their own fixture with the writer rather than depending on a
//! checked-in binary file.
use tempfile::NamedTempFile;

use crate::{CompressionType, EncryptionType, Payload, RresFile, RresWriter, WriteOptions, WriteRequest};

fn text_fixture() -> NamedTempFile {
    let file = NamedTempFile::new().expect("create temp fixture");
    let requests = vec![WriteRequest {
        file_name: "resources/text_data.txt".into(),
        resource_type: *b"TEXT",
        id_override: None,
        payload: Payload::new(
            vec![29, 1, 0, 0],
            b"Hello World! This is a test!".to_vec(),
        ),
        compression: Some(CompressionType::None),
        cipher: Some(EncryptionType::None),
    }];
    RresWriter::write(file.path(), &requests, &WriteOptions::default()).expect("write fixture");
    file
}

#[test]
fn reads_central_dir() {
    let fixture = text_fixture();
    let rres_file = RresFile::new(fixture.path());
    let central_dir = rres_file.load_central_dir();
    assert!(central_dir.is_ok());
    assert_eq!(central_dir.unwrap().entries.len(), 1);
}

#[test]
fn reads_resource_id() {
    let fixture = text_fixture();
    let rres_file = RresFile::new(fixture.path());
    let central_dir = rres_file.load_central_dir().unwrap();
    let resource_id = rres_file.get_resource_id(&central_dir, "resources/text_data.txt");
    assert_eq!(resource_id, crate::resource_id(b"resources/text_data.txt"));
}

#[test]
fn reads_resource_chunk() {
    let fixture = text_fixture();
    let rres_file = RresFile::new(fixture.path());
    let central_dir = rres_file.load_central_dir().unwrap();
    let resource_id = rres_file.get_resource_id(&central_dir, "resources/text_data.txt");
    let chunk = rres_file.load_resource_chunk(resource_id).unwrap();
    let payload = chunk.unpack().unwrap();
    let text = String::from_utf8(payload.raw).unwrap();
    assert_eq!(text, "Hello World! This is a test!");
}
