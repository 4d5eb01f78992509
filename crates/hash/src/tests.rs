use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_sha256_known_digest() {
    let digest = Digest::from_data(DigestAlgorithm::Sha256, b"hello");
    assert_eq!(
        digest.to_hex(),
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
}

#[test]
fn test_blake3_known_digest() {
    let digest = Digest::from_data(DigestAlgorithm::Blake3, b"hello world");
    assert_eq!(
        digest.to_hex(),
        "d74981efa70a0c880b8d8c1985d075dbcbf679b99a5f9914e5aaf96b831a9e24"
    );
}

#[test]
fn test_empty_input_digest() {
    let digest = Digest::from_data(DigestAlgorithm::Sha256, b"");
    assert_eq!(
        digest.to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_algorithm_parse() {
    assert_eq!(
        "sha256".parse::<DigestAlgorithm>().unwrap(),
        DigestAlgorithm::Sha256
    );
    assert_eq!(
        "BLAKE3".parse::<DigestAlgorithm>().unwrap(),
        DigestAlgorithm::Blake3
    );
}

#[test]
fn test_unknown_algorithm_rejected() {
    let err = "md5".parse::<DigestAlgorithm>().unwrap_err();
    assert!(err.to_string().contains("unsupported digest algorithm"));
}

#[test]
fn test_from_hex_length_checked() {
    let err = Digest::from_hex(DigestAlgorithm::Sha256, "abcd").unwrap_err();
    assert!(err.to_string().contains("32 bytes"));

    let ok = Digest::from_hex(
        DigestAlgorithm::Sha256,
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824",
    )
    .unwrap();
    assert_eq!(ok.as_bytes().len(), 32);
}

#[test]
fn test_matches_hex_ignores_case() {
    let digest = Digest::from_data(DigestAlgorithm::Sha256, b"hello");
    assert!(digest.matches_hex("2CF24DBA5FB0A30E26E83B2AC5B9E29E1B161E5C1FA7425E73043362938B9824"));
    assert!(!digest.matches_hex(
        "0000000000000000000000000000000000000000000000000000000000000000"
    ));
}

#[tokio::test]
async fn test_hash_file_matches_whole_buffer() {
    let mut temp = NamedTempFile::new().unwrap();
    let data = b"test file content";
    temp.write_all(data).unwrap();

    let streamed = Digest::hash_file(temp.path(), DigestAlgorithm::Blake3)
        .await
        .unwrap();
    assert_eq!(streamed, Digest::from_data(DigestAlgorithm::Blake3, data));
}

#[tokio::test]
async fn test_chunked_digest_independent_of_chunking() {
    // Larger than one chunk and deliberately not a multiple of it
    let data: Vec<u8> = (0..(3 * 1024 * 1024 + 17))
        .map(|i: u32| u8::try_from(i % 251).unwrap())
        .collect();

    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(&data).unwrap();

    for algorithm in DigestAlgorithm::ALL {
        let streamed = Digest::hash_file(temp.path(), algorithm).await.unwrap();
        assert_eq!(streamed, Digest::from_data(algorithm, &data));
    }
}

#[tokio::test]
async fn test_hash_reader() {
    let data = b"reader bytes";
    let reader = std::io::Cursor::new(&data[..]);
    let digest = Digest::hash_reader(reader, DigestAlgorithm::Sha256)
        .await
        .unwrap();
    assert_eq!(digest, Digest::from_data(DigestAlgorithm::Sha256, data));
}

#[tokio::test]
async fn test_hash_missing_file_fails() {
    let temp = tempfile::TempDir::new().unwrap();
    let result = Digest::hash_file(&temp.path().join("nope"), DigestAlgorithm::Sha256).await;
    assert!(result.is_err());
}
