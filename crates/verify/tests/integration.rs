//! End-to-end generate/verify tests

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;
    use tokio::fs;
    use treesum_hash::DigestAlgorithm;
    use treesum_manifest::{read_manifest, Generator, ManifestRecord};
    use treesum_verify::{Verifier, VerifyOutcome};

    async fn make_tree(base: &Path) -> PathBuf {
        let tree = base.join("tree");
        fs::create_dir_all(tree.join("b")).await.unwrap();
        fs::write(tree.join("a.txt"), b"hello").await.unwrap();
        fs::write(tree.join("b/c.txt"), b"world").await.unwrap();
        tree
    }

    async fn generate(tree: &Path, manifest: &Path) -> Vec<ManifestRecord> {
        Generator::new(DigestAlgorithm::Sha256)
            .write_manifest(tree, manifest)
            .await
            .unwrap();
        read_manifest(manifest).await.unwrap().records
    }

    #[tokio::test]
    async fn test_round_trip_all_match() {
        let temp = tempdir().unwrap();
        let tree = make_tree(temp.path()).await;
        let manifest_path = temp.path().join("hashes.tsv");
        let records = generate(&tree, &manifest_path).await;

        let report = Verifier::new(DigestAlgorithm::Sha256)
            .verify(&tree, &records, &manifest_path)
            .await
            .unwrap();

        assert!(report.is_valid());
        assert_eq!(report.summary.success, 2);
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.mismatch, 0);
        assert_eq!(report.summary.missing, 0);
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn test_tamper_detection() {
        let temp = tempdir().unwrap();
        let tree = make_tree(temp.path()).await;
        let manifest_path = temp.path().join("hashes.tsv");
        let records = generate(&tree, &manifest_path).await;

        // Flip one byte in exactly one file
        fs::write(tree.join("b/c.txt"), b"worle").await.unwrap();

        let report = Verifier::new(DigestAlgorithm::Sha256)
            .verify(&tree, &records, &manifest_path)
            .await
            .unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.summary.mismatch, 1);
        assert_eq!(report.summary.success, 1);
        assert_eq!(report.summary.missing, 0);
        assert_eq!(report.summary.error, 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].relative_path, "b/c.txt");
        assert_eq!(report.failures[0].outcome, VerifyOutcome::Mismatch);
    }

    #[tokio::test]
    async fn test_missing_detection() {
        let temp = tempdir().unwrap();
        let tree = make_tree(temp.path()).await;
        let manifest_path = temp.path().join("hashes.tsv");
        let records = generate(&tree, &manifest_path).await;

        fs::remove_file(tree.join("a.txt")).await.unwrap();

        let report = Verifier::new(DigestAlgorithm::Sha256)
            .verify(&tree, &records, &manifest_path)
            .await
            .unwrap();

        assert_eq!(report.summary.missing, 1);
        assert_eq!(report.summary.success, 1);
        assert_eq!(report.summary.total, 2); // record count unchanged
        assert_eq!(report.failures[0].outcome, VerifyOutcome::Missing);
    }

    #[tokio::test]
    async fn test_unhashable_path_classified_as_error() {
        let temp = tempdir().unwrap();
        let tree = make_tree(temp.path()).await;
        let manifest_path = temp.path().join("hashes.tsv");

        // "b" exists but is a directory: metadata succeeds, hashing cannot.
        // Distinct from Missing - the path is present but unreadable.
        let records = vec![ManifestRecord::new("b", "00".repeat(32))];

        let report = Verifier::new(DigestAlgorithm::Sha256)
            .verify(&tree, &records, &manifest_path)
            .await
            .unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.summary.error, 1);
        assert_eq!(report.summary.missing, 0);
        assert_eq!(report.summary.mismatch, 0);
        assert_eq!(report.summary.total, 1);
        assert_eq!(report.failures[0].relative_path, "b");
        assert_eq!(report.failures[0].outcome, VerifyOutcome::Error);
    }

    #[tokio::test]
    async fn test_error_record_does_not_stop_scan() {
        let temp = tempdir().unwrap();
        let tree = make_tree(temp.path()).await;
        let manifest_path = temp.path().join("hashes.tsv");
        let mut records = generate(&tree, &manifest_path).await;
        records.insert(0, ManifestRecord::new("b", "00".repeat(32)));

        let report = Verifier::new(DigestAlgorithm::Sha256)
            .verify(&tree, &records, &manifest_path)
            .await
            .unwrap();

        // The unhashable record is classified and the rest still verify
        assert_eq!(report.summary.error, 1);
        assert_eq!(report.summary.success, 2);
        assert_eq!(report.summary.total, 3);
    }

    #[tokio::test]
    async fn test_failures_preserve_manifest_order() {
        let temp = tempdir().unwrap();
        let tree = temp.path().join("tree");
        fs::create_dir(&tree).await.unwrap();
        for name in ["1.txt", "2.txt", "3.txt", "4.txt"] {
            fs::write(tree.join(name), name.as_bytes()).await.unwrap();
        }
        let manifest_path = temp.path().join("hashes.tsv");
        let records = generate(&tree, &manifest_path).await;

        fs::remove_file(tree.join("1.txt")).await.unwrap();
        fs::write(tree.join("3.txt"), b"changed").await.unwrap();
        fs::remove_file(tree.join("4.txt")).await.unwrap();

        let report = Verifier::new(DigestAlgorithm::Sha256)
            .with_max_concurrency(8)
            .verify(&tree, &records, &manifest_path)
            .await
            .unwrap();

        let order: Vec<&str> = report
            .failures
            .iter()
            .map(|f| f.relative_path.as_str())
            .collect();
        assert_eq!(order, vec!["1.txt", "3.txt", "4.txt"]);
    }

    #[tokio::test]
    async fn test_verify_empty_manifest() {
        let temp = tempdir().unwrap();
        let tree = temp.path().join("tree");
        fs::create_dir(&tree).await.unwrap();
        let manifest_path = temp.path().join("hashes.tsv");
        let records = generate(&tree, &manifest_path).await;
        assert!(records.is_empty());

        let report = Verifier::new(DigestAlgorithm::Sha256)
            .verify(&tree, &records, &manifest_path)
            .await
            .unwrap();
        assert!(report.is_valid());
        assert_eq!(report.summary.total, 0);
    }

    #[tokio::test]
    async fn test_verify_emits_record_events() {
        use treesum_events::{AppEvent, VerifyEvent};

        let temp = tempdir().unwrap();
        let tree = make_tree(temp.path()).await;
        let manifest_path = temp.path().join("hashes.tsv");
        let records = generate(&tree, &manifest_path).await;

        let (tx, mut rx) = treesum_events::channel();
        let report = Verifier::new(DigestAlgorithm::Sha256)
            .with_events(tx)
            .verify(&tree, &records, &manifest_path)
            .await
            .unwrap();
        assert!(report.is_valid());

        let mut checked = 0;
        let mut completed = false;
        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::Verify(VerifyEvent::RecordChecked { .. }) => checked += 1,
                AppEvent::Verify(VerifyEvent::Completed { summary }) => {
                    assert_eq!(summary.success, 2);
                    completed = true;
                }
                _ => {}
            }
        }
        assert_eq!(checked, 2);
        assert!(completed);
    }
}
