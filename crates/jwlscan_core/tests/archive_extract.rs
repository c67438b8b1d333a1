mod common;

use common::{build_archive, build_backup_archive};
use jwlscan_core::{extract_archive, extract_to_workdir, ExtractionError, WORKDIR_PREFIX};

#[test]
fn extract_archive_materializes_database_and_assets() {
    let dir = tempfile::tempdir().unwrap();
    let archive = build_backup_archive(dir.path(), &[(1, Some("t"), Some("c"), Some(1))]);
    let dest = dir.path().join("out");

    let extracted = extract_archive(&archive, &dest).unwrap();
    assert_eq!(extracted.root, dest);
    assert_eq!(extracted.entry_count, 2);
    assert!(extracted.database_path.is_file());
    assert!(dest.join("manifest.json").is_file());
}

#[test]
fn extract_to_workdir_uses_prefixed_temp_directory() {
    let dir = tempfile::tempdir().unwrap();
    let archive = build_backup_archive(dir.path(), &[]);

    let (workdir, extracted) = extract_to_workdir(&archive).unwrap();
    let name = workdir.path().file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with(WORKDIR_PREFIX));
    assert!(extracted.database_path.starts_with(workdir.path()));

    let root = workdir.path().to_path_buf();
    drop(workdir);
    assert!(!root.exists());
}

#[test]
fn missing_archive_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = extract_archive(dir.path().join("nope.jwlibrary"), dir.path().join("out")).unwrap_err();
    assert!(matches!(err, ExtractionError::NotFound(_)));
}

#[test]
fn non_zip_file_is_an_invalid_archive() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus.jwlibrary");
    std::fs::write(&bogus, b"definitely not a zip").unwrap();

    let err = extract_archive(&bogus, dir.path().join("out")).unwrap_err();
    assert!(matches!(err, ExtractionError::InvalidArchive { .. }));
    assert!(err.to_string().contains("not a valid backup archive"));
}

#[test]
fn archive_without_database_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("empty.jwlibrary");
    build_archive(&archive, &[("manifest.json", b"{}".to_vec())]);

    let err = extract_archive(&archive, dir.path().join("out")).unwrap_err();
    assert!(matches!(err, ExtractionError::MissingDatabase { .. }));
}
