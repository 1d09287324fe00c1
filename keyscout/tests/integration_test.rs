use anyhow::Result;
use keyscout::filters::list_text_files;
use keyscout::{ExecutionStrategy, ThreadStrategy};
use std::fs::File;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tempfile::tempdir;

fn create_test_files(dir: &tempfile::TempDir, entries: &[(&str, &str)]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for (name, content) in entries {
        let path = dir.path().join(name);
        let mut file = File::create(&path)?;
        file.write_all(content.as_bytes())?;
        paths.push(path);
    }
    Ok(paths)
}

fn workers(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn test_worked_example() -> Result<()> {
    let dir = tempdir()?;
    let files = create_test_files(
        &dir,
        &[
            ("a.txt", "OpenMP test"),
            ("b.txt", "Java code"),
            ("c.txt", "no match here"),
        ],
    )?;
    let keywords = vec!["OpenMP".to_string(), "Java".to_string()];

    let outcome = ThreadStrategy.run(&files, &keywords, workers(2))?;

    assert_eq!(outcome.merged.matches["OpenMP"], vec![files[0].clone()]);
    assert_eq!(outcome.merged.matches["Java"], vec![files[1].clone()]);
    assert_eq!(outcome.merged.files_scanned, 3);
    Ok(())
}

#[test]
fn test_merge_determinism_across_runs() -> Result<()> {
    let dir = tempdir()?;
    let entries: Vec<(String, String)> = (0..20)
        .map(|i| {
            (
                format!("file{i:02}.txt"),
                format!("line with needle number {i} and some filler"),
            )
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = entries
        .iter()
        .map(|(n, c)| (n.as_str(), c.as_str()))
        .collect();
    let files = create_test_files(&dir, &borrowed)?;
    let keywords = vec!["needle".to_string(), "filler".to_string()];

    let first = ThreadStrategy.run(&files, &keywords, workers(4))?.merged;
    for _ in 0..5 {
        let again = ThreadStrategy.run(&files, &keywords, workers(4))?.merged;
        assert_eq!(again, first, "merged result must not depend on scheduling");
    }

    // Matches appear in file-list order because chunks are contiguous and
    // merged in worker-index order.
    assert_eq!(first.matches["needle"], files);
    Ok(())
}

#[test]
fn test_keyword_presence_with_no_matches() -> Result<()> {
    let dir = tempdir()?;
    let files = create_test_files(&dir, &[("a.txt", "nothing relevant")])?;
    let keywords = vec!["absent".to_string(), "missing".to_string()];

    let outcome = ThreadStrategy.run(&files, &keywords, workers(3))?;

    assert_eq!(outcome.merged.matches.len(), 2);
    assert!(outcome.merged.matches["absent"].is_empty());
    assert!(outcome.merged.matches["missing"].is_empty());
    Ok(())
}

#[test]
fn test_per_file_error_isolation() -> Result<()> {
    let dir = tempdir()?;
    let mut files = create_test_files(
        &dir,
        &[
            ("a.txt", "needle one"),
            ("b.txt", "needle two"),
            ("c.txt", "plain"),
            ("d.txt", "needle three"),
        ],
    )?;
    // A file that cannot be read must be skipped, not fail the run.
    files.insert(2, dir.path().join("ghost.txt"));

    let keywords = vec!["needle".to_string()];
    let outcome = ThreadStrategy.run(&files, &keywords, workers(1))?;

    assert_eq!(outcome.merged.files_scanned, 4);
    assert_eq!(outcome.merged.files_skipped, 1);
    assert_eq!(outcome.merged.matches["needle"].len(), 3);
    Ok(())
}

#[test]
fn test_scan_over_enumerated_folder() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("z.txt", "keyword at the end of the alphabet"),
            ("a.txt", "keyword at the start"),
            ("notes.md", "keyword in an excluded extension"),
        ],
    )?;

    let files = list_text_files(dir.path(), &["txt".to_string()])?;
    let keywords = vec!["keyword".to_string()];
    let outcome = ThreadStrategy.run(&files, &keywords, workers(2))?;

    // Enumeration sorts, so a.txt precedes z.txt and the .md file is ignored.
    let names: Vec<String> = outcome.merged.matches["keyword"]
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.txt", "z.txt"]);
    Ok(())
}

#[test]
fn test_empty_folder_yields_empty_result() -> Result<()> {
    let dir = tempdir()?;
    let files = list_text_files(dir.path(), &["txt".to_string()])?;
    let keywords = vec!["anything".to_string()];

    let outcome = ThreadStrategy.run(&files, &keywords, workers(4))?;
    assert_eq!(outcome.merged.files_scanned, 0);
    assert!(outcome.merged.matches["anything"].is_empty());
    Ok(())
}
