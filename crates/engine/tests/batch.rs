use renamr_engine::describe::{Category, Describer, DescriberKind, DescriberRegistry, Description, Fragment};
use renamr_engine::error::ErrorKind;
use renamr_engine::{NamingTemplate, RenameOutcome, Renamer, SkipReason, Status, fingerprint, rename_batch};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates `<tmp>/myfolder` populated with `files`.
fn folder(files: &[(&str, &[u8])]) -> (TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path().join("myfolder");
    fs::create_dir(&dir).unwrap();
    for (name, contents) in files {
        fs::write(dir.join(name), contents).unwrap();
    }
    (tmp, dir)
}

fn listing(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir).unwrap().map(|e| e.unwrap().file_name().into_string().unwrap()).collect();
    names.sort();
    names
}

fn renamer(template: &str) -> Renamer {
    Renamer::new(template.parse::<NamingTemplate>().unwrap())
}

fn outcome<'a>(outcomes: &'a [RenameOutcome], original: &str) -> &'a RenameOutcome {
    outcomes.iter().find(|o| o.original_name() == original).unwrap()
}

#[test]
fn test_report_and_photo_scenario() {
    let (_tmp, dir) = folder(&[("report.txt", b"Q3 Results\n..."), ("photo.jpg", b"not really a jpeg")]);
    let report_hash = fingerprint(dir.join("report.txt")).to_string();
    let photo_hash = fingerprint(dir.join("photo.jpg")).to_string();

    let outcomes = Renamer::default().rename_batch(&dir).unwrap();
    assert_eq!(outcomes.len(), 2);

    // Sorted listing: photo.jpg is 1, report.txt is 2.
    let photo = outcome(&outcomes, "photo.jpg");
    assert_eq!(photo.status(), &Status::Renamed);
    let photo_name = photo.final_name().unwrap();
    assert!(photo_name.starts_with("myfolder_image_jpeg_unknownRes_unknownCamera_Low_"), "{photo_name}");
    assert!(photo_name.ends_with(&format!("_{photo_hash}_1.jpg")), "{photo_name}");

    let report = outcome(&outcomes, "report.txt");
    assert_eq!(report.status(), &Status::Renamed);
    let report_name = report.final_name().unwrap();
    assert!(report_name.starts_with("myfolder_text_plain_Q3 Results_Low_"), "{report_name}");
    assert!(report_name.ends_with(&format!("_{report_hash}_2.txt")), "{report_name}");
    let date = report_name.trim_start_matches("myfolder_text_plain_Q3 Results_Low_").split('_').next().unwrap();
    assert_eq!(date.len(), 8);
    assert!(date.chars().all(|c| c.is_ascii_digit()));

    let mut expected = vec![photo_name.to_string(), report_name.to_string()];
    expected.sort();
    assert_eq!(listing(&dir), expected);
}

#[test]
fn test_identical_candidates_are_suffixed() {
    let (_tmp, dir) = folder(&[("a.txt", b"one"), ("b.txt", b"two")]);
    let outcomes = renamer("x{ext}").rename_batch(&dir).unwrap();
    assert_eq!(outcome(&outcomes, "a.txt").final_name(), Some("x.txt"));
    assert_eq!(outcome(&outcomes, "b.txt").final_name(), Some("x_1.txt"));
    assert_eq!(listing(&dir), ["x.txt", "x_1.txt"]);
}

#[test]
fn test_many_collisions_stay_unique() {
    let files: Vec<(String, Vec<u8>)> = (0..12).map(|n| (format!("file{n:02}.dat"), vec![n; 10])).collect();
    let borrowed: Vec<(&str, &[u8])> = files.iter().map(|(n, c)| (n.as_str(), c.as_slice())).collect();
    let (_tmp, dir) = folder(&borrowed);

    let outcomes = renamer("same{ext}").rename_batch(&dir).unwrap();
    let finals: HashSet<_> = outcomes.iter().map(|o| o.final_name().unwrap().to_string()).collect();
    assert_eq!(finals.len(), 12);
    assert_eq!(listing(&dir).len(), 12);
    assert!(finals.contains("same.dat"));
    assert!(finals.contains("same_11.dat"));
}

#[test]
fn test_never_overwrites_unprocessed_file() {
    // "a.txt" is processed first and renders to "x.txt", which still belongs
    // to a file that has not been processed yet.
    let (_tmp, dir) = folder(&[("a.txt", b"first"), ("x.txt", b"second")]);
    let outcomes = renamer("x{ext}").rename_batch(&dir).unwrap();
    assert_eq!(outcome(&outcomes, "a.txt").final_name(), Some("x_1.txt"));
    assert_eq!(outcome(&outcomes, "x.txt").status(), &Status::Skipped(SkipReason::Unchanged));
    assert_eq!(fs::read(dir.join("x.txt")).unwrap(), b"second");
    assert_eq!(fs::read(dir.join("x_1.txt")).unwrap(), b"first");
}

#[test]
fn test_directories_are_skipped_but_keep_their_index() {
    let (_tmp, dir) = folder(&[("a.txt", b"a"), ("c.txt", b"c")]);
    fs::create_dir(dir.join("b")).unwrap();

    let outcomes = renamer("{i}{ext}").rename_batch(&dir).unwrap();
    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcome(&outcomes, "a.txt").final_name(), Some("1.txt"));
    assert_eq!(outcome(&outcomes, "b").status(), &Status::Skipped(SkipReason::Directory));
    assert_eq!(outcome(&outcomes, "c.txt").final_name(), Some("3.txt"));
    assert!(dir.join("b").is_dir());
}

#[test]
fn test_every_entry_gets_an_outcome() {
    let (_tmp, dir) = folder(&[
        ("empty.txt", b""),
        ("no_extension", b"plain"),
        ("broken.png", b"\x89PNG garbage"),
        ("noise.mp3", &[0u8; 32]),
        ("clip.mp4", b"...."),
        ("paper.pdf", b"%PDF-1.7 truncated"),
    ]);
    fs::create_dir(dir.join("sub")).unwrap();

    let outcomes = Renamer::default().rename_batch(&dir).unwrap();
    assert_eq!(outcomes.len(), 7);
    assert!(outcomes.iter().all(|o| !matches!(o.status(), Status::Failed(_))), "{outcomes:?}");

    let name = |original| outcome(&outcomes, original).final_name().unwrap().to_string();
    assert!(name("empty.txt").contains("_text_plain_content_Low_"));
    assert!(name("no_extension").starts_with("myfolder_unknown_file_meta_Low_"));
    assert!(!name("no_extension").contains('.'));
    assert!(name("broken.png").contains("_unknownRes_unknownCamera_"));
    assert!(name("noise.mp3").contains("_unknownArtist_unknownAlbum_"));
    assert!(name("clip.mp4").contains("_video_mp4_videoFile_"));
    assert!(name("paper.pdf").contains("_application_pdf_content_"));
}

#[test]
fn test_fragment_is_sanitized() {
    let (_tmp, dir) = folder(&[("notes.txt", br#"Time: 10:30 "final" */draft"#)]);
    let outcomes = renamer("{extra}{ext}").rename_batch(&dir).unwrap();
    assert_eq!(outcomes[0].final_name(), Some("Time_ 10_30 _final_ __draft.txt"));
}

#[test]
fn test_dry_run_is_deterministic_and_harmless() {
    let (_tmp, dir) = folder(&[("a.txt", b"alpha"), ("b.txt", b"alpha"), ("c.bin", b"\0\0")]);
    let before = listing(&dir);

    let dry = Renamer::default().with_dry_run(true);
    let first = dry.rename_batch(&dir).unwrap();
    let second = dry.rename_batch(&dir).unwrap();
    assert_eq!(first, second);
    assert!(first.iter().all(|o| o.status() == &Status::Planned));
    assert_eq!(listing(&dir), before);

    // A real run lands exactly where the dry run said it would.
    let real = Renamer::default().rename_batch(&dir).unwrap();
    let planned: Vec<_> = first.iter().map(|o| o.final_name()).collect();
    let renamed: Vec<_> = real.iter().map(|o| o.final_name()).collect();
    assert_eq!(planned, renamed);
}

#[test]
fn test_dry_run_tracks_claims() {
    let (_tmp, dir) = folder(&[("a.txt", b"1"), ("b.txt", b"2")]);
    let outcomes = renamer("x{ext}").with_dry_run(true).rename_batch(&dir).unwrap();
    assert_eq!(outcome(&outcomes, "a.txt").final_name(), Some("x.txt"));
    assert_eq!(outcome(&outcomes, "b.txt").final_name(), Some("x_1.txt"));
}

#[test]
fn test_stopping_early_leaves_remaining_files() {
    let (_tmp, dir) = folder(&[("a.txt", b"a"), ("b.txt", b"b"), ("c.txt", b"c")]);
    let renamer = renamer("renamed_{i}{ext}");
    let batch = renamer.batch(&dir).unwrap();
    assert_eq!(batch.len(), 3);
    let done: Vec<_> = batch.take(1).collect();
    assert_eq!(done.len(), 1);
    assert_eq!(listing(&dir), ["b.txt", "c.txt", "renamed_1.txt"]);
}

#[test]
fn test_vanished_file_fails_alone() {
    let (_tmp, dir) = folder(&[("a.txt", b"a"), ("b.txt", b"b"), ("c.txt", b"c")]);
    let renamer = renamer("n{i}{ext}");
    let mut batch = renamer.batch(&dir).unwrap();

    let first = batch.next().unwrap();
    assert_eq!(first.status(), &Status::Renamed);
    fs::remove_file(dir.join("b.txt")).unwrap();
    let second = batch.next().unwrap();
    assert_eq!(second.original_name(), "b.txt");
    assert!(matches!(second.status(), Status::Failed(_)), "{second:?}");
    let third = batch.next().unwrap();
    assert_eq!(third.final_name(), Some("n3.txt"));
    assert!(batch.next().is_none());
}

#[test]
fn test_externally_created_target_is_not_overwritten() {
    let (_tmp, dir) = folder(&[("a.txt", b"a")]);
    let renamer = renamer("taken{ext}");
    let mut batch = renamer.batch(&dir).unwrap();
    fs::write(dir.join("taken.txt"), b"someone else").unwrap();

    let outcome = batch.next().unwrap();
    assert!(matches!(outcome.status(), Status::Failed(_)), "{outcome:?}");
    assert_eq!(fs::read(dir.join("taken.txt")).unwrap(), b"someone else");
    assert!(dir.join("a.txt").exists());
}

#[test]
fn test_missing_directory_is_fatal() {
    let tmp = tempfile::tempdir().unwrap();
    let err = Renamer::default().rename_batch(tmp.path().join("nope")).unwrap_err();
    assert!(matches!(&*err, ErrorKind::DirectoryNotFound(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_file_instead_of_directory_is_fatal() {
    let (_tmp, dir) = folder(&[("a.txt", b"a")]);
    let err = Renamer::default().rename_batch(dir.join("a.txt")).unwrap_err();
    assert!(matches!(&*err, ErrorKind::NotADirectory(_)));
}

#[test]
fn test_bad_template_fails_before_any_rename() {
    let (_tmp, dir) = folder(&[("a.txt", b"a")]);
    let err = rename_batch(&dir, "{folder}_{author}{ext}").unwrap_err();
    assert!(matches!(&*err, ErrorKind::Template(_)));
    assert_eq!(listing(&dir), ["a.txt"]);
}

#[test]
fn test_rendering_an_unusable_name_fails_per_file() {
    let (_tmp, dir) = folder(&[("a.txt", b"a"), ("b.txt", b"b")]);
    struct Dots;
    impl Describer for Dots {
        fn describe(&self, _: &Path, _: &Category) -> Description {
            Description::Extracted(Fragment::literal(".."))
        }
        fn fallback(&self) -> Fragment {
            Fragment::literal("..")
        }
    }
    let registry = DescriberRegistry::default().with(DescriberKind::Text, Dots);
    let outcomes = renamer("{extra}").with_registry(registry).rename_batch(&dir).unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes.iter().all(|o| matches!(o.status(), Status::Failed(_))));
    assert_eq!(listing(&dir), ["a.txt", "b.txt"]);
}

#[test]
fn test_custom_describer() {
    struct Shouty;
    impl Describer for Shouty {
        fn describe(&self, path: &Path, _: &Category) -> Description {
            let stem = path.file_stem().unwrap().to_string_lossy().to_uppercase();
            Description::Extracted(Fragment::new(stem).unwrap())
        }
        fn fallback(&self) -> Fragment {
            Fragment::literal("QUIET")
        }
    }
    let (_tmp, dir) = folder(&[("hello.txt", b"ignored")]);
    let registry = DescriberRegistry::default().with(DescriberKind::Text, Shouty);
    let outcomes = renamer("{extra}{ext}").with_registry(registry).rename_batch(&dir).unwrap();
    assert_eq!(outcomes[0].final_name(), Some("HELLO.txt"));
}

#[test]
fn test_empty_directory() {
    let (_tmp, dir) = folder(&[]);
    assert!(Renamer::default().rename_batch(&dir).unwrap().is_empty());
}

#[test]
fn test_audio_tags_reach_the_name() {
    use id3::{Tag, TagLike, Version};

    let mut tag = Tag::new();
    tag.set_artist("Daft Punk");
    tag.set_album("Discovery");
    let mut bytes = Vec::new();
    tag.write_to(&mut bytes, Version::Id3v24).unwrap();
    bytes.extend_from_slice(&[0u8; 64]);
    let (_tmp, dir) = folder(&[("track.mp3", bytes.as_slice())]);

    let outcomes = renamer("{type}_{extra}{ext}").rename_batch(&dir).unwrap();
    assert_eq!(outcomes[0].final_name(), Some("audio_mpeg_Daft Punk_Discovery.mp3"));
}

#[test]
fn test_collision_suffix_restores_extension() {
    let (_tmp, dir) = folder(&[("a.txt", b"same"), ("b.txt", b"same")]);
    let outcomes = renamer("{extra}").rename_batch(&dir).unwrap();
    assert_eq!(outcome(&outcomes, "a.txt").final_name(), Some("same"));
    assert_eq!(outcome(&outcomes, "b.txt").final_name(), Some("same_1.txt"));
    assert_eq!(listing(&dir), ["same", "same_1.txt"]);
}

#[test]
fn test_current_names_match_the_directory() {
    let (_tmp, dir) = folder(&[("a.txt", b"a"), ("x.txt", b"x")]);
    fs::create_dir(dir.join("sub")).unwrap();
    let outcomes = renamer("x{ext}").rename_batch(&dir).unwrap();
    let mut current: Vec<_> = outcomes.iter().map(|o| o.current_name().to_string()).collect();
    current.sort();
    assert_eq!(current, listing(&dir));
    assert_eq!(outcome(&outcomes, "a.txt").current_name(), "x_1.txt");
    assert_eq!(outcome(&outcomes, "x.txt").current_name(), "x.txt");
}

#[test]
fn test_dry_run_current_names_are_unchanged() {
    let (_tmp, dir) = folder(&[("a.txt", b"a")]);
    let outcomes = renamer("planned{ext}").with_dry_run(true).rename_batch(&dir).unwrap();
    assert_eq!(outcomes[0].final_name(), Some("planned.txt"));
    assert_eq!(outcomes[0].current_name(), "a.txt");
}

#[test]
fn test_batch_reports_its_directory() {
    let (_tmp, dir) = folder(&[("a.txt", b"a")]);
    let renamer = Renamer::default();
    let batch = renamer.batch(dir.join(".")).unwrap();
    assert_eq!(batch.folder(), "myfolder");
    assert_eq!(batch.directory(), fs::canonicalize(&dir).unwrap());
}
