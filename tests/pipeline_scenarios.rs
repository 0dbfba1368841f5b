use remote_build::{
    config::BuildConfig,
    core::{
        pipeline::{self, BuildOutcome},
        RecordingSink,
    },
    error::{exit_code_for, RemoteBuildError},
    process::{OutputMode, ProcessOutput, ScriptedRunner},
};

const REMOTE_HEAD: &str = "git rev-parse HEAD";
const REMOTE_DIFF: &str = "&& git diff --name-status";
const LOCAL_DIFF: &str = "git diff abc123 --name-status";

fn config() -> BuildConfig {
    BuildConfig {
        host: "buildbox".to_string(),
        remote_path: "~/code/db".to_string(),
        branch: "origin/master".to_string(),
        build_type: "debug".to_string(),
        build_script: "./yb_build.sh".to_string(),
        tracking_branch: "master".to_string(),
        skip_build: false,
        build_args: Vec::new(),
    }
}

fn base_runner() -> ScriptedRunner {
    ScriptedRunner::new().on("git merge-base", ProcessOutput::success("abc123\n"))
}

/// Remote already at the base commit: no sync block, diff taken against it.
#[test]
fn test_matching_remote_goes_straight_to_diff() {
    let runner = base_runner()
        .on(REMOTE_HEAD, ProcessOutput::success("abc123\n"))
        .on(LOCAL_DIFF, ProcessOutput::success("M\tsrc/a.cc\n"));
    let mut sink = RecordingSink::default();

    let outcome = pipeline::execute(&config(), &runner, &mut sink).unwrap();

    assert!(!outcome.reconcile.resynced);
    assert_eq!(outcome.base_commit, "abc123");
    assert_eq!(outcome.files, vec!["src/a.cc"]);
    assert_eq!(runner.count("git pull"), 0);
    assert_eq!(runner.count("git clean"), 0);
    assert_eq!(runner.count(LOCAL_DIFF), 1);

    let lines = runner.command_lines();
    let head = lines.iter().position(|l| l.contains(REMOTE_HEAD)).unwrap();
    let diff = lines.iter().position(|l| l.contains(LOCAL_DIFF)).unwrap();
    assert!(head < diff, "remote HEAD is checked before the diff");
}

/// Remote behind: exactly one composite reset targeting the base commit.
#[test]
fn test_mismatched_remote_is_reset_once() {
    let runner = base_runner()
        .once(REMOTE_HEAD, ProcessOutput::success("def456\n"))
        .on(REMOTE_HEAD, ProcessOutput::success("abc123\n"));
    let mut sink = RecordingSink::default();

    let outcome = pipeline::execute(&config(), &runner, &mut sink).unwrap();

    assert!(outcome.reconcile.resynced);
    let resets: Vec<String> = runner
        .command_lines()
        .into_iter()
        .filter(|l| l.contains("git pull"))
        .collect();
    assert_eq!(
        resets,
        vec![
            "ssh buildbox cd ~/code/db && git checkout -- . && git clean -f . && \
             git checkout master && git pull && git checkout abc123"
        ]
    );
    assert_eq!(runner.count(REMOTE_HEAD), 2);
    assert!(sink.infos.contains(&"Remote commit mismatch, syncing".to_string()));
}

/// Remote still wrong after the reset: fatal, both commits named, nothing pushed.
#[test]
fn test_persistent_mismatch_aborts_before_transfer() {
    let runner = base_runner().on(REMOTE_HEAD, ProcessOutput::success("def456\n"));

    let err = pipeline::execute(&config(), &runner, &mut RecordingSink::default()).unwrap_err();

    let message = format!("{err:#}");
    assert!(message.contains("abc123"), "{message}");
    assert!(message.contains("def456"), "{message}");
    assert!(matches!(
        err.downcast_ref::<RemoteBuildError>(),
        Some(RemoteBuildError::CommitMismatch { .. })
    ));
    assert_eq!(exit_code_for(&err), 1);
    assert_eq!(runner.count("git pull"), 1);
    assert_eq!(runner.count(LOCAL_DIFF), 0);
    assert_eq!(runner.count("rsync"), 0);
}

#[test]
fn test_full_run_pushes_reverts_and_builds() {
    let runner = base_runner()
        .on(REMOTE_HEAD, ProcessOutput::success("abc123\n"))
        .on(
            LOCAL_DIFF,
            ProcessOutput::success("M\ta.txt\nD\tgone.txt\nR100\told.txt\tb.txt\n"),
        )
        .on(REMOTE_DIFF, ProcessOutput::success("M\tb.txt\nM\tc.txt\n"));
    let mut config = config();
    config.build_args = vec!["--".to_string(), "--cxx-test".to_string(), "a b".to_string()];
    let mut sink = RecordingSink::default();

    let outcome = pipeline::execute(&config, &runner, &mut sink).unwrap();

    assert_eq!(outcome.files, vec!["a.txt", "b.txt"]);
    assert!(outcome.transferred);
    assert_eq!(outcome.reverted, vec!["c.txt"]);
    assert_eq!(outcome.build, BuildOutcome::Succeeded);

    let invocations = runner.invocations();
    let rsync = invocations.iter().find(|i| i.program == "rsync").unwrap();
    assert_eq!(
        rsync.args,
        vec!["-rlpcgoDvR", "a.txt", "b.txt", "buildbox:~/code/db"]
    );
    assert_eq!(rsync.mode, OutputMode::Inherit);

    let lines = runner.command_lines();
    assert!(lines.contains(&"ssh buildbox cd ~/code/db && git checkout -- c.txt".to_string()));
    assert_eq!(
        lines.last().unwrap(),
        "ssh buildbox cd ~/code/db && ./yb_build.sh debug --cxx-test 'a b'"
    );
    assert_eq!(
        sink.infos,
        vec![
            "Base commit: abc123".to_string(),
            "Total files: 2".to_string(),
            "Reverting:\n  c.txt\n".to_string(),
            "Remote command: cd ~/code/db && ./yb_build.sh debug --cxx-test 'a b'".to_string(),
        ]
    );
}

#[test]
fn test_no_changes_skips_rsync_but_still_checks_drift() {
    let runner = base_runner().on(REMOTE_HEAD, ProcessOutput::success("abc123\n"));
    let mut config = config();
    config.skip_build = true;

    let outcome = pipeline::execute(&config, &runner, &mut RecordingSink::default()).unwrap();

    assert!(!outcome.transferred);
    assert_eq!(outcome.build, BuildOutcome::Skipped);
    assert_eq!(runner.count("rsync"), 0);
    assert_eq!(runner.count(REMOTE_DIFF), 1);
    assert_eq!(runner.count("yb_build.sh"), 0);
}

#[test]
fn test_rsync_failure_exit_code_propagates() {
    let runner = base_runner()
        .on(REMOTE_HEAD, ProcessOutput::success("abc123\n"))
        .on(LOCAL_DIFF, ProcessOutput::success("M\ta.txt\n"))
        .on("rsync", ProcessOutput::failure(12));

    let err = pipeline::execute(&config(), &runner, &mut RecordingSink::default()).unwrap_err();

    assert_eq!(exit_code_for(&err), 12);
    assert_eq!(runner.count(REMOTE_DIFF), 0, "drift check never starts");
}

#[test]
fn test_revert_failure_exit_code_propagates_and_skips_build() {
    let runner = base_runner()
        .on(REMOTE_HEAD, ProcessOutput::success("abc123\n"))
        .on(LOCAL_DIFF, ProcessOutput::success("M\ta.txt\n"))
        .on(REMOTE_DIFF, ProcessOutput::success("M\tc.txt\n"))
        .on("git checkout -- c.txt", ProcessOutput::failure(5));

    let err = pipeline::execute(&config(), &runner, &mut RecordingSink::default()).unwrap_err();

    assert_eq!(exit_code_for(&err), 5);
    assert_eq!(runner.count("rsync"), 1);
    assert_eq!(runner.count("yb_build.sh"), 0);
}

#[test]
fn test_build_failure_exit_code_propagates() {
    let runner = base_runner()
        .on(REMOTE_HEAD, ProcessOutput::success("abc123\n"))
        .on("yb_build.sh", ProcessOutput::failure(3));

    let err = pipeline::execute(&config(), &runner, &mut RecordingSink::default()).unwrap_err();

    assert_eq!(exit_code_for(&err), 3);
}

#[test]
fn test_custom_build_script_and_tracking_branch() {
    let runner = base_runner()
        .once(REMOTE_HEAD, ProcessOutput::success("def456\n"))
        .on(REMOTE_HEAD, ProcessOutput::success("abc123\n"));
    let mut config = config();
    config.build_script = "./build.sh".to_string();
    config.tracking_branch = "main".to_string();
    config.build_type = "release".to_string();

    pipeline::execute(&config, &runner, &mut RecordingSink::default()).unwrap();

    assert_eq!(runner.count("git checkout main && git pull"), 1);
    assert_eq!(runner.count("cd ~/code/db && ./build.sh release"), 1);
}
