use anyhow::Result;
use clap::Parser;
use remote_build::{
    config::{BuildConfig, ConfigFlags, StartupEnv},
    core::{
        pipeline::{self, BuildOutcome, PipelineOutcome},
        preflight, OutputSink,
    },
    git::GitCommand,
    logging::init_logging,
    output::{CliOutput, Output, OutputConfig},
    process::{ProcessRunner, SystemRunner},
    settings::RemoteBuildSettings,
};

#[derive(Parser, Debug)]
#[command(name = "remote-build")]
#[command(version = remote_build::VERSION)]
#[command(about = "Sync the local checkout to a remote build host and build there")]
#[command(long_about = r#"
Synchronizes the local checkout to a remote build host over SSH and runs the
build there.

  1. Finds the merge-base of --branch and HEAD and makes sure the remote
     checkout is at that commit, resetting it once if it is not.
  2. Pushes every file that differs from the merge-base with rsync, using
     checksums rather than timestamps.
  3. Restores remote files that changed on the host but were not pushed.
  4. Runs the build script remotely with the build type and any trailing
     arguments (a leading `--` is dropped).

The host comes from --host, then $YB_REMOTE_BUILD_HOST, then the
remoteBuild.host git config key.
"#)]
pub struct Args {
    #[arg(long, help = "Host for build")]
    host: Option<String>,

    #[arg(long, value_name = "PATH", help = "Path used for build on the remote host")]
    remote_path: Option<String>,

    #[arg(long, help = "Base branch for build [default: origin/master]")]
    branch: Option<String>,

    #[arg(long, help = "Build type [default: debug]")]
    build_type: Option<String>,

    #[arg(long, help = "Skip build, only sync files")]
    skip_build: bool,

    #[arg(short, long, help = "Be verbose; log every command that is run")]
    verbose: bool,

    #[arg(short, long, help = "Only print errors and the build's own output")]
    quiet: bool,

    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "ARGS",
        help = "Arguments for the remote build script"
    )]
    build_args: Vec<String>,
}

impl Args {
    fn into_flags(self) -> ConfigFlags {
        ConfigFlags {
            host: self.host,
            remote_path: self.remote_path,
            branch: self.branch,
            build_type: self.build_type,
            skip_build: self.skip_build,
            build_args: self.build_args,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let mut output = CliOutput::new(OutputConfig::new(args.quiet, args.verbose));
    let env = StartupEnv::capture()?;
    let runner = SystemRunner;

    let config = resolve_config(args, &env, &runner)?;
    preflight::check_dependencies()?;

    let outcome = execute(&config, &runner, &mut output)?;
    render_outcome(&outcome, &config, &mut output);
    Ok(())
}

fn resolve_config(
    args: Args,
    env: &StartupEnv,
    runner: &dyn ProcessRunner,
) -> Result<BuildConfig> {
    let settings = RemoteBuildSettings::load(&GitCommand::new(runner))?;
    Ok(BuildConfig::resolve(args.into_flags(), env, settings)?)
}

fn execute(
    config: &BuildConfig,
    runner: &dyn ProcessRunner,
    output: &mut dyn Output,
) -> Result<PipelineOutcome> {
    output.info(&format!(
        "Host: {}, build type: {}, remote path: {}",
        config.host, config.build_type, config.remote_path
    ));

    let mut sink = OutputSink(output);
    pipeline::execute(config, runner, &mut sink)
}

fn render_outcome(outcome: &PipelineOutcome, config: &BuildConfig, output: &mut dyn Output) {
    if outcome.reconcile.resynced {
        output.step(&format!(
            "Moved {} from {} to {}",
            config.remote_path, outcome.reconcile.initial_remote_commit, outcome.base_commit
        ));
    }
    if outcome.transferred {
        output.step(&format!(
            "Pushed {} file(s) to {}:{}",
            outcome.files.len(),
            config.host,
            config.remote_path
        ));
    }
    if !outcome.reverted.is_empty() {
        output.step(&format!("Reverted {} remote file(s)", outcome.reverted.len()));
    }
    if outcome.build == BuildOutcome::Skipped {
        output.result("Files synced, build skipped");
    }
}
