use fob_html::{BuildCommand, BuildOutcome, ConfigEnv, EmittedFile, PluginHost};
use fob_plugin_version::package_version_from_manifest;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::cli::TransformArgs;
use crate::commands::build_host;
use crate::config::HtmlConfig;
use crate::error::{CliError, Result, ResultExt};

/// Where the transform writes its results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    /// Page destination; `None` prints to stdout
    pub html: Option<PathBuf>,
    /// Directory for emitted files; `None` discards them
    pub assets: Option<PathBuf>,
}

impl OutputPlan {
    pub fn from_args(args: &TransformArgs) -> Self {
        let html = args.out.clone().or_else(|| {
            let dir = args.out_dir.as_ref()?;
            let name = args.input.file_name()?;
            Some(dir.join(name))
        });
        let assets = args.out_dir.clone().or_else(|| {
            html.as_ref()
                .and_then(|path| path.parent())
                .map(Path::to_path_buf)
        });
        Self { html, assets }
    }
}

pub fn execute(args: TransformArgs) -> Result<()> {
    let config = HtmlConfig::load(args.config.as_deref())?;
    let command = BuildCommand::from(args.mode);

    let mut env = ConfigEnv::from_process(command);
    if args.package_version.is_some() {
        env = env.with_package_version(args.package_version.clone());
    } else if env.package_version.is_none() {
        let version = manifest_version(&args.input, Path::new("."))?;
        env = env.with_package_version(version);
    }

    let host = build_host(&config);
    let source = fs::read_to_string(&args.input).with_path(&args.input)?;
    let plan = OutputPlan::from_args(&args);

    if args.fail {
        run(&host, &env, &source, BuildOutcome::Failed("build failed".into()))?;
        return Err(CliError::BuildFailed);
    }

    let (html, files) = run(&host, &env, &source, BuildOutcome::Success)?;

    match &plan.html {
        Some(path) => {
            write_file(path, &html)?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", html),
    }

    match &plan.assets {
        Some(dir) => {
            for file in &files {
                let path = dir.join(&file.file_name);
                write_file(&path, &file.source)?;
                info!("Emitted {}", path.display());
            }
        }
        None if !files.is_empty() => {
            warn!(
                "{} emitted file(s) discarded; pass --out or --out-dir to write them",
                files.len()
            );
        }
        None => {}
    }

    Ok(())
}

/// Version from the nearest `package.json`: next to the page first, then
/// in `cwd`. A missing manifest is not an error; an unreadable one is.
fn manifest_version(input: &Path, cwd: &Path) -> Result<Option<String>> {
    let page_dir = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(cwd);

    for dir in [page_dir, cwd] {
        if dir.join("package.json").is_file() {
            debug!("Reading package version from {}", dir.join("package.json").display());
            return Ok(package_version_from_manifest(dir)?);
        }
    }
    Ok(None)
}

/// Drive the plugin lifecycle once: configure, transform, build end.
pub fn run(
    host: &PluginHost,
    env: &ConfigEnv,
    html: &str,
    outcome: BuildOutcome,
) -> Result<(String, Vec<EmittedFile>)> {
    let patch = host.configure(env)?;
    debug!(
        "Configured {} plugin(s) for {}; externals: {:?}",
        host.len(),
        env.command,
        patch.external
    );

    let page = host.transform_index_html(html)?;
    debug!("Injected {} tag(s)", page.tags.len());

    let files = host.build_end(&outcome)?;
    Ok((page.html, files))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}
