use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "shotframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the composition plan and diagnostics for one view as JSON.
    Plan(PlanArgs),
    /// Run every language/image pair of a project and fail if any pass blocks export.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Project JSON file.
    #[arg(long)]
    project: PathBuf,

    /// Language code; empty selects language-free assets.
    #[arg(long, default_value = "")]
    language: String,

    /// Image number.
    #[arg(long, default_value_t = 1)]
    image: u32,

    /// Layer index to mark as highlighted.
    #[arg(long)]
    highlight: Option<usize>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Project JSON file.
    #[arg(long)]
    project: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Do not report labels whose font had to be shrunk to the minimum without fitting.
    #[arg(long)]
    ignore_font_too_big: bool,

    /// Directory with font files for text measurement (default: `<project>/fonts`).
    #[arg(long)]
    fonts: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("shotframe=warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Check(args) => cmd_check(args),
    }
}

struct Loaded {
    project: shotframe::Project,
    context: shotframe::ProjectContext,
    measurer: Box<dyn shotframe::TextMeasurer>,
}

fn load(project_path: &Path, common: &CommonArgs) -> anyhow::Result<Loaded> {
    let project = shotframe::Project::from_json_file(project_path)
        .with_context(|| format!("load project '{}'", project_path.display()))?;
    let context = shotframe::ProjectContext::for_project_file(project_path);
    let measurer = make_measurer(&context, common.fonts.as_deref())?;
    Ok(Loaded {
        project,
        context,
        measurer,
    })
}

fn make_measurer(
    context: &shotframe::ProjectContext,
    fonts: Option<&Path>,
) -> anyhow::Result<Box<dyn shotframe::TextMeasurer>> {
    if let Some(dir) = fonts {
        let m = shotframe::ParleyMeasurer::from_font_dirs(&[dir])
            .with_context(|| format!("load fonts from '{}'", dir.display()))?;
        return Ok(Box::new(m));
    }

    let default_dir = context.project_root.as_ref().map(|r| r.join("fonts"));
    if let Some(dir) = default_dir.filter(|d| d.is_dir()) {
        match shotframe::ParleyMeasurer::from_font_dirs(&[&dir]) {
            Ok(m) => return Ok(Box::new(m)),
            Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "falling back to monospace measurement"),
        }
    }
    Ok(Box::new(shotframe::MonospaceMeasurer::default()))
}

fn options_for(
    project: &shotframe::Project,
    common: &CommonArgs,
    highlight: Option<usize>,
) -> shotframe::ComposeOptions {
    shotframe::ComposeOptions {
        ignore_font_too_big: common.ignore_font_too_big,
        highlight_layer: highlight,
        output_template: project.output.clone(),
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let mut loaded = load(&args.project, &args.common)?;
    let view = shotframe::ViewState::new(args.language, args.image);
    let opts = options_for(&loaded.project, &args.common, args.highlight);

    let pass = shotframe::LayoutComposer::compose(
        &loaded.project.layers,
        &loaded.context,
        &view,
        &opts,
        loaded.measurer.as_mut(),
    );

    let out = serde_json::json!({
        "language": view.language,
        "image": view.image_index,
        "output": pass.plan.output_path,
        "plan": pass.plan,
        "errors": pass.errors,
        "report": pass.report(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize layout pass")?
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let mut loaded = load(&args.project, &args.common)?;
    let opts = options_for(&loaded.project, &args.common, None);

    let languages = if loaded.project.languages.is_empty() {
        vec![String::new()]
    } else {
        loaded.project.languages.clone()
    };

    let mut blocked = 0usize;
    let mut warned = 0usize;
    for language in &languages {
        for image in 1..=loaded.project.images {
            let view = shotframe::ViewState::new(language.clone(), image);
            let pass = shotframe::LayoutComposer::compose(
                &loaded.project.layers,
                &loaded.context,
                &view,
                &opts,
                loaded.measurer.as_mut(),
            );
            if pass.is_clean() {
                continue;
            }
            if pass.blocks_export() {
                blocked += 1;
            } else {
                warned += 1;
            }
            eprintln!("[{language}] image {image}:\n{}", pass.report());
        }
    }

    if blocked > 0 {
        anyhow::bail!("{blocked} view(s) cannot be exported");
    }
    eprintln!("ok ({warned} view(s) with warnings)");
    Ok(())
}
