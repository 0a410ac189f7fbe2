//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::app::container::AppContainer;
use crate::cli::args::{PlanArgs, ProbeArgs, SegmentInputArgs, SplitArgs};
use crate::domain::model::{OutputPlan, RunContext, SplitReport};
use crate::form::{FormController, PlanFile};

/// Fill a form from command-line input and submit it
pub fn build_run_context(args: &SegmentInputArgs) -> Result<RunContext> {
    let mut form = FormController::empty();
    form.set_file_path(args.input.clone());
    if let Some(date) = &args.date {
        form.set_date_label(date.clone());
    }

    if let Some(plan_file) = &args.plan_file {
        let plan = PlanFile::load(Path::new(plan_file))?;
        plan.apply_to(&mut form)?;
    }

    for spec in &args.segments {
        form.add_row_with(spec.start.clone(), spec.end.clone(), spec.name.clone());
    }

    Ok(form.submit()?)
}

/// Execute the split command
pub async fn split(container: &dyn AppContainer, args: SplitArgs) -> Result<SplitReport> {
    let context = build_run_context(&args.source)?;
    info!("Input: {}", context.source_path.display());
    info!("Date label: {}", context.date_label);

    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, stopping after the current segment");
                cancel.cancel();
            }
        })
    };

    let result = container
        .split_interactor()
        .execute(&context, &cancel)
        .await;
    watcher.abort();

    let report = result?;
    println!(
        "Video cut into {} segment(s) in {}",
        report.outputs.len(),
        report.output_folder.display()
    );
    Ok(report)
}

/// Execute the plan command
pub async fn plan(container: &dyn AppContainer, args: PlanArgs) -> Result<OutputPlan> {
    let context = build_run_context(&args.source)?;
    let plan = container.split_interactor().plan(&context).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&plan)
            .context("Failed to serialize plan to JSON")?;
        println!("{}", json);
    } else {
        display_plan(&plan);
    }

    Ok(plan)
}

/// Execute the probe command
pub async fn probe(container: &dyn AppContainer, args: ProbeArgs) -> Result<f64> {
    let duration = container
        .probe_port()
        .probe_duration(Path::new(&args.input))
        .await?;
    println!("{}", duration);
    Ok(duration)
}

/// Display the plan in human-readable format
fn display_plan(plan: &OutputPlan) {
    println!("Source: {} ({:.3}s)", plan.source_path.display(), plan.source_duration);
    println!("Output folder: {}", plan.output_folder.display());
    println!();
    for planned in &plan.segments {
        println!(
            "  {:>3}. {} - {}  {}",
            planned.index + 1,
            planned.segment.start,
            planned.segment.end,
            planned
                .output_path
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default()
        );
    }
}
